//! Scroll region geometry and scrollbar visibility notifications.
//!
//! The session-builds table keeps its data rows inside a vertically
//! scrollable region while the header row sits outside it. The region
//! reports scrollbar visibility changes as explicit, source-tagged
//! notifications so the subscribing view can compensate its header, and so
//! it can ignore notifications that did not come from the widget it watches.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::trace;

/// Width of a vertical scrollbar, in terminal columns.
pub const SCROLLBAR_WIDTH: u16 = 1;

/// Identity of a watched widget, used to tag visibility notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetId(u32);

impl WidgetId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Notification that a widget's vertical scrollbar was shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    /// The widget the notification came from.
    pub source: WidgetId,
    /// The scrollbar's new visibility.
    pub visible: bool,
}

/// The vertically scrollable region holding the data rows.
///
/// Tracks viewport and content heights; the vertical scrollbar shows exactly
/// when the content overflows the viewport.
#[derive(Debug)]
pub struct ScrollRegion {
    id: WidgetId,
    viewport_height: usize,
    content_height: usize,
    scrollbar_visible: bool,
}

impl ScrollRegion {
    /// Create a region with empty geometry and a fresh id.
    pub fn new() -> Self {
        Self {
            id: WidgetId::next(),
            viewport_height: 0,
            content_height: 0,
            scrollbar_visible: false,
        }
    }

    /// This region's widget id. Subscribers compare notification sources
    /// against it.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Whether the vertical scrollbar is currently showing.
    pub fn scrollbar_visible(&self) -> bool {
        self.scrollbar_visible
    }

    /// The scrollbar's width in terminal columns.
    pub fn scrollbar_width(&self) -> u16 {
        SCROLLBAR_WIDTH
    }

    /// Maximum scroll offset for the current geometry.
    pub fn max_scroll(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Record the current geometry.
    ///
    /// Returns a notification when the scrollbar's visibility toggled as a
    /// result; identical geometry updates return `None`.
    pub fn update_geometry(
        &mut self,
        viewport_height: usize,
        content_height: usize,
    ) -> Option<VisibilityChange> {
        self.viewport_height = viewport_height;
        self.content_height = content_height;

        let visible = content_height > viewport_height;
        if visible == self.scrollbar_visible {
            return None;
        }

        self.scrollbar_visible = visible;
        trace!(visible, "scrollbar visibility toggled");
        Some(VisibilityChange {
            source: self.id,
            visible,
        })
    }
}

impl Default for ScrollRegion {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_region_has_hidden_scrollbar() {
        let region = ScrollRegion::new();
        assert!(!region.scrollbar_visible());
        assert_eq!(region.max_scroll(), 0);
    }

    #[test]
    fn test_overflow_shows_scrollbar() {
        let mut region = ScrollRegion::new();
        let change = region.update_geometry(5, 12).unwrap();
        assert_eq!(change.source, region.id());
        assert!(change.visible);
        assert!(region.scrollbar_visible());
        assert_eq!(region.max_scroll(), 7);
    }

    #[test]
    fn test_identical_geometry_is_silent() {
        let mut region = ScrollRegion::new();
        assert!(region.update_geometry(5, 12).is_some());
        assert!(region.update_geometry(5, 12).is_none());
        assert!(region.update_geometry(5, 20).is_none());
    }

    #[test]
    fn test_shrinking_content_hides_scrollbar() {
        let mut region = ScrollRegion::new();
        region.update_geometry(5, 12);
        let change = region.update_geometry(5, 3).unwrap();
        assert!(!change.visible);
        assert!(!region.scrollbar_visible());
    }

    #[test]
    fn test_exact_fit_needs_no_scrollbar() {
        let mut region = ScrollRegion::new();
        assert!(region.update_geometry(5, 5).is_none());
        assert!(!region.scrollbar_visible());
    }

    #[test]
    fn test_widget_ids_are_unique() {
        assert_ne!(WidgetId::next(), WidgetId::next());
    }
}
