//! Toast notifications for build results.
//!
//! The TUI stand-in for the host's tray balloons: transient messages shown
//! in the bottom-right corner, expiring after the timeout configured in the
//! settings.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::builds::{format_duration, BuildOutcome, BuildRecord};
use crate::ui::theme::theme;

/// The kind of notification, which determines its color and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Informational message.
    Info,
    /// A build succeeded.
    Success,
    /// Something non-fatal went wrong, or a build was canceled.
    Warning,
    /// A build failed, or an operation errored.
    Error,
}

impl NotificationKind {
    /// Icon glyph for this kind.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✔",
            Self::Warning => "⚠",
            Self::Error => "✘",
        }
    }

    /// Style for this kind, taken from the active theme.
    pub fn style(&self) -> Style {
        let t = theme();
        let color = match self {
            Self::Info => t.info,
            Self::Success => t.success,
            Self::Warning => t.warning,
            Self::Error => t.error,
        };
        Style::default().fg(color)
    }
}

/// A single transient notification.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The message shown to the user.
    pub message: String,
    /// The notification kind.
    pub kind: NotificationKind,
    created_at: Instant,
    duration: Duration,
}

/// Default display duration when none is configured.
const DEFAULT_DURATION: Duration = Duration::from_secs(5);

impl Notification {
    /// Create a notification with an explicit display duration.
    pub fn new(message: impl Into<String>, kind: NotificationKind, duration: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            duration,
        }
    }

    /// An info notification with the default duration.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info, DEFAULT_DURATION)
    }

    /// A success notification with the default duration.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success, DEFAULT_DURATION)
    }

    /// An error notification with the default duration.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error, DEFAULT_DURATION)
    }

    /// The notification for a finished build, styled by outcome and shown
    /// for the configured timeout.
    pub fn build_finished(record: &BuildRecord, timeout: Duration) -> Self {
        let kind = match record.outcome() {
            BuildOutcome::Success => NotificationKind::Success,
            BuildOutcome::Failure => NotificationKind::Error,
            BuildOutcome::Canceled => NotificationKind::Warning,
        };
        let message = format!(
            "{} {} in {}",
            record.project(),
            record.outcome().label(),
            format_duration(record.elapsed_ms())
        );
        Self::new(message, kind, timeout)
    }

    /// Whether the notification's display time has elapsed.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Holds the currently visible notifications.
#[derive(Debug, Default)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
}

/// At most this many toasts stack on screen; older ones are dropped.
const MAX_VISIBLE: usize = 3;

impl NotificationManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification, dropping the oldest beyond the visible cap.
    pub fn push(&mut self, notification: Notification) {
        self.queue.push_back(notification);
        while self.queue.len() > MAX_VISIBLE {
            self.queue.pop_front();
        }
    }

    /// Drop expired notifications. Called on every tick.
    pub fn tick(&mut self) {
        self.queue.retain(|n| !n.is_expired());
    }

    /// Whether no notifications are showing.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of notifications showing.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Render the toasts stacked in the bottom-right corner.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.queue.is_empty() {
            return;
        }

        let width = 44.min(area.width.saturating_sub(4));
        let each_height: u16 = 3; // one message line plus borders
        let total = (each_height * self.queue.len() as u16).min(area.height.saturating_sub(2));

        let x = area.x + area.width.saturating_sub(width + 2);
        let mut y = area.y + area.height.saturating_sub(total + 1);

        for notification in &self.queue {
            if y + each_height > area.y + area.height {
                break;
            }
            let toast_area = Rect::new(x, y, width, each_height);
            frame.render_widget(Clear, toast_area);

            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", notification.kind.icon()),
                    notification.kind.style().add_modifier(Modifier::BOLD),
                ),
                Span::raw(notification.message.clone()),
            ]);
            let toast = Paragraph::new(line).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(notification.kind.style()),
            );
            frame.render_widget(toast, toast_area);
            y += each_height;
        }
    }
}
