//! Session builds dialog.
//!
//! A modal table of the session's finished builds: one bold header row over
//! a scrollable list of data rows. Column widths are synchronized so every
//! cell in a column is exactly as wide as the widest cell in it, and a
//! header spacer compensates for the scrollbar's intrusion into the body
//! width so header and body stay visually aligned.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use thiserror::Error;
use tracing::warn;
use unicode_width::UnicodeWidthStr;

use crate::builds::{format_duration, format_timestamp, BuildOutcome, BuildRecord};
use crate::ui::components::{ScrollRegion, VisibilityChange, WidgetId};
use crate::ui::icons::OutcomeIcons;
use crate::ui::theme::theme;

/// Number of table columns.
pub const NUM_COLUMNS: usize = 5;

/// Gap between adjacent columns, in terminal columns.
const COLUMN_GAP: u16 = 2;

/// Table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Project,
    Start,
    Finish,
    Duration,
    Result,
}

impl Column {
    /// Every column, in display order.
    pub const ALL: [Column; NUM_COLUMNS] = [
        Self::Project,
        Self::Start,
        Self::Finish,
        Self::Duration,
        Self::Result,
    ];

    /// Header label.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Project => "PROJECT",
            Self::Start => "BUILD START",
            Self::Finish => "BUILD FINISH",
            Self::Duration => "BUILD TIME",
            Self::Result => "RESULT",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Project => 0,
            Self::Start => 1,
            Self::Finish => 2,
            Self::Duration => 3,
            Self::Result => 4,
        }
    }
}

/// Synchronized per-column widths, shared by the header and every data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnWidths([u16; NUM_COLUMNS]);

impl ColumnWidths {
    /// The synchronized width of a column.
    pub fn get(&self, column: Column) -> u16 {
        self.0[column.index()]
    }

    fn set(&mut self, column: Column, width: u16) {
        self.0[column.index()] = width;
    }
}

/// Errors found while building the table from the input records.
#[derive(Debug, Error)]
pub enum SessionBuildsError {
    /// A record's outcome has no icon in the supplied mapping.
    #[error("no icon mapped for outcome {outcome:?} (record {index}, build of '{project}')")]
    MissingIcon {
        index: usize,
        project: String,
        outcome: BuildOutcome,
    },
}

/// Actions that can be returned from the session builds dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBuildsAction {
    /// The dialog was confirmed and dismissed.
    Accept,
}

/// One data row's rendered cells plus the styling of its Result icon.
#[derive(Debug)]
struct Row {
    cells: [String; NUM_COLUMNS],
    result_style: Style,
}

impl Row {
    fn cell_text(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }
}

/// The session builds dialog.
///
/// Built once from the caller's record sequence, displayed, and discarded on
/// dismissal. There is no update path.
#[derive(Debug)]
pub struct SessionBuildsView {
    visible: bool,
    rows: Vec<Row>,
    widths: ColumnWidths,
    /// Width synchronization has run at least once (on first display).
    sized: bool,
    scroll: usize,
    scroll_region: ScrollRegion,
    /// The scrollbar source this view subscribed to at construction.
    watched: WidgetId,
    spacer_width: u16,
    spacer_visible: bool,
}

impl SessionBuildsView {
    /// Build the table from an ordered record sequence and an outcome→icon
    /// mapping.
    ///
    /// One data row is produced per record, in input order, with cells:
    /// project name, formatted start and finish timestamps, elapsed time as
    /// `HH:MM:SS`, and the outcome's icon.
    ///
    /// # Errors
    ///
    /// Returns [`SessionBuildsError::MissingIcon`] if any record's outcome
    /// has no entry in the mapping. Non-negative durations are guaranteed by
    /// [`BuildRecord`] construction.
    pub fn new(
        records: &[BuildRecord],
        icons: &OutcomeIcons,
    ) -> Result<Self, SessionBuildsError> {
        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let icon =
                icons
                    .get(record.outcome())
                    .ok_or_else(|| SessionBuildsError::MissingIcon {
                        index,
                        project: record.project().to_string(),
                        outcome: record.outcome(),
                    })?;
            rows.push(Row {
                cells: [
                    record.project().to_string(),
                    format_timestamp(record.started_ms()),
                    format_timestamp(record.finished_ms()),
                    format_duration(record.elapsed_ms()),
                    icon.glyph.to_string(),
                ],
                result_style: icon.style,
            });
        }

        let scroll_region = ScrollRegion::new();
        let watched = scroll_region.id();

        Ok(Self {
            visible: false,
            rows,
            widths: ColumnWidths::default(),
            sized: false,
            scroll: 0,
            scroll_region,
            watched,
            spacer_width: 0,
            spacer_visible: false,
        })
    }

    /// Show the dialog.
    pub fn show(&mut self) {
        self.visible = true;
        self.scroll = 0;
    }

    /// Hide the dialog.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the dialog is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Equalize every column's width across the header and all data rows.
    ///
    /// A column's width becomes the maximum natural width among its header
    /// cell and every row cell. Runs once when the view first becomes
    /// visible, and again whenever the header spacer's width changes.
    /// Idempotent; O(rows × columns); a loop over zero rows is a no-op.
    pub fn update_sizes(&mut self) {
        for column in Column::ALL {
            let mut max = cell_width(column.title());
            for row in &self.rows {
                max = max.max(cell_width(row.cell_text(column)));
            }
            self.widths.set(column, max);
        }
    }

    /// React to a scrollbar visibility notification.
    ///
    /// Only notifications from the scroll region this view subscribed to at
    /// construction are honored; anything else is logged and ignored without
    /// touching state. A notification matching the current spacer state is a
    /// no-op, so repeated identical notifications are idempotent.
    pub fn on_scrollbar_event(&mut self, event: VisibilityChange) {
        if event.source != self.watched {
            warn!(
                source = ?event.source,
                watched = ?self.watched,
                "ignoring visibility change from unwatched widget"
            );
            return;
        }

        if self.spacer_visible == event.visible {
            return;
        }

        self.spacer_width = self.scroll_region.scrollbar_width();
        self.spacer_visible = event.visible;
        // The spacer changes the header's occupied width, so re-synchronize.
        self.update_sizes();
    }

    /// Handle keyboard input while the dialog is visible.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<SessionBuildsAction> {
        if !self.visible {
            return None;
        }

        match (key.code, key.modifiers) {
            // The dialog's single confirmation action.
            (KeyCode::Enter, KeyModifiers::NONE)
            | (KeyCode::Esc, KeyModifiers::NONE)
            | (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.hide();
                Some(SessionBuildsAction::Accept)
            }

            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, KeyModifiers::NONE) => {
                self.scroll = (self.scroll + 1).min(self.scroll_region.max_scroll());
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, KeyModifiers::NONE) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL)
            | (KeyCode::PageDown, KeyModifiers::NONE) => {
                let page = self.page_size();
                self.scroll = (self.scroll + page).min(self.scroll_region.max_scroll());
                None
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, KeyModifiers::NONE) => {
                let page = self.page_size();
                self.scroll = self.scroll.saturating_sub(page);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => {
                self.scroll = 0;
                None
            }
            (KeyCode::Char('G'), KeyModifiers::SHIFT) | (KeyCode::Char('G'), KeyModifiers::NONE) => {
                self.scroll = self.scroll_region.max_scroll();
                None
            }

            _ => None,
        }
    }

    fn page_size(&self) -> usize {
        self.rows.len().min(10).max(1)
    }

    /// Render the dialog as a centered overlay.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let t = theme();

        let overlay_width = ((area.width as f32 * 0.8) as u16).max(40).min(area.width);
        let overlay_height = ((area.height as f32 * 0.7) as u16).max(8).min(area.height);
        let overlay_x = area.x + (area.width - overlay_width) / 2;
        let overlay_y = area.y + (area.height - overlay_height) / 2;
        let overlay = Rect::new(overlay_x, overlay_y, overlay_width, overlay_height);

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .title(" Session builds ")
            .title_alignment(Alignment::Left)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header row plus separator
                Constraint::Min(1),    // scrollable data rows
                Constraint::Length(1), // confirmation hint
            ])
            .split(inner);

        // Show-event analogue: synchronize widths once on first display.
        if !self.sized {
            self.update_sizes();
            self.sized = true;
        }

        // Mirror the live scrollbar geometry before drawing the header, so
        // the compensating spacer is already correct for this frame.
        let viewport_height = chunks[1].height as usize;
        if let Some(event) = self
            .scroll_region
            .update_geometry(viewport_height, self.rows.len())
        {
            self.on_scrollbar_event(event);
        }

        self.scroll = self.scroll.min(self.scroll_region.max_scroll());

        self.render_header(frame, chunks[0]);
        self.render_rows(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);

        let mut spans = Vec::with_capacity(NUM_COLUMNS * 2 + 1);
        for column in Column::ALL {
            spans.push(Span::styled(
                pad_cell(column.title(), self.widths.get(column)),
                bold,
            ));
            spans.push(Span::raw(" ".repeat(COLUMN_GAP as usize)));
        }
        if self.spacer_visible {
            spans.push(Span::raw(" ".repeat(self.spacer_width as usize)));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect) {
        let t = theme();

        if self.rows.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No builds recorded this session",
                Style::default().fg(t.muted),
            )));
            frame.render_widget(empty, area);
            return;
        }

        let visible = self
            .rows
            .iter()
            .skip(self.scroll)
            .take(area.height as usize);

        let mut lines = Vec::with_capacity(area.height as usize);
        for row in visible {
            let mut spans = Vec::with_capacity(NUM_COLUMNS * 2);
            for column in Column::ALL {
                let text = pad_cell(row.cell_text(column), self.widths.get(column));
                let span = if column == Column::Result {
                    Span::styled(text, row.result_style)
                } else {
                    Span::raw(text)
                };
                spans.push(span);
                spans.push(Span::raw(" ".repeat(COLUMN_GAP as usize)));
            }
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines), area);

        if self.scroll_region.scrollbar_visible() && area.width > 0 && area.height > 0 {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));
            let mut state =
                ScrollbarState::new(self.scroll_region.max_scroll()).position(self.scroll);
            let scrollbar_area = Rect::new(area.x + area.width - 1, area.y, 1, area.height);
            frame.render_stateful_widget(scrollbar, scrollbar_area, &mut state);
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let hints = Line::from(vec![
            Span::styled("j/k", Style::default().fg(t.success)),
            Span::styled(": scroll  ", Style::default().fg(t.dim)),
            Span::styled("g/G", Style::default().fg(t.success)),
            Span::styled(": top/bottom  ", Style::default().fg(t.dim)),
            Span::styled("Enter", Style::default().fg(t.success)),
            Span::styled(": OK", Style::default().fg(t.dim)),
        ]);
        frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), area);
    }
}

/// Natural minimum width of a cell's text, in terminal columns.
fn cell_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text) as u16
}

/// Pad a cell's text with trailing spaces up to the synchronized width.
fn pad_cell(text: &str, width: u16) -> String {
    let fill = (width as usize).saturating_sub(UnicodeWidthStr::width(text));
    let mut cell = String::with_capacity(text.len() + fill);
    cell.push_str(text);
    cell.extend(std::iter::repeat(' ').take(fill));
    cell
}
