//! Settings view (the plugin's options page).
//!
//! Edits a draft copy of the settings and exposes the host options-page
//! contract: apply (persist the draft) or finish (discard it). The caller
//! owns persistence and reacts to applied changes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::Settings;
use crate::ui::theme::theme;

/// Actions that can be returned from the settings view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    /// Persist the edited settings.
    Apply(Settings),
    /// Discard the draft.
    Discard,
}

/// The editable settings fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Notifications,
    OnlyWhenInactive,
    TimeoutMs,
    Audio,
    AudioVolume,
    MaxSessionBuilds,
}

impl Field {
    const ALL: [Field; 6] = [
        Self::Notifications,
        Self::OnlyWhenInactive,
        Self::TimeoutMs,
        Self::Audio,
        Self::AudioVolume,
        Self::MaxSessionBuilds,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Notifications => "Build notifications",
            Self::OnlyWhenInactive => "Notify only when window inactive",
            Self::TimeoutMs => "Notification timeout (ms)",
            Self::Audio => "Notification sounds",
            Self::AudioVolume => "Sound volume",
            Self::MaxSessionBuilds => "Builds kept per session",
        }
    }
}

/// The settings editor.
pub struct SettingsView {
    visible: bool,
    draft: Settings,
    selected: usize,
}

impl SettingsView {
    /// Create the view, hidden, with a default draft.
    pub fn new() -> Self {
        Self {
            visible: false,
            draft: Settings::default(),
            selected: 0,
        }
    }

    /// Open the editor over a copy of the current settings.
    pub fn show(&mut self, current: &Settings) {
        self.visible = true;
        self.draft = current.clone();
        self.selected = 0;
    }

    /// Close the editor.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the editor is open.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Handle keyboard input while the editor is open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<SettingsAction> {
        if !self.visible {
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, KeyModifiers::NONE) | (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.hide();
                Some(SettingsAction::Discard)
            }
            (KeyCode::Enter, KeyModifiers::NONE) => {
                self.hide();
                Some(SettingsAction::Apply(self.draft.clone()))
            }

            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, KeyModifiers::NONE) => {
                self.selected = (self.selected + 1) % Field::ALL.len();
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, KeyModifiers::NONE) => {
                self.selected = self.selected.checked_sub(1).unwrap_or(Field::ALL.len() - 1);
                None
            }

            (KeyCode::Char(' '), KeyModifiers::NONE)
            | (KeyCode::Char('l'), KeyModifiers::NONE)
            | (KeyCode::Right, KeyModifiers::NONE)
            | (KeyCode::Char('+'), KeyModifiers::NONE) => {
                self.change_selected(1);
                None
            }
            (KeyCode::Char('h'), KeyModifiers::NONE)
            | (KeyCode::Left, KeyModifiers::NONE)
            | (KeyCode::Char('-'), KeyModifiers::NONE) => {
                self.change_selected(-1);
                None
            }

            _ => None,
        }
    }

    /// Change the selected field: booleans toggle, numeric fields step in
    /// the given direction, always inside their validated bounds so the
    /// draft stays applyable.
    fn change_selected(&mut self, direction: i64) {
        match Field::ALL[self.selected] {
            Field::Notifications => self.draft.notify_enabled = !self.draft.notify_enabled,
            Field::OnlyWhenInactive => {
                self.draft.notify_only_when_inactive = !self.draft.notify_only_when_inactive
            }
            Field::Audio => self.draft.audio_enabled = !self.draft.audio_enabled,
            Field::TimeoutMs => {
                self.draft.notification_timeout_ms = step(
                    self.draft.notification_timeout_ms as i64,
                    direction * 500,
                    *Settings::TIMEOUT_RANGE.start() as i64,
                    *Settings::TIMEOUT_RANGE.end() as i64,
                ) as u32;
            }
            Field::AudioVolume => {
                self.draft.audio_volume =
                    step(self.draft.audio_volume as i64, direction * 5, 0, Settings::VOLUME_MAX as i64)
                        as u8;
            }
            Field::MaxSessionBuilds => {
                self.draft.max_session_builds = step(
                    self.draft.max_session_builds as i64,
                    direction * 5,
                    *Settings::HISTORY_RANGE.start() as i64,
                    *Settings::HISTORY_RANGE.end() as i64,
                ) as usize;
            }
        }
    }

    fn value_text(&self, field: Field) -> String {
        match field {
            Field::Notifications => on_off(self.draft.notify_enabled),
            Field::OnlyWhenInactive => on_off(self.draft.notify_only_when_inactive),
            Field::TimeoutMs => self.draft.notification_timeout_ms.to_string(),
            Field::Audio => on_off(self.draft.audio_enabled),
            Field::AudioVolume => format!("{}%", self.draft.audio_volume),
            Field::MaxSessionBuilds => self.draft.max_session_builds.to_string(),
        }
    }

    /// Render the editor as a centered overlay.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let t = theme();

        let overlay_width = 52.min(area.width);
        let overlay_height = (Field::ALL.len() as u16 + 4).min(area.height);
        let overlay = Rect::new(
            area.x + (area.width - overlay_width) / 2,
            area.y + (area.height - overlay_height) / 2,
            overlay_width,
            overlay_height,
        );

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .title(" Settings ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.accent));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(inner);

        let mut lines = Vec::with_capacity(Field::ALL.len());
        for (i, field) in Field::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let marker = if selected { "» " } else { "  " };
            let label_style = if selected {
                Style::default().fg(t.highlight).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(t.fg)
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(t.highlight)),
                Span::styled(format!("{:<34}", field.label()), label_style),
                Span::styled(self.value_text(*field), Style::default().fg(t.accent)),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        let hints = Line::from(vec![
            Span::styled("Space/←/→", Style::default().fg(t.success)),
            Span::styled(": change  ", Style::default().fg(t.dim)),
            Span::styled("Enter", Style::default().fg(t.success)),
            Span::styled(": apply  ", Style::default().fg(t.dim)),
            Span::styled("Esc", Style::default().fg(t.success)),
            Span::styled(": discard", Style::default().fg(t.dim)),
        ]);
        frame.render_widget(
            Paragraph::new(hints).alignment(Alignment::Center),
            chunks[1],
        );
    }
}

impl Default for SettingsView {
    fn default() -> Self {
        Self::new()
    }
}

fn on_off(value: bool) -> String {
    if value { "on" } else { "off" }.to_string()
}

fn step(value: i64, delta: i64, min: i64, max: i64) -> i64 {
    (value + delta).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_show_copies_current_settings() {
        let mut view = SettingsView::new();
        let mut settings = Settings::default();
        settings.notify_enabled = false;

        view.show(&settings);
        assert!(view.is_visible());
        assert_eq!(view.draft, settings);
    }

    #[test]
    fn test_apply_returns_edited_draft() {
        let mut view = SettingsView::new();
        view.show(&Settings::default());

        // Toggle the first field, then apply.
        view.handle_input(key(KeyCode::Char(' ')));
        let action = view.handle_input(key(KeyCode::Enter));

        match action {
            Some(SettingsAction::Apply(settings)) => {
                assert_eq!(settings.notify_enabled, !Settings::default().notify_enabled);
                assert!(settings.validate().is_ok());
            }
            other => panic!("expected Apply, got {:?}", other),
        }
        assert!(!view.is_visible());
    }

    #[test]
    fn test_discard_leaves_caller_settings_untouched() {
        let mut view = SettingsView::new();
        let original = Settings::default();
        view.show(&original);

        view.handle_input(key(KeyCode::Char(' ')));
        let action = view.handle_input(key(KeyCode::Esc));

        assert_eq!(action, Some(SettingsAction::Discard));
        assert!(!view.is_visible());
        // The draft was a copy; the caller's settings never changed.
        assert_eq!(original, Settings::default());
    }

    #[test]
    fn test_selection_wraps() {
        let mut view = SettingsView::new();
        view.show(&Settings::default());

        view.handle_input(key(KeyCode::Char('k')));
        assert_eq!(view.selected, Field::ALL.len() - 1);
        view.handle_input(key(KeyCode::Char('j')));
        assert_eq!(view.selected, 0);
    }

    #[test]
    fn test_numeric_fields_stay_in_bounds() {
        let mut view = SettingsView::new();
        view.show(&Settings::default());

        // Select the timeout field and push past both ends.
        view.selected = 2;
        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('+')));
        }
        assert_eq!(
            view.draft.notification_timeout_ms,
            *Settings::TIMEOUT_RANGE.end()
        );
        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('-')));
        }
        assert_eq!(
            view.draft.notification_timeout_ms,
            *Settings::TIMEOUT_RANGE.start()
        );
        assert!(view.draft.validate().is_ok());
    }

    #[test]
    fn test_input_ignored_while_hidden() {
        let mut view = SettingsView::new();
        assert!(view.handle_input(key(KeyCode::Enter)).is_none());
    }
}
