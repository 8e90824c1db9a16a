//! Main application state and event loop.
//!
//! The Elm Architecture pattern: every event flows through [`App::update`],
//! and [`App::render`] draws the whole frame from the current state. The
//! status screen is the tray analogue — it shows whether a build is in
//! flight and the last outcome — while the session-builds dialog and the
//! settings editor open as modal overlays on top of it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::builds::format_duration;
use crate::error::AppError;
use crate::events::Event;
use crate::host::{BuildTrayPlugin, HostPlugin, ShutdownFlag};
use crate::ui::theme::theme;
use crate::ui::{
    Notification, NotificationManager, SessionBuildsAction, SessionBuildsView, SettingsAction,
    SettingsView,
};

/// The current view state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// The tray status screen.
    #[default]
    Status,
    /// The session-builds dialog is open.
    SessionBuilds,
    /// The settings editor is open.
    Settings,
    /// The application is exiting.
    Exiting,
}

/// The main application struct that holds all state.
pub struct App {
    state: AppState,
    should_quit: bool,
    plugin: BuildTrayPlugin,
    /// Built fresh from the session records when opened, discarded on close.
    builds_view: Option<SessionBuildsView>,
    settings_view: SettingsView,
    notifications: NotificationManager,
    /// Whether the host window currently has focus.
    host_active: bool,
}

impl App {
    /// Create the application around an initialized plugin.
    pub fn new(plugin: BuildTrayPlugin) -> Self {
        debug!("creating application");
        Self {
            state: AppState::Status,
            should_quit: false,
            plugin,
            builds_view: None,
            settings_view: SettingsView::new(),
            notifications: NotificationManager::new(),
            host_active: true,
        }
    }

    /// Whether the event loop should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The current view state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Shut the plugin down. Called once after the event loop exits.
    pub fn shutdown(&mut self) -> ShutdownFlag {
        self.plugin.shutdown()
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Tick => {
                self.notifications.tick();
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, "key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "terminal resized");
            }
            Event::Focus(active) => {
                debug!(active, "host focus changed");
                self.host_active = active;
            }
            Event::Build(build_event) => {
                if let Some(record) = self.plugin.on_build_event(build_event, self.host_active) {
                    let timeout = self.plugin.settings().notification_timeout();
                    self.notifications
                        .push(Notification::build_finished(&record, timeout));
                }
            }
        }
    }

    /// Handle an application error by surfacing it as a toast.
    pub fn handle_error(&mut self, error: &AppError) {
        warn!(error = %error, "application error");
        self.notifications
            .push(Notification::error(error.user_message()));
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Quit on Ctrl+C from anywhere.
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        match self.state {
            AppState::Status => match (key.code, key.modifiers) {
                (KeyCode::Char('q'), KeyModifiers::NONE) => self.quit(),
                (KeyCode::Char('b'), KeyModifiers::NONE) => self.open_session_builds(),
                (KeyCode::Char('o'), KeyModifiers::NONE) => self.open_settings(),
                _ => {}
            },
            AppState::SessionBuilds => {
                let action = self
                    .builds_view
                    .as_mut()
                    .and_then(|view| view.handle_input(key));
                if let Some(SessionBuildsAction::Accept) = action {
                    debug!("session builds dialog accepted");
                    self.builds_view = None;
                    self.state = AppState::Status;
                }
            }
            AppState::Settings => {
                if let Some(action) = self.settings_view.handle_input(key) {
                    match action {
                        SettingsAction::Apply(settings) => {
                            match self.plugin.apply_settings(settings) {
                                Ok(()) => self.notifications.push(Notification::success(
                                    "Settings saved",
                                )),
                                Err(e) => {
                                    let error = AppError::from(e);
                                    self.handle_error(&error);
                                }
                            }
                        }
                        SettingsAction::Discard => {
                            debug!("settings edit discarded");
                        }
                    }
                    self.state = AppState::Status;
                }
            }
            AppState::Exiting => {}
        }
    }

    fn quit(&mut self) {
        info!("quit requested");
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Build the session-builds dialog from the current records and open it.
    fn open_session_builds(&mut self) {
        match SessionBuildsView::new(self.plugin.records(), self.plugin.icons()) {
            Ok(mut view) => {
                view.show();
                self.builds_view = Some(view);
                self.state = AppState::SessionBuilds;
            }
            Err(e) => {
                let error = AppError::from(e);
                self.handle_error(&error);
            }
        }
    }

    fn open_settings(&mut self) {
        self.settings_view.show(self.plugin.settings());
        self.state = AppState::Settings;
    }

    /// Render the whole frame.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Min(1),    // status content
                Constraint::Length(1), // key hints
            ])
            .split(area);

        self.render_title(frame, chunks[0]);
        self.render_status(frame, chunks[1]);
        self.render_hints(frame, chunks[2]);

        // Modal overlays.
        if let Some(view) = self.builds_view.as_mut() {
            view.render(frame, area);
        }
        self.settings_view.render(frame, area);

        // Toasts on top of everything.
        self.notifications.render(frame, area);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let title = Paragraph::new("buildtray")
            .style(Style::default().fg(t.accent))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(t.border)),
            );
        frame.render_widget(title, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let mut lines = vec![Line::raw("")];

        if self.plugin.is_building() {
            lines.push(Line::from(Span::styled(
                "● building…",
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "■ idle",
                Style::default().fg(t.muted),
            )));
        }
        lines.push(Line::raw(""));

        match self.plugin.last_record() {
            Some(record) => {
                let icon = self
                    .plugin
                    .icons()
                    .get(record.outcome())
                    .map(|i| i.glyph)
                    .unwrap_or("?");
                lines.push(Line::from(vec![
                    Span::styled("last build: ", Style::default().fg(t.dim)),
                    Span::raw(format!(
                        "{} {} {} in {}",
                        icon,
                        record.project(),
                        record.outcome().label(),
                        format_duration(record.elapsed_ms())
                    )),
                ]));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "no builds yet",
                    Style::default().fg(t.dim),
                )));
            }
        }

        lines.push(Line::from(Span::styled(
            format!("builds this session: {}", self.plugin.records().len()),
            Style::default().fg(t.muted),
        )));

        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let hints = Line::from(vec![
            Span::styled("b", Style::default().fg(t.success)),
            Span::styled(": session builds  ", Style::default().fg(t.dim)),
            Span::styled("o", Style::default().fg(t.success)),
            Span::styled(": settings  ", Style::default().fg(t.dim)),
            Span::styled("q", Style::default().fg(t.success)),
            Span::styled(": quit", Style::default().fg(t.dim)),
        ]);
        frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builds::{BuildEvent, BuildOutcome};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        let mut plugin = BuildTrayPlugin::new();
        plugin.after_initialize();
        App::new(plugin)
    }

    fn finish_build(app: &mut App, project: &str) {
        app.update(Event::Build(BuildEvent::Started {
            project: project.to_string(),
            at_ms: 0,
        }));
        app.update(Event::Build(BuildEvent::Finished {
            project: project.to_string(),
            at_ms: 3_000,
            outcome: BuildOutcome::Success,
        }));
    }

    #[test]
    fn test_quit_on_q() {
        let mut app = app();
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
        assert_eq!(app.state(), AppState::Exiting);
    }

    #[test]
    fn test_quit_on_ctrl_c_from_dialog() {
        let mut app = app();
        app.update(key(KeyCode::Char('b')));
        assert_eq!(app.state(), AppState::SessionBuilds);

        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn test_session_builds_dialog_opens_and_closes() {
        let mut app = app();
        finish_build(&mut app, "core");

        app.update(key(KeyCode::Char('b')));
        assert_eq!(app.state(), AppState::SessionBuilds);
        let view = app.builds_view.as_ref().unwrap();
        assert_eq!(view.row_count(), 1);

        // The dialog's confirmation discards it.
        app.update(key(KeyCode::Enter));
        assert_eq!(app.state(), AppState::Status);
        assert!(app.builds_view.is_none());
    }

    #[test]
    fn test_build_event_records_while_dialog_closed() {
        let mut app = app();
        finish_build(&mut app, "core");
        finish_build(&mut app, "ui");
        assert_eq!(app.plugin.records().len(), 2);
    }

    #[test]
    fn test_unfocused_build_raises_toast() {
        let mut app = app();
        app.update(Event::Focus(false));
        finish_build(&mut app, "core");
        assert_eq!(app.notifications.len(), 1);
    }

    #[test]
    fn test_focused_build_is_silent_by_default() {
        // Default settings notify only while the window is inactive.
        let mut app = app();
        finish_build(&mut app, "core");
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_settings_discard_restores_status() {
        let mut app = app();
        app.update(key(KeyCode::Char('o')));
        assert_eq!(app.state(), AppState::Settings);

        app.update(key(KeyCode::Esc));
        assert_eq!(app.state(), AppState::Status);
        assert!(!app.settings_view.is_visible());
    }

    #[test]
    fn test_status_keys_ignored_in_settings() {
        let mut app = app();
        app.update(key(KeyCode::Char('o')));
        app.update(key(KeyCode::Char('b')));
        assert_eq!(app.state(), AppState::Settings);
        assert!(app.builds_view.is_none());
    }
}
