//! buildtray — a terminal-based build session monitor.
//!
//! Watches build sessions the way an IDE tray plugin would: finished builds
//! are recorded, summarized on a status screen, and surfaced as transient
//! notifications; a modal dialog lists the session's builds in a
//! column-synchronized table.

mod app;
mod builds;
mod config;
mod error;
mod events;
mod host;
mod logging;
mod ui;

use std::io;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::App;
use crate::builds::{BuildEvent, BuildOutcome};
use crate::events::{Event, EventHandler};
use crate::host::{BuildTrayPlugin, HostPlugin};
use crate::ui::theme::{init_theme, Theme};

#[derive(Debug, Parser)]
#[command(name = "buildtray", version, about = "Terminal build session monitor")]
struct Cli {
    /// Suppress build notifications for this session.
    #[arg(long)]
    quiet: bool,

    /// Number of demo builds to seed the session with.
    #[arg(long, default_value_t = 6)]
    demo_builds: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init().context("failed to initialize logging")?;
    init_theme(Theme::dark());

    let mut plugin = BuildTrayPlugin::new();
    let mut arguments = Vec::new();
    if cli.quiet {
        arguments.push("--quiet".to_string());
    }
    plugin.initialize(&arguments)?;
    plugin.after_initialize();

    let mut app = App::new(plugin);
    for event in demo_session(cli.demo_builds) {
        app.update(Event::Build(event));
    }

    let result = run(&mut app);
    app.shutdown();
    logging::shutdown();
    result
}

/// Set up the terminal, run the event loop, and restore the terminal even
/// when the loop errors.
fn run(app: &mut App) -> anyhow::Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    let events = EventHandler::new();
    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;
        app.update(events.next()?);
    }
    Ok(())
}

/// A canned session so the binary is exercisable without a host feeding it
/// build events.
fn demo_session(count: usize) -> Vec<BuildEvent> {
    const PROJECTS: [&str; 4] = ["core", "ui", "codegen", "tests"];
    const OUTCOMES: [BuildOutcome; 6] = [
        BuildOutcome::Success,
        BuildOutcome::Success,
        BuildOutcome::Failure,
        BuildOutcome::Success,
        BuildOutcome::Canceled,
        BuildOutcome::Success,
    ];

    let now = Utc::now().timestamp_millis();
    let mut events = Vec::with_capacity(count * 2);
    for i in 0..count {
        let project = PROJECTS[i % PROJECTS.len()].to_string();
        // Builds spaced ten minutes apart, lasting between one and eight minutes.
        let started = now - ((count - i) as i64) * 600_000;
        let finished = started + 60_000 + (i as i64 % 4) * 140_000;
        events.push(BuildEvent::Started {
            project: project.clone(),
            at_ms: started,
        });
        events.push(BuildEvent::Finished {
            project,
            at_ms: finished,
            outcome: OUTCOMES[i % OUTCOMES.len()],
        });
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_session_pairs_events() {
        let events = demo_session(5);
        assert_eq!(events.len(), 10);
        assert!(matches!(events[0], BuildEvent::Started { .. }));
        assert!(matches!(events[1], BuildEvent::Finished { .. }));
    }

    #[test]
    fn test_demo_session_timestamps_are_ordered() {
        for pair in demo_session(8).chunks(2) {
            let (BuildEvent::Started { at_ms: start, .. }, BuildEvent::Finished { at_ms: end, .. }) =
                (&pair[0], &pair[1])
            else {
                panic!("expected started/finished pair");
            };
            assert!(end > start);
        }
    }

    #[test]
    fn test_demo_session_empty() {
        assert!(demo_session(0).is_empty());
    }
}
