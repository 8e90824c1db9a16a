//! Host plugin lifecycle seam.
//!
//! The host application drives plugins through a small set of lifecycle
//! callbacks: `initialize` once at startup, `after_initialize` once every
//! plugin has initialized, and `shutdown` when the host goes down.
//! [`BuildTrayPlugin`] is this crate's implementation: it owns the settings,
//! the outcome icon set, and the session tracker, and decides when a
//! finished build should be surfaced to the user.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::builds::{BuildEvent, BuildRecord, SessionTracker};
use crate::config::{Config, ConfigError, Settings};
use crate::ui::icons::{IconSetError, OutcomeIcons};

/// How the plugin wants shutdown to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownFlag {
    /// Shutdown may complete immediately.
    Synchronous,
    /// The host must wait for the plugin to finish asynchronous work.
    Asynchronous,
}

/// Errors raised by plugin lifecycle callbacks.
#[derive(Debug, Error)]
pub enum PluginError {
    /// `initialize` ran twice.
    #[error("plugin already initialized")]
    AlreadyInitialized,

    /// Configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The outcome icon set is incomplete or malformed.
    #[error(transparent)]
    Icons(#[from] IconSetError),
}

/// Lifecycle callbacks invoked by the host.
pub trait HostPlugin {
    /// Called once at startup, before any other callback, with the host's
    /// plugin arguments.
    fn initialize(&mut self, arguments: &[String]) -> Result<(), PluginError>;

    /// Called after every plugin's `initialize` has run. Build events may
    /// arrive from this point on.
    fn after_initialize(&mut self);

    /// Called when the host is going down.
    fn shutdown(&mut self) -> ShutdownFlag;
}

/// The build monitor plugin.
pub struct BuildTrayPlugin {
    config: Config,
    icons: OutcomeIcons,
    tracker: SessionTracker,
    initialized: bool,
    /// Build events are honored only between `after_initialize` and
    /// `shutdown`.
    live: bool,
    /// Notifications suppressed for this session via plugin arguments.
    muted: bool,
}

impl BuildTrayPlugin {
    /// Create the plugin in its pre-`initialize` state.
    pub fn new() -> Self {
        let settings = Settings::default();
        Self {
            tracker: SessionTracker::new(settings.max_session_builds),
            config: Config {
                settings,
            },
            icons: OutcomeIcons::standard(),
            initialized: false,
            live: false,
            muted: false,
        }
    }

    /// The active settings.
    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }

    /// The outcome icon set.
    pub fn icons(&self) -> &OutcomeIcons {
        &self.icons
    }

    /// The finished builds of this session, oldest first.
    pub fn records(&self) -> &[BuildRecord] {
        self.tracker.records()
    }

    /// The most recently finished build.
    pub fn last_record(&self) -> Option<&BuildRecord> {
        self.tracker.last_record()
    }

    /// Whether any build is currently in flight.
    pub fn is_building(&self) -> bool {
        self.tracker.is_building()
    }

    /// Apply and persist edited settings.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range values, or an IO error
    /// from persisting; the previous settings stay active on failure.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), PluginError> {
        settings.validate()?;

        let mut config = self.config.clone();
        config.settings = settings;
        config.save()?;

        self.tracker.set_capacity(config.settings.max_session_builds);
        self.config = config;
        info!("settings applied");
        Ok(())
    }

    /// Feed one host build event.
    ///
    /// Returns the finished record when a user-facing notification should be
    /// raised: the build completed, notifications are enabled and not muted,
    /// and the window-activity gate passes.
    pub fn on_build_event(
        &mut self,
        event: BuildEvent,
        host_active: bool,
    ) -> Option<BuildRecord> {
        if !self.live {
            warn!("build event before extension initialization, dropping");
            return None;
        }

        let record = self.tracker.on_event(event)?.clone();

        let settings = &self.config.settings;
        if self.muted || !settings.notify_enabled {
            return None;
        }
        if settings.notify_only_when_inactive && host_active {
            debug!("host window active, suppressing notification");
            return None;
        }

        Some(record)
    }
}

impl Default for BuildTrayPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPlugin for BuildTrayPlugin {
    fn initialize(&mut self, arguments: &[String]) -> Result<(), PluginError> {
        if self.initialized {
            return Err(PluginError::AlreadyInitialized);
        }

        self.muted = arguments.iter().any(|a| a == "--quiet");

        self.config = Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load config, using defaults");
            Config::default()
        });
        self.icons.validate()?;
        self.tracker = SessionTracker::new(self.config.settings.max_session_builds);

        self.initialized = true;
        info!(muted = self.muted, "plugin initialized");
        Ok(())
    }

    fn after_initialize(&mut self) {
        debug!("extensions initialized, accepting build events");
        self.live = true;
    }

    fn shutdown(&mut self) -> ShutdownFlag {
        info!(
            session_builds = self.tracker.len(),
            "plugin shutting down"
        );
        self.live = false;
        ShutdownFlag::Synchronous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builds::BuildOutcome;

    fn live_plugin() -> BuildTrayPlugin {
        // Bypasses Config::load so tests do not touch the real config dir.
        let mut plugin = BuildTrayPlugin::new();
        plugin.initialized = true;
        plugin.live = true;
        plugin
    }

    fn started(project: &str, at_ms: i64) -> BuildEvent {
        BuildEvent::Started {
            project: project.to_string(),
            at_ms,
        }
    }

    fn finished(project: &str, at_ms: i64, outcome: BuildOutcome) -> BuildEvent {
        BuildEvent::Finished {
            project: project.to_string(),
            at_ms,
            outcome,
        }
    }

    #[test]
    fn test_events_before_after_initialize_are_dropped() {
        let mut plugin = BuildTrayPlugin::new();
        plugin.on_build_event(started("core", 0), false);
        plugin.on_build_event(finished("core", 1_000, BuildOutcome::Success), false);
        assert!(plugin.records().is_empty());
    }

    #[test]
    fn test_finished_build_is_recorded_and_notified() {
        let mut plugin = live_plugin();
        assert!(plugin.on_build_event(started("core", 0), false).is_none());
        assert!(plugin.is_building());

        let record = plugin
            .on_build_event(finished("core", 2_000, BuildOutcome::Failure), false)
            .unwrap();
        assert_eq!(record.project(), "core");
        assert_eq!(plugin.records().len(), 1);
        assert!(!plugin.is_building());
    }

    #[test]
    fn test_active_window_suppresses_notification_but_records() {
        let mut plugin = live_plugin();
        plugin.on_build_event(started("core", 0), true);
        let notice = plugin.on_build_event(finished("core", 1_000, BuildOutcome::Success), true);
        assert!(notice.is_none());
        assert_eq!(plugin.records().len(), 1);
    }

    #[test]
    fn test_disabled_notifications_still_record() {
        let mut plugin = live_plugin();
        plugin.config.settings.notify_enabled = false;
        plugin.on_build_event(started("core", 0), false);
        let notice = plugin.on_build_event(finished("core", 1_000, BuildOutcome::Success), false);
        assert!(notice.is_none());
        assert_eq!(plugin.records().len(), 1);
    }

    #[test]
    fn test_muted_session_suppresses_notifications() {
        let mut plugin = live_plugin();
        plugin.muted = true;
        plugin.on_build_event(started("core", 0), false);
        let notice = plugin.on_build_event(finished("core", 1_000, BuildOutcome::Success), false);
        assert!(notice.is_none());
        assert_eq!(plugin.records().len(), 1);
    }

    #[test]
    fn test_double_initialize_rejected() {
        let mut plugin = BuildTrayPlugin::new();
        plugin.initialized = true;
        let err = plugin.initialize(&[]).unwrap_err();
        assert!(matches!(err, PluginError::AlreadyInitialized));
    }

    #[test]
    fn test_shutdown_is_synchronous_and_stops_events() {
        let mut plugin = live_plugin();
        assert_eq!(plugin.shutdown(), ShutdownFlag::Synchronous);
        plugin.on_build_event(started("core", 0), false);
        assert!(!plugin.is_building());
    }
}
