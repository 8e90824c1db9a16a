//! Plugin settings.

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// User-configurable behavior of the build monitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Whether finished builds raise a notification.
    pub notify_enabled: bool,
    /// Only notify while the host window is inactive.
    pub notify_only_when_inactive: bool,
    /// How long a notification stays on screen, in milliseconds.
    pub notification_timeout_ms: u32,
    /// Whether finished builds play a sound (playback is the host's job).
    pub audio_enabled: bool,
    /// Sound volume, 0–100.
    pub audio_volume: u8,
    /// How many finished builds to keep per session.
    pub max_session_builds: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notify_enabled: true,
            notify_only_when_inactive: true,
            notification_timeout_ms: 5_000,
            audio_enabled: true,
            audio_volume: 50,
            max_session_builds: 30,
        }
    }
}

impl Settings {
    /// Allowed notification timeout, in milliseconds.
    pub const TIMEOUT_RANGE: RangeInclusive<u32> = 1_000..=30_000;
    /// Maximum sound volume.
    pub const VOLUME_MAX: u8 = 100;
    /// Allowed session-history cap.
    pub const HISTORY_RANGE: RangeInclusive<usize> = 1..=500;

    /// Validate every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::Validation` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !Self::TIMEOUT_RANGE.contains(&self.notification_timeout_ms) {
            return Err(ConfigError::Validation(format!(
                "notification timeout {} ms is outside {}..={} ms",
                self.notification_timeout_ms,
                Self::TIMEOUT_RANGE.start(),
                Self::TIMEOUT_RANGE.end()
            )));
        }

        if self.audio_volume > Self::VOLUME_MAX {
            return Err(ConfigError::Validation(format!(
                "sound volume {} is above {}",
                self.audio_volume,
                Self::VOLUME_MAX
            )));
        }

        if !Self::HISTORY_RANGE.contains(&self.max_session_builds) {
            return Err(ConfigError::Validation(format!(
                "session history cap {} is outside {}..={}",
                self.max_session_builds,
                Self::HISTORY_RANGE.start(),
                Self::HISTORY_RANGE.end()
            )));
        }

        Ok(())
    }

    /// The notification timeout as a `Duration`.
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.notification_timeout_ms))
    }
}
