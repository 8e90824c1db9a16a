//! Configuration management for buildtray.
//!
//! Settings load from and save to a TOML file in the platform config
//! directory. A missing file yields the defaults; invalid values are
//! rejected on both load and save.

mod settings;

pub use settings::Settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors raised by configuration handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// Filesystem error while reading or writing the config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for the expected schema.
    #[error("invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("could not serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A setting is outside its allowed range.
    #[error("invalid setting: {0}")]
    Validation(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The persisted configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// The plugin settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file()?)
    }

    /// Load the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.settings.validate()?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Save the configuration to the default location, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file()?)
    }

    /// Save the configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.settings.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// The default config file path:
    /// `<platform config dir>/buildtray/config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("buildtray").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.notify_enabled = false;
        config.settings.notification_timeout_ms = 2_500;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_rejects_invalid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.settings.audio_volume = 200;
        let err = config.save_to(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_rejects_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\nnotification_timeout_ms = 50\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not toml at all [[[").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_file_path_shape() {
        let path = Config::config_file().unwrap();
        assert!(path.ends_with("buildtray/config.toml"));
    }
}
