//! Centralized error types for buildtray.

use thiserror::Error;

use crate::config::ConfigError;
use crate::host::PluginError;
use crate::ui::SessionBuildsError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Plugin lifecycle errors.
    #[error("{0}")]
    Plugin(#[from] PluginError),

    /// Errors building the session-builds dialog.
    #[error("{0}")]
    SessionBuilds(#[from] SessionBuildsError),

    /// IO errors (terminal, file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// A message suitable for showing to users in the UI.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(ConfigError::NoConfigDir) => {
                "Could not find the configuration directory".to_string()
            }
            AppError::Config(ConfigError::Validation(msg)) => format!("Invalid setting: {}", msg),
            AppError::Config(_) => "Could not read or write the configuration".to_string(),
            AppError::Plugin(e) => e.to_string(),
            AppError::SessionBuilds(e) => e.to_string(),
            AppError::Io(_) => "A terminal or file error occurred".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation_message() {
        let err = AppError::Config(ConfigError::Validation("volume 200 is above 100".into()));
        assert_eq!(err.user_message(), "Invalid setting: volume 200 is above 100");
    }

    #[test]
    fn test_io_message_is_generic() {
        let err = AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(err.user_message(), "A terminal or file error occurred");
    }
}
