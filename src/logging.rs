//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily-rotating file rather than stdout, which the TUI owns.
//! The level is configurable through the `RUST_LOG` environment variable,
//! e.g. `RUST_LOG=buildtray=debug`.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "buildtray=info,warn";

/// Initialize the logging system.
///
/// Sets up a daily rotating file appender in the platform local data
/// directory (`<data dir>/buildtray/logs/`) with file/line context.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// if a global subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let log_dir = log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "buildtray.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "buildtray starting up");
    tracing::debug!(log_dir = %log_dir.display(), "log directory");

    Ok(())
}

/// The directory log files are written to.
fn log_directory() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine the local data directory"))?;
    Ok(base.join("buildtray").join("logs"))
}

/// Log a clean shutdown. Call once before the process exits.
pub fn shutdown() {
    tracing::info!("buildtray shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_shape() {
        let dir = log_directory().unwrap();
        assert!(dir.ends_with("buildtray/logs"));
    }
}
