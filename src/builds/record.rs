//! Build record types and display formatting.

use chrono::{Local, LocalResult, TimeZone};
use thiserror::Error;

/// Outcome of a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildOutcome {
    /// The build completed successfully.
    Success,
    /// The build completed with errors.
    Failure,
    /// The build was canceled before it finished.
    Canceled,
}

impl BuildOutcome {
    /// Every outcome, in display order.
    ///
    /// Used to check outcome→icon mappings for completeness.
    pub const ALL: [BuildOutcome; 3] = [Self::Success, Self::Failure, Self::Canceled];

    /// Short verb used in the status line and notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "succeeded",
            Self::Failure => "failed",
            Self::Canceled => "canceled",
        }
    }
}

/// Errors produced when constructing a build record.
#[derive(Debug, Error)]
pub enum BuildRecordError {
    /// The finish timestamp is earlier than the start timestamp.
    #[error(
        "build of '{project}' finishes before it starts ({finished_ms} ms < {started_ms} ms)"
    )]
    FinishBeforeStart {
        project: String,
        started_ms: i64,
        finished_ms: i64,
    },
}

/// One historical build: project name, start/finish instants, and outcome.
///
/// Timestamps are milliseconds since the Unix epoch, as reported by the host.
/// Records are immutable once constructed, and construction guarantees
/// `finished_ms >= started_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    project: String,
    started_ms: i64,
    finished_ms: i64,
    outcome: BuildOutcome,
}

impl BuildRecord {
    /// Create a new build record.
    ///
    /// # Errors
    ///
    /// Returns `BuildRecordError::FinishBeforeStart` if the finish timestamp
    /// precedes the start timestamp.
    pub fn new(
        project: impl Into<String>,
        started_ms: i64,
        finished_ms: i64,
        outcome: BuildOutcome,
    ) -> Result<Self, BuildRecordError> {
        let project = project.into();
        if finished_ms < started_ms {
            return Err(BuildRecordError::FinishBeforeStart {
                project,
                started_ms,
                finished_ms,
            });
        }
        Ok(Self {
            project,
            started_ms,
            finished_ms,
            outcome,
        })
    }

    /// The project that was built.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Build start, in milliseconds since the Unix epoch.
    pub fn started_ms(&self) -> i64 {
        self.started_ms
    }

    /// Build finish, in milliseconds since the Unix epoch.
    pub fn finished_ms(&self) -> i64 {
        self.finished_ms
    }

    /// The build's outcome.
    pub fn outcome(&self) -> BuildOutcome {
        self.outcome
    }

    /// Elapsed build time in milliseconds. Never negative.
    pub fn elapsed_ms(&self) -> i64 {
        self.finished_ms - self.started_ms
    }
}

/// Format a millisecond Unix timestamp as `dd-MM-yyyy HH:mm:ss` in local time.
///
/// Timestamps outside chrono's representable range render as `"invalid time"`
/// rather than panicking.
pub fn format_timestamp(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
            dt.format("%d-%m-%Y %H:%M:%S").to_string()
        }
        LocalResult::None => "invalid time".to_string(),
    }
}

/// Format a millisecond duration as zero-padded `HH:MM:SS`.
///
/// Hours do not wrap at 24. Negative input clamps to zero; callers that care
/// reject negative durations before formatting.
pub fn format_duration(ms: i64) -> String {
    let total_secs = ms.max(0) / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
