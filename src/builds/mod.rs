//! Build session data model.
//!
//! This module holds the immutable build records supplied by the host,
//! their display formatting, and the session tracker that turns raw host
//! build events into records.

mod record;
mod session;

pub use record::{format_duration, format_timestamp, BuildOutcome, BuildRecord};
pub use session::{BuildEvent, SessionTracker};
