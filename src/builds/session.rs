//! Session build tracking.
//!
//! Pairs the host's build-started / build-finished events into immutable
//! [`BuildRecord`]s, keeping at most a configured number of records for the
//! session.

use tracing::{debug, warn};

use super::{BuildOutcome, BuildRecord};

/// A build notification from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// A build started.
    Started { project: String, at_ms: i64 },
    /// A build finished with the given outcome.
    Finished {
        project: String,
        at_ms: i64,
        outcome: BuildOutcome,
    },
}

/// Tracks the builds of the current session.
///
/// The host guarantees start/finish pairing; events that violate it (a finish
/// with no matching start, or a finish earlier than its start) are logged and
/// skipped rather than turned into garbled records.
#[derive(Debug)]
pub struct SessionTracker {
    /// Builds currently in flight: project name and start instant.
    active: Vec<(String, i64)>,
    /// Finished builds, oldest first, capped at `capacity`.
    records: Vec<BuildRecord>,
    capacity: usize,
}

impl SessionTracker {
    /// Create a tracker keeping at most `capacity` finished builds.
    pub fn new(capacity: usize) -> Self {
        Self {
            active: Vec::new(),
            records: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Change the record cap, dropping the oldest records if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.trim();
    }

    /// The finished builds of this session, oldest first.
    pub fn records(&self) -> &[BuildRecord] {
        &self.records
    }

    /// The most recently finished build, if any.
    pub fn last_record(&self) -> Option<&BuildRecord> {
        self.records.last()
    }

    /// Whether any build is currently in flight.
    pub fn is_building(&self) -> bool {
        !self.active.is_empty()
    }

    /// Number of finished builds recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no builds have finished yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feed one host build event.
    ///
    /// Returns the newly finished record when the event completed a build.
    pub fn on_event(&mut self, event: BuildEvent) -> Option<&BuildRecord> {
        match event {
            BuildEvent::Started { project, at_ms } => {
                if let Some(entry) = self.active.iter_mut().find(|(p, _)| *p == project) {
                    warn!(project = %project, "build started while already in flight, restarting");
                    entry.1 = at_ms;
                } else {
                    debug!(project = %project, "build started");
                    self.active.push((project, at_ms));
                }
                None
            }
            BuildEvent::Finished {
                project,
                at_ms,
                outcome,
            } => {
                let Some(pos) = self.active.iter().position(|(p, _)| *p == project) else {
                    warn!(project = %project, "build finished with no matching start, skipping");
                    return None;
                };
                let (project, started_ms) = self.active.remove(pos);

                match BuildRecord::new(project, started_ms, at_ms, outcome) {
                    Ok(record) => {
                        debug!(
                            project = %record.project(),
                            outcome = record.outcome().label(),
                            elapsed_ms = record.elapsed_ms(),
                            "build finished"
                        );
                        self.records.push(record);
                        self.trim();
                        self.records.last()
                    }
                    Err(e) => {
                        warn!(error = %e, "discarding garbled build event");
                        None
                    }
                }
            }
        }
    }

    fn trim(&mut self) {
        while self.records.len() > self.capacity {
            self.records.remove(0);
        }
    }
}
