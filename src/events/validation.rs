// Copyright (c) 2025 - Cowboy AI, Inc.
//! Advisory Event Log Validation
//!
//! Historical logs can contain anomalies: timestamps recorded out of order
//! by concurrent submitters, duplicated event ids from retried writers,
//! version gaps from partial exports. Replay tolerates all of them and
//! processes the log deterministically; this module only reports them so
//! operators can inspect suspect logs. Validation never halts replay.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::event_store::StoredEvent;

/// A single anomaly found while scanning an event log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogAnomaly {
    /// An event's timestamp is earlier than its predecessor's
    TimestampRegression {
        /// Version of the regressing event
        version: u64,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    /// Two events in the log share an event id
    DuplicateEventId {
        event_id: Uuid,
        first_version: u64,
        duplicate_version: u64,
    },

    /// Versions are not contiguous
    VersionGap { expected: u64, found: u64 },
}

impl fmt::Display for LogAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogAnomaly::TimestampRegression {
                version,
                previous,
                current,
            } => write!(
                f,
                "timestamp regression at version {version}: {current} after {previous}"
            ),
            LogAnomaly::DuplicateEventId {
                event_id,
                first_version,
                duplicate_version,
            } => write!(
                f,
                "event id {event_id} at version {duplicate_version} duplicates version {first_version}"
            ),
            LogAnomaly::VersionGap { expected, found } => {
                write!(f, "version gap: expected {expected}, found {found}")
            }
        }
    }
}

/// Scan an event log (ascending by version) for anomalies
///
/// Checks, in order of appearance:
/// - strictly non-decreasing timestamps;
/// - globally unique event ids;
/// - contiguous versions.
///
/// Returns every violation found. An empty result means the log is clean.
pub fn validate_event_log(events: &[StoredEvent]) -> Vec<LogAnomaly> {
    let mut anomalies = Vec::new();
    let mut seen_ids: HashMap<Uuid, u64> = HashMap::new();
    let mut previous: Option<&StoredEvent> = None;

    for stored in events {
        if let Some(prev) = previous {
            if stored.event.timestamp < prev.event.timestamp {
                anomalies.push(LogAnomaly::TimestampRegression {
                    version: stored.version,
                    previous: prev.event.timestamp,
                    current: stored.event.timestamp,
                });
            }
            if stored.version != prev.version + 1 {
                anomalies.push(LogAnomaly::VersionGap {
                    expected: prev.version + 1,
                    found: stored.version,
                });
            }
        }

        match seen_ids.get(&stored.event.event_id) {
            Some(&first_version) => anomalies.push(LogAnomaly::DuplicateEventId {
                event_id: stored.event.event_id,
                first_version,
                duplicate_version: stored.version,
            }),
            None => {
                seen_ids.insert(stored.event.event_id, stored.version);
            }
        }

        previous = Some(stored);
    }

    anomalies
}
