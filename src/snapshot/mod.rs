// Copyright (c) 2025 - Cowboy AI, Inc.
//! Snapshot Policy and Compaction
//!
//! Replay cost grows with log length, so the engine periodically compacts:
//! it replays unsnapshotted events atop the last snapshot and persists the
//! result as a new checkpoint. Reads then start from the checkpoint instead
//! of the beginning of the log.
//!
//! # Invariant
//!
//! A snapshot at version V equals `replay(all events with version ≤ V)`
//! exactly. Compaction therefore never changes what a read observes, only
//! how much of the log the read has to fold.
//!
//! # Failure Semantics
//!
//! Compaction is a non-critical optimization. Every failure in
//! [`SnapshotPolicy::check_and_create`] is caught and logged; nothing
//! propagates to the mutation path that triggered it. Correctness of reads
//! never depends on a snapshot having succeeded, only on the raw log.
//!
//! # Races
//!
//! Two callers may both decide "needs snapshot" and compact concurrently.
//! Both results satisfy the snapshot invariant, so no locking is required;
//! the later write covers a superset or equal range of the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::aggregate::{replay, WorkspaceState};
use crate::errors::WorkspaceResult;
use crate::event_store::{EventStore, SnapshotStore};

/// A persisted compaction checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Highest event version this snapshot covers
    pub version: u64,

    /// State equal to replaying all events up to and including `version`
    pub state: WorkspaceState,

    /// Cumulative number of events covered since the log began
    pub event_count: u64,

    /// When the snapshot was taken
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Compaction tuning
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Events since the last snapshot before compaction triggers
    pub events_per_snapshot: u64,

    /// Page size for bounded event fetches during compaction
    pub page_size: usize,

    /// How many snapshots to retain per workspace
    pub retain: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            events_per_snapshot: 50,
            page_size: 500,
            retain: 3,
        }
    }
}

/// Result of a compaction check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotStatus {
    /// Whether the threshold has been crossed
    pub needs_snapshot: bool,

    /// Current highest event version (0 if the log is empty)
    pub current_version: u64,

    /// Version of the latest snapshot (0 if none exists)
    pub last_snapshot_version: u64,

    /// Events appended since the latest snapshot
    pub events_since_snapshot: u64,
}

/// Decides when to compact a workspace log and performs the compaction
#[derive(Clone)]
pub struct SnapshotPolicy {
    events: Arc<dyn EventStore>,
    snapshots: Arc<dyn SnapshotStore>,
    config: SnapshotConfig,
}

impl SnapshotPolicy {
    /// Create a policy over the given stores with default tuning
    pub fn new(events: Arc<dyn EventStore>, snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self::with_config(events, snapshots, SnapshotConfig::default())
    }

    /// Create a policy with explicit tuning
    pub fn with_config(
        events: Arc<dyn EventStore>,
        snapshots: Arc<dyn SnapshotStore>,
        config: SnapshotConfig,
    ) -> Self {
        Self {
            events,
            snapshots,
            config,
        }
    }

    /// Compute whether the workspace has crossed the compaction threshold
    pub async fn needs_snapshot(&self, workspace_id: Uuid) -> WorkspaceResult<SnapshotStatus> {
        let current_version = self
            .events
            .get_version(workspace_id)
            .await?
            .unwrap_or(0);
        let last_snapshot_version = self
            .snapshots
            .latest_snapshot(workspace_id)
            .await?
            .map(|snapshot| snapshot.version)
            .unwrap_or(0);

        let events_since_snapshot = current_version.saturating_sub(last_snapshot_version);

        Ok(SnapshotStatus {
            needs_snapshot: events_since_snapshot >= self.config.events_per_snapshot,
            current_version,
            last_snapshot_version,
            events_since_snapshot,
        })
    }

    /// Compact the workspace log into a new snapshot
    ///
    /// Replays events newer than the latest snapshot, in bounded pages,
    /// atop its state, then persists the result keyed by the highest
    /// version seen and prunes old snapshots. When no new events exist the
    /// call is an idempotent no-op returning the baseline version without
    /// writing a duplicate snapshot.
    ///
    /// # Returns
    ///
    /// The version the latest snapshot now covers.
    pub async fn create_snapshot(&self, workspace_id: Uuid) -> WorkspaceResult<u64> {
        let baseline = self.snapshots.latest_snapshot(workspace_id).await?;
        let (mut state, mut cursor, baseline_count) = match baseline {
            Some(snapshot) => (snapshot.state, snapshot.version, snapshot.event_count),
            None => (WorkspaceState::empty(workspace_id), 0, 0),
        };
        let baseline_version = cursor;

        let mut new_events: u64 = 0;
        loop {
            let page = self
                .events
                .list_events_after(workspace_id, cursor, self.config.page_size)
                .await?;
            if page.is_empty() {
                break;
            }
            if let Some(last) = page.last() {
                cursor = last.version;
            }
            new_events += page.len() as u64;
            state = replay(state, page.iter().map(|stored| &stored.event));
            if page.len() < self.config.page_size {
                break;
            }
        }

        if new_events == 0 {
            return Ok(baseline_version);
        }

        self.snapshots
            .put_snapshot(
                workspace_id,
                Snapshot {
                    version: cursor,
                    state,
                    event_count: baseline_count + new_events,
                    created_at: Utc::now(),
                },
            )
            .await?;

        let pruned = self
            .snapshots
            .prune_snapshots(workspace_id, self.config.retain)
            .await?;
        debug!(
            %workspace_id,
            version = cursor,
            events_compacted = new_events,
            pruned,
            "workspace log compacted"
        );

        Ok(cursor)
    }

    /// Fire-and-forget compaction trigger, called after every append
    ///
    /// Never returns an error to the caller: check and creation failures
    /// are logged and swallowed. The next qualifying append retries.
    pub async fn check_and_create(&self, workspace_id: Uuid) {
        let status = match self.needs_snapshot(workspace_id).await {
            Ok(status) => status,
            Err(err) => {
                warn!(%workspace_id, error = %err, "snapshot threshold check failed");
                return;
            }
        };

        if !status.needs_snapshot {
            return;
        }

        if let Err(err) = self.create_snapshot(workspace_id).await {
            warn!(
                %workspace_id,
                error = %err,
                "snapshot creation failed; reads fall back to the raw event log"
            );
        }
    }
}
