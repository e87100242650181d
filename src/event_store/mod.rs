// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event Store Abstraction
//!
//! This module defines the storage interfaces the workspace engine consumes
//! for persisting and retrieving workspace events and snapshots.
//!
//! # Architecture
//!
//! ```text
//! Mutation → WorkspaceEvent → EventStore → Durable Log
//!                                  ↓
//!                    SnapshotPolicy / StateLoader
//! ```
//!
//! # Event Store Requirements
//!
//! 1. **Append-Only**: Events are never updated or deleted
//! 2. **Ordered**: The store assigns a strictly increasing version per
//!    workspace, atomically
//! 3. **Durable**: An appended event is readable by subsequent fetches
//! 4. **Paged**: Reads support bounded pages so replay of very long logs
//!    never needs unbounded memory
//!
//! The transactional guarantee behind version assignment is owned by the
//! backing store. The bundled [`MemoryEventStore`] serializes appends under
//! a write lock; SQL backends should use a serializable transaction over a
//! per-workspace counter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::WorkspaceResult;
use crate::events::workspace::WorkspaceEvent;

pub mod memory;
pub mod nats;

pub use memory::{MemoryEventStore, MemorySnapshotStore};
pub use nats::NatsEventStore;

/// A persisted event envelope carrying the store-assigned version
///
/// The version is the event's position in the per-workspace log and the
/// sole ordering authority; event timestamps are audit data only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvent {
    /// Per-workspace monotonically increasing version (first event is 1)
    pub version: u64,

    /// The event as appended
    #[serde(flatten)]
    pub event: WorkspaceEvent,
}

/// Event Store trait for persisting and retrieving workspace events
///
/// Implementations must ensure:
/// - **Atomicity**: An append either fully succeeds with a new version or
///   fails without effect
/// - **Consistency**: Versions are assigned contiguously per workspace
/// - **Durability**: Appended events survive restarts
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Append one event to a workspace's log
    ///
    /// The store assigns the next strictly-increasing version. When
    /// `expected_version` is given, the append fails with
    /// [`WorkspaceError::Concurrency`](crate::errors::WorkspaceError) if
    /// the workspace's current version differs (optimistic concurrency).
    ///
    /// # Returns
    ///
    /// The version assigned to the appended event. Callers must not assume
    /// success without checking the returned version.
    async fn append_event(
        &self,
        workspace_id: Uuid,
        event: WorkspaceEvent,
        expected_version: Option<u64>,
    ) -> WorkspaceResult<u64>;

    /// Read a bounded page of events newer than `after_version`
    ///
    /// Returns up to `limit` events with version strictly greater than
    /// `after_version`, ascending by version. An empty page means the log
    /// has been exhausted.
    async fn list_events_after(
        &self,
        workspace_id: Uuid,
        after_version: u64,
        limit: usize,
    ) -> WorkspaceResult<Vec<StoredEvent>>;

    /// Current highest version of a workspace's log
    ///
    /// Returns `None` if the workspace has no events.
    async fn get_version(&self, workspace_id: Uuid) -> WorkspaceResult<Option<u64>>;
}

/// Snapshot Store trait for compaction checkpoints
///
/// Snapshot persistence is best-effort from the engine's point of view:
/// reads never depend on a snapshot existing, only on the raw log.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Most recent snapshot for a workspace, by version descending
    async fn latest_snapshot(
        &self,
        workspace_id: Uuid,
    ) -> WorkspaceResult<Option<crate::snapshot::Snapshot>>;

    /// Persist a snapshot
    ///
    /// Backends that can enforce uniqueness on (workspace, version) should;
    /// racing writers at the same version are both individually valid.
    async fn put_snapshot(
        &self,
        workspace_id: Uuid,
        snapshot: crate::snapshot::Snapshot,
    ) -> WorkspaceResult<()>;

    /// Prune to the newest `keep` snapshots, returning how many were removed
    async fn prune_snapshots(&self, workspace_id: Uuid, keep: usize) -> WorkspaceResult<usize>;
}
