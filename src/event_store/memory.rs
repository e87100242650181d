// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Event and Snapshot Stores
//!
//! Reference backend used by tests and embedded deployments. Version
//! assignment is atomic: the read-increment-write of an append happens
//! under the map's write lock, so concurrent appends to the same workspace
//! serialize and versions stay contiguous. Durable backends provide the
//! same guarantee transactionally (e.g. a serializable transaction over a
//! per-workspace counter).

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{WorkspaceError, WorkspaceResult};
use crate::event_store::{EventStore, SnapshotStore, StoredEvent};
use crate::events::workspace::WorkspaceEvent;
use crate::snapshot::Snapshot;

/// In-memory append-only event log, keyed by workspace
#[derive(Default)]
pub struct MemoryEventStore {
    logs: RwLock<HashMap<Uuid, Vec<StoredEvent>>>,
}

impl MemoryEventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn append_event(
        &self,
        workspace_id: Uuid,
        event: WorkspaceEvent,
        expected_version: Option<u64>,
    ) -> WorkspaceResult<u64> {
        let mut logs = self.logs.write().await;
        let log = logs.entry(workspace_id).or_default();

        let current = log.len() as u64;
        if let Some(expected) = expected_version {
            if current != expected {
                return Err(WorkspaceError::Concurrency(format!(
                    "expected version {expected}, but current version is {current}"
                )));
            }
        }

        let version = current + 1;
        log.push(StoredEvent { version, event });
        Ok(version)
    }

    async fn list_events_after(
        &self,
        workspace_id: Uuid,
        after_version: u64,
        limit: usize,
    ) -> WorkspaceResult<Vec<StoredEvent>> {
        let logs = self.logs.read().await;
        let page = logs
            .get(&workspace_id)
            .map(|log| {
                log.iter()
                    .filter(|stored| stored.version > after_version)
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(page)
    }

    async fn get_version(&self, workspace_id: Uuid) -> WorkspaceResult<Option<u64>> {
        let logs = self.logs.read().await;
        Ok(logs
            .get(&workspace_id)
            .and_then(|log| log.last())
            .map(|stored| stored.version))
    }
}

/// In-memory snapshot store
///
/// A write at an already-present version replaces the existing entry
/// instead of storing a duplicate row, mirroring the uniqueness constraint
/// recommended for durable backends.
#[derive(Default)]
pub struct MemorySnapshotStore {
    snapshots: RwLock<HashMap<Uuid, Vec<Snapshot>>>,
}

impl MemorySnapshotStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots currently held for a workspace
    pub async fn snapshot_count(&self, workspace_id: Uuid) -> usize {
        let snapshots = self.snapshots.read().await;
        snapshots.get(&workspace_id).map(Vec::len).unwrap_or(0)
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn latest_snapshot(&self, workspace_id: Uuid) -> WorkspaceResult<Option<Snapshot>> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots
            .get(&workspace_id)
            .and_then(|entries| entries.iter().max_by_key(|snapshot| snapshot.version))
            .cloned())
    }

    async fn put_snapshot(&self, workspace_id: Uuid, snapshot: Snapshot) -> WorkspaceResult<()> {
        let mut snapshots = self.snapshots.write().await;
        let entries = snapshots.entry(workspace_id).or_default();
        match entries
            .iter_mut()
            .find(|existing| existing.version == snapshot.version)
        {
            Some(existing) => *existing = snapshot,
            None => entries.push(snapshot),
        }
        Ok(())
    }

    async fn prune_snapshots(&self, workspace_id: Uuid, keep: usize) -> WorkspaceResult<usize> {
        let mut snapshots = self.snapshots.write().await;
        let entries = match snapshots.get_mut(&workspace_id) {
            Some(entries) => entries,
            None => return Ok(0),
        };
        if entries.len() <= keep {
            return Ok(0);
        }
        entries.sort_by_key(|snapshot| snapshot.version);
        let removed = entries.len() - keep;
        entries.drain(..removed);
        Ok(removed)
    }
}
