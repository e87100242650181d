// Copyright (c) 2025 - Cowboy AI, Inc.
//! Workspace State Loader
//!
//! The only sanctioned read path into workspace state: fetch the latest
//! snapshot, fetch the events newer than it in bounded pages, and replay
//! them atop the snapshot's state. No consumer should read a raw event list
//! or snapshot and assume it is "the" state without running it through
//! replay.
//!
//! # Degradation
//!
//! A transient storage failure must degrade the user experience (an empty
//! workspace view) rather than crash the page, so
//! [`StateLoader::load_workspace_state`] masks every storage error with a
//! minimal empty state carrying the workspace id. The failure is logged.

use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::aggregate::{replay, WorkspaceState};
use crate::errors::WorkspaceResult;
use crate::event_store::{EventStore, SnapshotStore};

/// Default page size for event fetches during loading
const DEFAULT_PAGE_SIZE: usize = 500;

/// Loads current workspace state from a snapshot plus the event tail
#[derive(Clone)]
pub struct StateLoader {
    events: Arc<dyn EventStore>,
    snapshots: Arc<dyn SnapshotStore>,
    page_size: usize,
}

impl StateLoader {
    /// Create a loader over the given stores
    pub fn new(events: Arc<dyn EventStore>, snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self {
            events,
            snapshots,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the event fetch page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Current state of a workspace
    ///
    /// Never fails: any storage error is logged and masked by an
    /// empty-but-present state, so the workspace always renders.
    pub async fn load_workspace_state(&self, workspace_id: Uuid) -> WorkspaceState {
        match self.try_load(workspace_id).await {
            Ok(state) => state,
            Err(err) => {
                warn!(
                    %workspace_id,
                    error = %err,
                    "workspace state load failed; returning empty state"
                );
                WorkspaceState::empty(workspace_id)
            }
        }
    }

    /// Load without the empty-state fallback
    ///
    /// For callers that need to distinguish a storage failure from a
    /// genuinely empty workspace (e.g. export tooling).
    pub async fn try_load(&self, workspace_id: Uuid) -> WorkspaceResult<WorkspaceState> {
        let snapshot = self.snapshots.latest_snapshot(workspace_id).await?;
        let (mut state, mut cursor) = match snapshot {
            Some(snapshot) => (snapshot.state, snapshot.version),
            None => (WorkspaceState::empty(workspace_id), 0),
        };

        loop {
            let page = self
                .events
                .list_events_after(workspace_id, cursor, self.page_size)
                .await?;
            if page.is_empty() {
                break;
            }
            if let Some(last) = page.last() {
                cursor = last.version;
            }
            let page_len = page.len();
            state = replay(state, page.iter().map(|stored| &stored.event));
            if page_len < self.page_size {
                break;
            }
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WorkspaceError;
    use crate::event_store::{MemoryEventStore, MemorySnapshotStore, StoredEvent};
    use crate::events::workspace::{
        EventPayload, GlobalTitleSet, ItemCreated, WorkspaceEvent,
    };
    use crate::domain::{Item, ItemKind};
    use crate::snapshot::SnapshotPolicy;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    fn create_event(id: &str) -> WorkspaceEvent {
        WorkspaceEvent::new(
            EventPayload::ItemCreated(ItemCreated {
                item: Item::new(id, ItemKind::Note, format!("Note {id}")),
            }),
            "user-1",
            None,
        )
    }

    #[tokio::test]
    async fn test_load_replays_full_log_without_snapshot() {
        let events = Arc::new(MemoryEventStore::new());
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let workspace_id = Uuid::now_v7();
        for n in 0..5 {
            events
                .append_event(workspace_id, create_event(&format!("n{n}")), None)
                .await
                .unwrap();
        }

        let loader = StateLoader::new(events, snapshots);
        let state = loader.load_workspace_state(workspace_id).await;

        assert_eq!(state.workspace_id, workspace_id);
        assert_eq!(state.items.len(), 5);
        assert_eq!(state.items_created, 5);
    }

    #[tokio::test]
    async fn test_load_uses_snapshot_plus_tail() {
        let events = Arc::new(MemoryEventStore::new());
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let workspace_id = Uuid::now_v7();

        for n in 0..60 {
            events
                .append_event(workspace_id, create_event(&format!("n{n}")), None)
                .await
                .unwrap();
        }
        SnapshotPolicy::new(events.clone(), snapshots.clone())
            .create_snapshot(workspace_id)
            .await
            .unwrap();

        // Tail beyond the snapshot
        for n in 60..65 {
            events
                .append_event(workspace_id, create_event(&format!("n{n}")), None)
                .await
                .unwrap();
        }

        let loader = StateLoader::new(events.clone(), snapshots).with_page_size(16);
        let state = loader.load_workspace_state(workspace_id).await;

        assert_eq!(state.items.len(), 65);

        // Must equal a from-scratch replay of the raw log
        let all = events
            .list_events_after(workspace_id, 0, usize::MAX)
            .await
            .unwrap();
        let expected = replay(
            WorkspaceState::empty(workspace_id),
            all.iter().map(|stored| &stored.event),
        );
        assert_eq!(state, expected);
    }

    #[tokio::test]
    async fn test_empty_workspace_loads_empty_state() {
        let events = Arc::new(MemoryEventStore::new());
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let workspace_id = Uuid::now_v7();

        let loader = StateLoader::new(events, snapshots);
        let state = loader.load_workspace_state(workspace_id).await;

        assert_eq!(state, WorkspaceState::empty(workspace_id));
    }

    /// Store stub whose every operation fails
    struct FailingStore;

    #[async_trait]
    impl EventStore for FailingStore {
        async fn append_event(
            &self,
            _workspace_id: Uuid,
            _event: WorkspaceEvent,
            _expected_version: Option<u64>,
        ) -> WorkspaceResult<u64> {
            Err(WorkspaceError::Storage("append unavailable".to_string()))
        }

        async fn list_events_after(
            &self,
            _workspace_id: Uuid,
            _after_version: u64,
            _limit: usize,
        ) -> WorkspaceResult<Vec<StoredEvent>> {
            Err(WorkspaceError::Storage("fetch unavailable".to_string()))
        }

        async fn get_version(&self, _workspace_id: Uuid) -> WorkspaceResult<Option<u64>> {
            Err(WorkspaceError::Storage("version unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_storage_failure_masked_by_empty_state() {
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let workspace_id = Uuid::now_v7();

        let loader = StateLoader::new(Arc::new(FailingStore), snapshots);
        let state = loader.load_workspace_state(workspace_id).await;

        assert_eq!(state, WorkspaceState::empty(workspace_id));

        // try_load surfaces the failure for callers that need it
        let result = loader.try_load(workspace_id).await;
        assert!(matches!(result, Err(WorkspaceError::Storage(_))));
    }

    #[tokio::test]
    async fn test_load_does_not_trust_title_event_ordering_by_timestamp() {
        // Two title events with reversed timestamps: version order wins
        let events = Arc::new(MemoryEventStore::new());
        let snapshots = Arc::new(MemorySnapshotStore::new());
        let workspace_id = Uuid::now_v7();

        let later = chrono::DateTime::from_timestamp_millis(2_000).unwrap();
        let earlier = chrono::DateTime::from_timestamp_millis(1_000).unwrap();
        let first = WorkspaceEvent::new_at(
            EventPayload::GlobalTitleSet(GlobalTitleSet {
                title: "first".to_string(),
            }),
            "user-1",
            None,
            later,
        );
        let second = WorkspaceEvent::new_at(
            EventPayload::GlobalTitleSet(GlobalTitleSet {
                title: "second".to_string(),
            }),
            "user-2",
            None,
            earlier,
        );
        events.append_event(workspace_id, first, None).await.unwrap();
        events.append_event(workspace_id, second, None).await.unwrap();

        let loader = StateLoader::new(events, snapshots);
        let state = loader.load_workspace_state(workspace_id).await;

        assert_eq!(state.title, "second");
    }
}
