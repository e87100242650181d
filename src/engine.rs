// Copyright (c) 2025 - Cowboy AI, Inc.
//! Workspace Engine Facade
//!
//! Ties the pieces together the way request handlers consume them:
//!
//! ```text
//! append(payload, actor) → EventStore (version assigned)
//!        │
//!        └─ spawn → SnapshotPolicy::check_and_create   (fire-and-forget)
//!
//! load(workspace_id)     → StateLoader → replay → WorkspaceState
//! ```
//!
//! The engine is explicit context owned by the embedding application and
//! passed where needed; there is no process-wide mutable singleton. Each
//! append and load is a self-contained call.

use std::sync::Arc;
use uuid::Uuid;

use crate::aggregate::WorkspaceState;
use crate::errors::WorkspaceResult;
use crate::event_store::{EventStore, SnapshotStore};
use crate::events::workspace::{EventPayload, WorkspaceEvent};
use crate::loader::StateLoader;
use crate::snapshot::{SnapshotConfig, SnapshotPolicy};

/// Acting user attribution attached to every appended event
#[derive(Debug, Clone)]
pub struct Actor {
    /// Acting user's id
    pub user_id: String,

    /// Acting user's display name, when known
    pub user_name: Option<String>,
}

impl Actor {
    /// Attribution with an id only
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: None,
        }
    }

    /// Attach a display name
    pub fn named(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: Some(user_name.into()),
        }
    }
}

/// The workspace event-sourcing engine
///
/// Cheap to clone; all components share the underlying stores.
#[derive(Clone)]
pub struct WorkspaceEngine {
    events: Arc<dyn EventStore>,
    loader: StateLoader,
    policy: SnapshotPolicy,
}

impl WorkspaceEngine {
    /// Assemble an engine over the given stores with default tuning
    pub fn new(events: Arc<dyn EventStore>, snapshots: Arc<dyn SnapshotStore>) -> Self {
        Self::with_config(events, snapshots, SnapshotConfig::default())
    }

    /// Assemble an engine with explicit snapshot tuning
    pub fn with_config(
        events: Arc<dyn EventStore>,
        snapshots: Arc<dyn SnapshotStore>,
        config: SnapshotConfig,
    ) -> Self {
        let loader = StateLoader::new(events.clone(), snapshots.clone());
        let policy = SnapshotPolicy::with_config(events.clone(), snapshots, config);
        Self {
            events,
            loader,
            policy,
        }
    }

    /// Append a mutation and trigger the compaction check
    ///
    /// The compaction check runs detached after a successful append and can
    /// never block or fail the mutation response.
    ///
    /// # Returns
    ///
    /// The version assigned to the appended event.
    pub async fn append(
        &self,
        workspace_id: Uuid,
        payload: EventPayload,
        actor: &Actor,
    ) -> WorkspaceResult<u64> {
        let event = WorkspaceEvent::new(payload, actor.user_id.clone(), actor.user_name.clone());
        let version = self
            .events
            .append_event(workspace_id, event, None)
            .await?;

        let policy = self.policy.clone();
        tokio::spawn(async move {
            policy.check_and_create(workspace_id).await;
        });

        Ok(version)
    }

    /// Current state of a workspace (empty-but-present on storage failure)
    pub async fn load(&self, workspace_id: Uuid) -> WorkspaceState {
        self.loader.load_workspace_state(workspace_id).await
    }

    /// The engine's state loader
    pub fn loader(&self) -> &StateLoader {
        &self.loader
    }

    /// The engine's snapshot policy
    pub fn snapshot_policy(&self) -> &SnapshotPolicy {
        &self.policy
    }
}
