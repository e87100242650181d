// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS JetStream Event Store Implementation
//!
//! This module implements the EventStore trait using NATS JetStream as the
//! persistent storage backend, providing a durable workspace log with replay.
//!
//! Snapshot persistence is backend-specific and not provided for NATS;
//! pair this store with a snapshot store suited to the deployment.

use async_nats::jetstream::{self, stream::Stream};
use async_trait::async_trait;
use futures::StreamExt;
use uuid::Uuid;

use crate::errors::{WorkspaceError, WorkspaceResult};
use crate::event_store::{EventStore, StoredEvent};
use crate::events::workspace::WorkspaceEvent;
use crate::jetstream::{
    create_workspace_stream, WorkspaceStreamConfig, WORKSPACE_SUBJECT_ROOT,
};

/// NATS JetStream-backed workspace event log
///
/// This implementation uses NATS JetStream for durable event storage with:
/// - Subject-per-workspace stream organization
/// - Version-based ordering guarantees
/// - Persistent storage across restarts
///
/// Versions are derived from the current maximum and validated with the
/// optional `expected_version` optimistic check; true atomic assignment is
/// the deploying store's concern (see the module docs on
/// [`crate::event_store`]).
///
/// # Example
///
/// ```rust,no_run
/// use cim_workspace::event_store::NatsEventStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = NatsEventStore::connect("nats://localhost:4222").await?;
///     // Use store...
///     Ok(())
/// }
/// ```
pub struct NatsEventStore {
    /// NATS JetStream context
    jetstream: jetstream::Context,

    /// JetStream stream for workspace events
    stream: Stream,

    /// Base subject prefix (e.g., "workspace")
    subject_prefix: String,
}

impl NatsEventStore {
    /// Connect to NATS and create the event store
    ///
    /// This will connect to the NATS server and create or get the
    /// workspace events stream.
    pub async fn connect(nats_url: &str) -> WorkspaceResult<Self> {
        Self::connect_with_config(nats_url, WorkspaceStreamConfig::default()).await
    }

    /// Connect with custom stream configuration
    pub async fn connect_with_config(
        nats_url: &str,
        config: WorkspaceStreamConfig,
    ) -> WorkspaceResult<Self> {
        let client = async_nats::connect(nats_url)
            .await
            .map_err(|e| WorkspaceError::NatsConnection(e.to_string()))?;

        let jetstream = jetstream::new(client);
        let stream = create_workspace_stream(jetstream.clone(), config).await?;

        Ok(Self {
            jetstream,
            stream,
            subject_prefix: WORKSPACE_SUBJECT_ROOT.to_string(),
        })
    }

    /// Build subject for a workspace event
    ///
    /// Format: workspace.<workspace_id>.<event_type>
    fn build_subject(&self, workspace_id: Uuid, event_type: &str) -> String {
        format!(
            "{}.{}.{}",
            self.subject_prefix,
            workspace_id,
            event_type.to_lowercase()
        )
    }

    /// Get stream subject filter for a workspace
    ///
    /// Format: workspace.<workspace_id>.>
    fn workspace_subject_filter(&self, workspace_id: Uuid) -> String {
        format!("{}.{}.>", self.subject_prefix, workspace_id)
    }

    /// Read every stored event for a workspace, ascending by version
    async fn read_all(&self, workspace_id: Uuid) -> WorkspaceResult<Vec<StoredEvent>> {
        let filter_subject = self.workspace_subject_filter(workspace_id);

        let consumer = self
            .stream
            .create_consumer(jetstream::consumer::pull::Config {
                filter_subject,
                ..Default::default()
            })
            .await
            .map_err(|e| WorkspaceError::NatsConnection(e.to_string()))?;

        let mut events = Vec::new();

        // Fetch messages in bounded batches to avoid infinite wait
        const BATCH_SIZE: usize = 10000;

        loop {
            // If no messages are available, fetch times out and we treat
            // that as end of stream
            let messages_result = consumer
                .fetch()
                .max_messages(BATCH_SIZE)
                .expires(std::time::Duration::from_secs(2))
                .messages()
                .await;

            let mut messages = match messages_result {
                Ok(msgs) => msgs,
                Err(e) => {
                    let err_msg = e.to_string().to_lowercase();
                    if err_msg.contains("timeout")
                        || err_msg.contains("timed out")
                        || err_msg.contains("no messages")
                    {
                        break;
                    }
                    return Err(WorkspaceError::NatsConnection(e.to_string()));
                }
            };

            let mut batch_count = 0;

            while let Some(message) = messages.next().await {
                let msg =
                    message.map_err(|e| WorkspaceError::NatsConnection(e.to_string()))?;

                let stored: StoredEvent = serde_json::from_slice(&msg.payload)
                    .map_err(|e| WorkspaceError::Deserialization(e.to_string()))?;
                events.push(stored);

                msg.ack()
                    .await
                    .map_err(|e| WorkspaceError::NatsConnection(e.to_string()))?;

                batch_count += 1;
            }

            // Fewer messages than the batch size means the stream is drained
            if batch_count < BATCH_SIZE {
                break;
            }
        }

        events.sort_by_key(|stored| stored.version);

        Ok(events)
    }
}

#[async_trait]
impl EventStore for NatsEventStore {
    async fn append_event(
        &self,
        workspace_id: Uuid,
        event: WorkspaceEvent,
        expected_version: Option<u64>,
    ) -> WorkspaceResult<u64> {
        let current_version = self.get_version(workspace_id).await?;

        if let Some(expected) = expected_version {
            match current_version {
                Some(current) if current != expected => {
                    return Err(WorkspaceError::Concurrency(format!(
                        "expected version {expected}, but current version is {current}"
                    )));
                }
                None if expected != 0 => {
                    return Err(WorkspaceError::Concurrency(format!(
                        "expected version {expected}, but workspace has no events"
                    )));
                }
                _ => {}
            }
        }

        let version = current_version.map(|v| v + 1).unwrap_or(1);
        let subject = self.build_subject(workspace_id, event.event_type_name());

        let stored = StoredEvent { version, event };
        let payload = serde_json::to_vec(&stored)
            .map_err(|e| WorkspaceError::Serialization(e.to_string()))?;

        self.jetstream
            .publish(subject, payload.into())
            .await
            .map_err(|e| WorkspaceError::NatsPublish(e.to_string()))?
            .await
            .map_err(|e| WorkspaceError::NatsPublish(e.to_string()))?;

        Ok(version)
    }

    async fn list_events_after(
        &self,
        workspace_id: Uuid,
        after_version: u64,
        limit: usize,
    ) -> WorkspaceResult<Vec<StoredEvent>> {
        let events = self.read_all(workspace_id).await?;

        Ok(events
            .into_iter()
            .filter(|stored| stored.version > after_version)
            .take(limit)
            .collect())
    }

    async fn get_version(&self, workspace_id: Uuid) -> WorkspaceResult<Option<u64>> {
        let events = self.read_all(workspace_id).await?;

        Ok(events.iter().map(|stored| stored.version).max())
    }
}
