// Copyright (c) 2025 - Cowboy AI, Inc.

//! JetStream configuration and setup for workspace event logs
//!
//! This module provides configuration and initialization for NATS JetStream,
//! following event sourcing patterns with persistent streams.
//!
//! # Architecture
//!
//! JetStream provides:
//! - **Persistent Event Streams**: Durable event storage with replay capability
//! - **Consumer Management**: Pull consumers for paged event reads
//! - **Stream Configuration**: Subject-based stream organization
//! - **Ordering Guarantees**: Sequence numbers per stream
//!
//! # Subject Hierarchy
//!
//! All workspace events follow the hierarchical pattern:
//!
//! ```text
//! workspace.{workspace_id}.{event_type}
//! ```
//!
//! This allows precise per-workspace filters (`workspace.<id>.>`) and a
//! global capture subject (`workspace.>`) for the stream.
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_workspace::jetstream::{WorkspaceStreamConfig, create_workspace_stream};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = async_nats::connect("nats://localhost:4222").await?;
//!     let jetstream = async_nats::jetstream::new(client);
//!
//!     let config = WorkspaceStreamConfig::default();
//!     let stream = create_workspace_stream(jetstream, config).await?;
//!
//!     Ok(())
//! }
//! ```

use async_nats::jetstream::{self, stream::Stream};
use std::time::Duration;

use crate::errors::{WorkspaceError, WorkspaceResult};

/// Root namespace for workspace event subjects
pub const WORKSPACE_SUBJECT_ROOT: &str = "workspace";

/// Configuration for the JetStream workspace event stream
#[derive(Debug, Clone)]
pub struct WorkspaceStreamConfig {
    /// Stream name for workspace events
    pub stream_name: String,

    /// Subjects this stream will capture (defaults to "workspace.>")
    pub subjects: Vec<String>,

    /// Maximum age of messages (default: unlimited; the log is the source
    /// of truth and is compacted by snapshots, never expired)
    pub max_age: Duration,

    /// Maximum bytes stored in stream (default: 10GB)
    pub max_bytes: i64,

    /// Storage type (File or Memory)
    pub storage: StorageType,

    /// Number of replicas (for clustered NATS)
    pub replicas: usize,
}

impl Default for WorkspaceStreamConfig {
    fn default() -> Self {
        Self {
            stream_name: "WORKSPACE_EVENTS".to_string(),
            subjects: vec![format!("{WORKSPACE_SUBJECT_ROOT}.>")],
            max_age: Duration::ZERO,
            max_bytes: 10 * 1024 * 1024 * 1024, // 10 GB
            storage: StorageType::File,
            replicas: 1,
        }
    }
}

/// Storage type for JetStream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// File-based storage (persistent across restarts)
    File,
    /// Memory-based storage (faster, but lost on restart)
    Memory,
}

/// Create or update the workspace events stream
///
/// This function is idempotent - it will create the stream if it doesn't
/// exist, or update it if the configuration has changed. The stream uses
/// limits-based retention: events are never expired by consumption, since
/// replay depends on the full log.
pub async fn create_workspace_stream(
    jetstream: jetstream::Context,
    config: WorkspaceStreamConfig,
) -> WorkspaceResult<Stream> {
    let storage = match config.storage {
        StorageType::File => jetstream::stream::StorageType::File,
        StorageType::Memory => jetstream::stream::StorageType::Memory,
    };

    let stream_config = jetstream::stream::Config {
        name: config.stream_name.clone(),
        subjects: config.subjects,
        max_age: config.max_age,
        max_bytes: config.max_bytes,
        storage,
        num_replicas: config.replicas,
        retention: jetstream::stream::RetentionPolicy::Limits,
        ..Default::default()
    };

    let stream = jetstream
        .get_or_create_stream(stream_config)
        .await
        .map_err(|e| WorkspaceError::NatsConnection(e.to_string()))?;

    Ok(stream)
}
