//! Error types for workspace engine operations

use thiserror::Error;

/// Errors that can occur at the storage boundary of the workspace engine
///
/// The reducer and event model never produce these. Only operations that
/// touch persisted storage (append, fetch, snapshot read/write) can fail.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// NATS connection error
    #[error("NATS connection error: {0}")]
    NatsConnection(String),

    /// NATS publish error
    #[error("NATS publish error: {0}")]
    NatsPublish(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Optimistic concurrency conflict on append
    #[error("Concurrency conflict: {0}")]
    Concurrency(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for workspace engine operations
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

impl From<async_nats::Error> for WorkspaceError {
    fn from(err: async_nats::Error) -> Self {
        WorkspaceError::NatsConnection(err.to_string())
    }
}

impl From<serde_json::Error> for WorkspaceError {
    fn from(err: serde_json::Error) -> Self {
        WorkspaceError::Serialization(err.to_string())
    }
}
