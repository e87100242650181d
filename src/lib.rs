//! Workspace event sourcing and snapshot engine for the Composable
//! Information Machine
//!
//! Every mutation to a collaborative workspace is captured as an ordered,
//! replayable event log, periodically compacted into snapshots, and
//! replayed to reconstruct state on read.
//!
//! # Architecture
//!
//! ```text
//! Mutation → EventStore (version assigned) → durable log
//!                 │
//!                 └─ SnapshotPolicy (fire-and-forget compaction)
//!
//! Read → StateLoader → latest Snapshot + newer events → replay → State
//! ```
//!
//! The reducer ([`aggregate::apply_event`]) is pure and total; storage
//! lives behind the [`event_store`] traits, with bundled in-memory and
//! NATS JetStream backends.

pub mod aggregate;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod event_store;
pub mod events;
pub mod jetstream;
pub mod loader;
pub mod snapshot;

// Re-export commonly used types
pub use aggregate::{apply_event, replay, WorkspaceState};
pub use engine::{Actor, WorkspaceEngine};
pub use errors::{WorkspaceError, WorkspaceResult};
pub use event_store::{EventStore, SnapshotStore, StoredEvent};
pub use events::{validate_event_log, EventPayload, LogAnomaly, WorkspaceEvent};
pub use loader::StateLoader;
pub use snapshot::{Snapshot, SnapshotConfig, SnapshotPolicy, SnapshotStatus};
