// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Functional Workspace Aggregate
//!
//! This module provides the functional aggregate pattern for event sourcing:
//! - State reconstruction via event folding: [Event] → State
//! - No mutations, no side effects
//! - All state changes represented as events
//!
//! # Fold Pattern
//!
//! State is reconstructed by folding events:
//!
//! ```rust,ignore
//! let initial = WorkspaceState::empty(workspace_id);
//! let state = events.iter().fold(initial, |state, event| {
//!     apply_event(state, event)
//! });
//! ```
//!
//! # Pure Functions
//!
//! All aggregate functions follow these principles:
//! 1. **Referential Transparency**: Same input → Same output
//! 2. **No Side Effects**: No I/O, no mutation, no time
//! 3. **Totality**: Events are facts that already happened; event
//!    application never fails, and anomalous facts (patches for deleted
//!    items, unknown tags) reduce to no-ops
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use cim_workspace::aggregate::{replay, WorkspaceState};
//!
//! // Load stored events newer than the latest snapshot
//! let page = event_store.list_events_after(workspace_id, snapshot.version, 500).await?;
//!
//! // Reconstruct current state
//! let state = replay(snapshot.state, page.iter().map(|stored| &stored.event));
//! ```
//!
//! # References
//!
//! - Greg Young: Event Sourcing
//! - Functional Event Sourcing Decider Pattern

pub mod workspace;

pub use workspace::{apply_event, replay, WorkspaceState};
