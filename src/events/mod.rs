// Copyright (c) 2025 - Cowboy AI, Inc.
//! Workspace Domain Events
//!
//! This module defines all mutation events for the workspace bounded context.
//! Events are immutable facts representing state changes that have occurred.
//!
//! # Event Sourcing Principles
//!
//! 1. **Events are immutable**: Once created, events never change
//! 2. **Events are past tense**: Named for what happened (ItemCreated, not
//!    CreateItem)
//! 3. **Events carry attribution**: acting user id, optional display name,
//!    wall-clock timestamp
//! 4. **Events are facts**: Represent what happened, not commands
//!
//! # Event Flow
//!
//! ```text
//! Mutation request → WorkspaceEvent → EventStore (version assigned)
//!                                          ↓
//!                              StateLoader → replay → WorkspaceState
//! ```
//!
//! # Ordering
//!
//! Per-workspace ordering is total and established solely by the
//! monotonically increasing version the store assigns at append time.
//! Timestamps are informational audit data and may be out of order across
//! concurrent submitters; [`validation`] reports such anomalies without
//! affecting replay.
//!
//! # Module Organization
//!
//! - [`workspace`] - the event vocabulary and the [`WorkspaceEvent`] envelope
//! - [`validation`] - advisory log scanning

pub mod validation;
pub mod workspace;

// Re-export commonly used types
pub use validation::{validate_event_log, LogAnomaly};
pub use workspace::{
    BulkItemsCreated, BulkItemsUpdate, EventPayload, FolderCreatedWithItems, FolderDeleted,
    GlobalDescriptionSet, GlobalTitleSet, ItemCreated, ItemDeleted, ItemMovedToFolder,
    ItemUpdated, ItemsMovedToFolder, WorkspaceCreated, WorkspaceEvent, WorkspaceSnapshotSeed,
};
