// Copyright (c) 2025 - Cowboy AI, Inc.
//! Workspace Domain Events
//!
//! All state changes to a workspace are represented as immutable events.
//! Events follow event sourcing best practices:
//! - Immutable (no setters, only data)
//! - Past tense naming (ItemCreated, not CreateItem)
//! - Carry actor attribution and a globally unique event id
//! - Serializable in the historical log format (SCREAMING_SNAKE_CASE type
//!   tags, camelCase payload fields, millisecond timestamps)
//!
//! # Forward Compatibility
//!
//! The tag set is closed for reducer purposes, but logs written by a newer
//! engine may contain tags this version does not know. Those deserialize to
//! [`EventPayload::Unknown`], which the reducer treats as a documented no-op
//! rather than an error. The deprecated FOLDER_* tags are retained so that
//! historical logs containing them still replay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::aggregate::WorkspaceState;
use crate::domain::{Item, ItemChanges, LayoutUpdate};

/// Workspace Mutation Events
///
/// Adjacently tagged: `{"type": "ITEM_CREATED", "payload": {...}}`, matching
/// the append-only log format. Each variant wraps its payload record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    /// Workspace was created with initial title and description
    WorkspaceCreated(WorkspaceCreated),

    /// A single item was added
    ItemCreated(ItemCreated),

    /// Several items were added atomically
    BulkItemsCreated(BulkItemsCreated),

    /// An item's fields were patched
    ItemUpdated(ItemUpdated),

    /// An item was removed
    ItemDeleted(ItemDeleted),

    /// Layout patch across items, or (legacy) wholesale item replacement
    BulkItemsUpdated(BulkItemsUpdate),

    /// Global workspace title was set
    GlobalTitleSet(GlobalTitleSet),

    /// Global workspace description was set
    GlobalDescriptionSet(GlobalDescriptionSet),

    /// An item was moved into a folder (or back to the root)
    ItemMovedToFolder(ItemMovedToFolder),

    /// Several items were moved into a folder (or back to the root)
    ItemsMovedToFolder(ItemsMovedToFolder),

    /// A folder was created and items reassigned into it atomically
    FolderCreatedWithItems(FolderCreatedWithItems),

    /// Migration/import seed carrying a full state
    WorkspaceSnapshot(WorkspaceSnapshotSeed),

    /// Deprecated. Payload ignored; retained so historical logs replay.
    FolderCreated(Value),

    /// Deprecated. Payload ignored; retained so historical logs replay.
    FolderUpdated(Value),

    /// Deprecated. Still clears folder references for backward
    /// compatibility with historical logs.
    FolderDeleted(FolderDeleted),

    /// Tag unknown to this version of the engine; applied as a no-op
    #[serde(other)]
    Unknown,
}

/// Workspace was created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceCreated {
    pub title: String,
    pub description: String,
}

/// A single item was added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCreated {
    pub item: Item,
}

/// Several items were added atomically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkItemsCreated {
    pub items: Vec<Item>,
}

/// An item's fields were patched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdated {
    /// Target item id
    pub id: String,

    /// Partial patch; absent fields leave the item untouched
    pub changes: ItemChanges,

    /// Origin of the mutation (user action, AI tool, import)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// An item was removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDeleted {
    pub id: String,
}

/// The two wire forms of BULK_ITEMS_UPDATED
///
/// Resolved by field presence: the current form carries `layoutUpdates`,
/// the deprecated-but-supported legacy form carries a full `items` array
/// that replaces the collection wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BulkItemsUpdate {
    /// Per-id layout patch; ids not present in the list are untouched
    Layout {
        #[serde(rename = "layoutUpdates")]
        layout_updates: Vec<LayoutUpdate>,
    },

    /// Legacy wholesale replacement of the items collection
    Legacy { items: Vec<Item> },
}

/// Global workspace title was set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalTitleSet {
    pub title: String,
}

/// Global workspace description was set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalDescriptionSet {
    pub description: String,
}

/// An item was moved into a folder, or to the root when `folder_id` is None
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMovedToFolder {
    pub item_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// Several items were moved into a folder, or to the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsMovedToFolder {
    pub item_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

/// A folder was created and existing items reassigned into it atomically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderCreatedWithItems {
    /// The new folder item
    pub folder: Item,

    /// Ids of existing items to reassign into the folder
    pub item_ids: Vec<String>,
}

/// Full-state seed used by migration and import paths
///
/// Replaces the entire state on application, preserving only the workspace
/// id of the log being replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshotSeed {
    pub state: WorkspaceState,
}

/// Deprecated folder deletion; still clears folder references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderDeleted {
    pub id: String,
}

impl EventPayload {
    /// Wire tag of this payload
    pub fn event_type_name(&self) -> &'static str {
        use EventPayload::*;

        match self {
            WorkspaceCreated(_) => "WORKSPACE_CREATED",
            ItemCreated(_) => "ITEM_CREATED",
            BulkItemsCreated(_) => "BULK_ITEMS_CREATED",
            ItemUpdated(_) => "ITEM_UPDATED",
            ItemDeleted(_) => "ITEM_DELETED",
            BulkItemsUpdated(_) => "BULK_ITEMS_UPDATED",
            GlobalTitleSet(_) => "GLOBAL_TITLE_SET",
            GlobalDescriptionSet(_) => "GLOBAL_DESCRIPTION_SET",
            ItemMovedToFolder(_) => "ITEM_MOVED_TO_FOLDER",
            ItemsMovedToFolder(_) => "ITEMS_MOVED_TO_FOLDER",
            FolderCreatedWithItems(_) => "FOLDER_CREATED_WITH_ITEMS",
            WorkspaceSnapshot(_) => "WORKSPACE_SNAPSHOT",
            FolderCreated(_) => "FOLDER_CREATED",
            FolderUpdated(_) => "FOLDER_UPDATED",
            FolderDeleted(_) => "FOLDER_DELETED",
            Unknown => "UNKNOWN",
        }
    }

    /// Whether this tag is retained only for historical logs
    pub fn is_deprecated(&self) -> bool {
        matches!(
            self,
            EventPayload::FolderCreated(_)
                | EventPayload::FolderUpdated(_)
                | EventPayload::FolderDeleted(_)
        )
    }
}

/// An immutable fact about a single workspace mutation
///
/// Timestamps are wall-clock audit data serialized as milliseconds since
/// epoch; they may legitimately be out of order across concurrent
/// submitters. Ordering is established solely by the store-assigned version
/// on the persisted envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceEvent {
    /// Globally unique event identifier (UUID v7 for time ordering)
    pub event_id: Uuid,

    /// When the mutation occurred (informational, not ordering)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    /// Acting user's id
    pub user_id: String,

    /// Acting user's display name, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// The mutation itself
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl WorkspaceEvent {
    /// Create an event stamped with a fresh v7 id and the current wall clock
    pub fn new(
        payload: EventPayload,
        user_id: impl Into<String>,
        user_name: Option<String>,
    ) -> Self {
        Self::new_at(payload, user_id, user_name, Utc::now())
    }

    /// Create an event with an explicit timestamp
    ///
    /// Used by import paths and deterministic tests.
    pub fn new_at(
        payload: EventPayload,
        user_id: impl Into<String>,
        user_name: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            timestamp,
            user_id: user_id.into(),
            user_name,
            payload,
        }
    }

    /// Wire tag of the carried payload
    pub fn event_type_name(&self) -> &'static str {
        self.payload.event_type_name()
    }
}
