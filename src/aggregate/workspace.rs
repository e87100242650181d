// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Functional Workspace Aggregate
//!
//! Implements event sourcing pattern with pure functions:
//! - Immutable state
//! - Pure event application (fold)
//! - No side effects, no mutations outside event application
//!
//! # Architecture
//!
//! ```text
//! Events → apply_event() → New State
//! [Event] → replay()     → Reconstructed State
//! ```
//!
//! # Totality
//!
//! `apply_event` never fails. Events are facts that already happened;
//! anomalies in them (a patch for a deleted item, a move into a vanished
//! folder, a tag from a newer writer) reduce to no-ops so that any
//! historical log replays deterministically.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Item;
use crate::events::workspace::{BulkItemsUpdate, EventPayload, WorkspaceEvent};

/// Immutable Workspace State
///
/// The aggregate root reconstructed from events. It is derived data: a pure
/// function of the latest snapshot and the events newer than it, never
/// partially mutated outside event application.
///
/// # Reconstruction
///
/// ```rust,ignore
/// let state = replay(WorkspaceState::empty(workspace_id), events.iter());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceState {
    /// Owning workspace identifier
    pub workspace_id: Uuid,

    /// Global workspace title
    #[serde(default)]
    pub title: String,

    /// Global workspace description
    #[serde(default)]
    pub description: String,

    /// Items in insertion order
    #[serde(default)]
    pub items: Vec<Item>,

    /// Count of items created over the workspace's lifetime
    ///
    /// Tracks creations, not current cardinality; deletions do not
    /// decrement it. Used by callers for default naming ("Note 7").
    #[serde(default)]
    pub items_created: u64,
}

impl WorkspaceState {
    /// Fresh empty state for a workspace
    ///
    /// Used as the replay base when no snapshot exists, and as the
    /// "empty but present" fallback when loading fails.
    pub fn empty(workspace_id: Uuid) -> Self {
        Self {
            workspace_id,
            title: String::new(),
            description: String::new(),
            items: Vec::new(),
            items_created: 0,
        }
    }

    /// Look up an item by id
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether an item with this id exists and is a folder
    pub fn folder_exists(&self, id: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.id == id && item.kind.is_folder())
    }
}

/// Apply event to state (pure function)
///
/// This is the core of event sourcing: reconstructing state by applying
/// events. Each event type has a specific transformation on the state.
///
/// # Invariants
/// - Function is pure (no side effects)
/// - Same event + same state = same result
/// - Never fails (events are facts that happened)
/// - `items` ordering is insertion order; unrelated mutations never
///   reorder surviving items
pub fn apply_event(state: WorkspaceState, event: &WorkspaceEvent) -> WorkspaceState {
    use EventPayload::*;

    match &event.payload {
        WorkspaceCreated(e) => WorkspaceState {
            title: e.title.clone(),
            description: e.description.clone(),
            ..state
        },

        ItemCreated(e) => append_items(state, std::slice::from_ref(&e.item)),

        BulkItemsCreated(e) => append_items(state, &e.items),

        ItemUpdated(e) => {
            let mut state = state;
            // Patch for a since-deleted item is a stale fact: no-op
            if let Some(item) = state.items.iter_mut().find(|item| item.id == e.id) {
                if let Some(name) = &e.changes.name {
                    item.name = name.clone();
                }
                if let Some(data) = &e.changes.data {
                    item.data = data.clone();
                }
                if let Some(layout) = e.changes.layout {
                    item.layout = Some(layout);
                }
                item.last_update_source = e.source.clone();
            }
            state
        }

        ItemDeleted(e) => {
            let mut state = state;
            let was_folder = state.folder_exists(&e.id);
            state.items.retain(|item| item.id != e.id);
            // Children lose the reference in the same reduction step;
            // they are never deleted with the folder
            if was_folder {
                clear_folder_refs(&mut state, &e.id);
            }
            state
        }

        BulkItemsUpdated(update) => match update {
            BulkItemsUpdate::Layout { layout_updates } => {
                let mut state = state;
                for patch in layout_updates {
                    if let Some(item) = state.items.iter_mut().find(|item| item.id == patch.id) {
                        item.layout = Some(patch.layout());
                    }
                }
                state
            }
            // Legacy wholesale replacement; the created counter tracks
            // creations and is left untouched
            BulkItemsUpdate::Legacy { items } => WorkspaceState {
                items: items.clone(),
                ..state
            },
        },

        GlobalTitleSet(e) => WorkspaceState {
            title: e.title.clone(),
            ..state
        },

        GlobalDescriptionSet(e) => WorkspaceState {
            description: e.description.clone(),
            ..state
        },

        ItemMovedToFolder(e) => move_items_to_folder(
            state,
            std::slice::from_ref(&e.item_id),
            e.folder_id.as_deref(),
        ),

        ItemsMovedToFolder(e) => move_items_to_folder(state, &e.item_ids, e.folder_id.as_deref()),

        FolderCreatedWithItems(e) => {
            let state = append_items(state, std::slice::from_ref(&e.folder));
            move_items_to_folder(state, &e.item_ids, Some(e.folder.id.as_str()))
        }

        WorkspaceSnapshot(e) => WorkspaceState {
            workspace_id: state.workspace_id,
            ..e.state.clone()
        },

        // Deprecated tags, retained so historical logs replay
        FolderCreated(_) | FolderUpdated(_) => state,

        FolderDeleted(e) => {
            let mut state = state;
            clear_folder_refs(&mut state, &e.id);
            state
        }

        Unknown => state,
    }
}

/// Append items, skipping ids already present (ids are never reused)
fn append_items(mut state: WorkspaceState, new_items: &[Item]) -> WorkspaceState {
    for item in new_items {
        if state.item(&item.id).is_some() {
            continue;
        }
        state.items.push(item.clone());
        state.items_created += 1;
    }
    state
}

/// Clear every `folder_id` referencing the given folder
fn clear_folder_refs(state: &mut WorkspaceState, folder_id: &str) {
    for item in state.items.iter_mut() {
        if item.folder_id.as_deref() == Some(folder_id) {
            item.folder_id = None;
        }
    }
}

/// Reassign items into a folder (or to the root), clearing their layout
///
/// A move targeting a folder id that does not resolve to an existing folder
/// is a stale fact about deleted data and reduces to a no-op. Moves to the
/// root always apply. An applied move clears layout so the item is
/// re-placed in its new context.
fn move_items_to_folder(
    mut state: WorkspaceState,
    item_ids: &[String],
    folder_id: Option<&str>,
) -> WorkspaceState {
    if let Some(target) = folder_id {
        if !state.folder_exists(target) {
            return state;
        }
    }
    for item in state.items.iter_mut() {
        // A folder never becomes its own parent
        if folder_id == Some(item.id.as_str()) {
            continue;
        }
        if item_ids.iter().any(|id| id == &item.id) {
            item.folder_id = folder_id.map(str::to_string);
            item.layout = None;
        }
    }
    state
}

/// Reconstruct state by folding events over a base state
///
/// Events must be supplied in ascending version order. Replaying an empty
/// list returns the base unchanged, and replay is resumable: folding a
/// prefix and then the remainder equals folding the whole log.
pub fn replay<'a, I>(base: WorkspaceState, events: I) -> WorkspaceState
where
    I: IntoIterator<Item = &'a WorkspaceEvent>,
{
    events
        .into_iter()
        .fold(base, |state, event| apply_event(state, event))
}
