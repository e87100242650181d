// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Workspace Replay
//!
//! This module uses proptest to verify fundamental properties of the
//! workspace reducer. These tests prove mathematical properties that must
//! hold for all valid event sequences, across every event variant the
//! engine knows.

use chrono::DateTime;
use proptest::prelude::*;
use uuid::Uuid;

use cim_workspace::aggregate::{apply_event, replay, WorkspaceState};
use cim_workspace::domain::{Item, ItemChanges, ItemKind, LayoutUpdate};
use cim_workspace::events::workspace::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Small shared id pool so events collide: creates target existing ids,
/// deletes hit real items, moves reference real folders often enough to
/// exercise every reducer branch
fn item_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("c".to_string()),
        Just("d".to_string()),
        Just("f1".to_string()),
        Just("f2".to_string()),
        Just("ghost".to_string()),
    ]
}

fn item_kind() -> impl Strategy<Value = ItemKind> {
    prop_oneof![
        Just(ItemKind::Note),
        Just(ItemKind::Pdf),
        Just(ItemKind::FlashcardDeck),
        Just(ItemKind::Folder),
        Just(ItemKind::Quiz),
    ]
}

/// Items are generated without preset folder membership so that the
/// referential invariant can only be introduced through move events
fn arb_item() -> impl Strategy<Value = Item> {
    (item_id(), item_kind(), "[a-z]{1,8}").prop_map(|(id, kind, name)| Item::new(id, kind, name))
}

fn layout_update() -> impl Strategy<Value = LayoutUpdate> {
    (item_id(), 0.0f64..32.0, 0.0f64..32.0, 1.0f64..8.0, 1.0f64..8.0)
        .prop_map(|(id, x, y, w, h)| LayoutUpdate { id, x, y, w, h })
}

/// Item-level mutations
fn content_payload() -> impl Strategy<Value = EventPayload> {
    prop_oneof![
        ("[a-z]{1,8}", "[a-z]{0,12}").prop_map(|(title, description)| {
            EventPayload::WorkspaceCreated(WorkspaceCreated { title, description })
        }),
        arb_item().prop_map(|item| EventPayload::ItemCreated(ItemCreated { item })),
        prop::collection::vec(arb_item(), 1..4)
            .prop_map(|items| EventPayload::BulkItemsCreated(BulkItemsCreated { items })),
        (item_id(), prop::option::of("[a-z]{1,8}")).prop_map(|(id, name)| {
            EventPayload::ItemUpdated(ItemUpdated {
                id,
                changes: ItemChanges {
                    name,
                    ..ItemChanges::default()
                },
                source: None,
            })
        }),
        item_id().prop_map(|id| EventPayload::ItemDeleted(ItemDeleted { id })),
        prop::collection::vec(layout_update(), 1..4).prop_map(|layout_updates| {
            EventPayload::BulkItemsUpdated(BulkItemsUpdate::Layout { layout_updates })
        }),
        prop::collection::vec(arb_item(), 0..3)
            .prop_map(|items| EventPayload::BulkItemsUpdated(BulkItemsUpdate::Legacy { items })),
        "[a-z]{1,8}".prop_map(|title| EventPayload::GlobalTitleSet(GlobalTitleSet { title })),
    ]
}

/// Folder organization, deprecated tags, and the unknown fallback
fn organization_payload() -> impl Strategy<Value = EventPayload> {
    prop_oneof![
        (item_id(), prop::option::of(item_id())).prop_map(|(item_id, folder_id)| {
            EventPayload::ItemMovedToFolder(ItemMovedToFolder { item_id, folder_id })
        }),
        (prop::collection::vec(item_id(), 1..4), prop::option::of(item_id())).prop_map(
            |(item_ids, folder_id)| {
                EventPayload::ItemsMovedToFolder(ItemsMovedToFolder {
                    item_ids,
                    folder_id,
                })
            }
        ),
        (item_id(), prop::collection::vec(item_id(), 0..3)).prop_map(|(id, item_ids)| {
            EventPayload::FolderCreatedWithItems(FolderCreatedWithItems {
                folder: Item::new(id, ItemKind::Folder, "grouped"),
                item_ids,
            })
        }),
        item_id().prop_map(|id| EventPayload::FolderDeleted(FolderDeleted { id })),
        Just(EventPayload::Unknown),
    ]
}

fn arb_payload() -> impl Strategy<Value = EventPayload> {
    prop_oneof![content_payload(), organization_payload()]
}

/// Events with varied (and deliberately unordered) timestamps: ordering
/// comes from position in the sequence, never from the clock
fn arb_event() -> impl Strategy<Value = WorkspaceEvent> {
    (arb_payload(), 0i64..2_000_000).prop_map(|(payload, timestamp_ms)| {
        WorkspaceEvent::new_at(
            payload,
            "user-1",
            None,
            DateTime::from_timestamp_millis(timestamp_ms).unwrap(),
        )
    })
}

fn event_sequence() -> impl Strategy<Value = Vec<WorkspaceEvent>> {
    prop::collection::vec(arb_event(), 0..40)
}

fn workspace_id() -> Uuid {
    Uuid::parse_str("01934f4a-1000-7000-8000-000000001000").unwrap()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Replay is deterministic
    ///
    /// Given the same base state and the same sequence of events, the
    /// final state must always be identical.
    #[test]
    fn prop_replay_is_deterministic(events in event_sequence()) {
        let state1 = replay(WorkspaceState::empty(workspace_id()), events.iter());
        let state2 = replay(WorkspaceState::empty(workspace_id()), events.iter());

        prop_assert_eq!(state1, state2, "Same events must produce same state");
    }

    /// Property: Empty replay is identity
    ///
    /// Replaying zero events returns the base state unchanged, for any
    /// reachable base state.
    #[test]
    fn prop_empty_replay_is_identity(events in event_sequence()) {
        let base = replay(WorkspaceState::empty(workspace_id()), events.iter());
        let replayed = replay(base.clone(), std::iter::empty());

        prop_assert_eq!(replayed, base, "Empty replay must not change state");
    }

    /// Property: Replay is resumable at any split point
    ///
    /// Folding a prefix and then the remainder equals folding the whole
    /// log: replay(replay(S, E[..k]), E[k..]) == replay(S, E).
    #[test]
    fn prop_replay_is_resumable(
        events in event_sequence(),
        split in any::<prop::sample::Index>()
    ) {
        let k = if events.is_empty() { 0 } else { split.index(events.len() + 1) };

        let all_at_once = replay(WorkspaceState::empty(workspace_id()), events.iter());
        let prefix = replay(WorkspaceState::empty(workspace_id()), events[..k].iter());
        let resumed = replay(prefix, events[k..].iter());

        prop_assert_eq!(resumed, all_at_once, "Split replay must equal full replay");
    }

    /// Property: Event application is pure
    ///
    /// Applying the same event to the same state always produces the same
    /// result (referential transparency).
    #[test]
    fn prop_apply_event_is_pure(prefix in event_sequence(), event in arb_event()) {
        let state = replay(WorkspaceState::empty(workspace_id()), prefix.iter());

        let result1 = apply_event(state.clone(), &event);
        let result2 = apply_event(state, &event);

        prop_assert_eq!(result1, result2, "Same event on same state must produce same result");
    }

    /// Property: Item ids stay unique
    ///
    /// No sequence of events can produce two items with the same id.
    #[test]
    fn prop_item_ids_stay_unique(events in event_sequence()) {
        let state = replay(WorkspaceState::empty(workspace_id()), events.iter());

        let mut ids: Vec<&str> = state.items.iter().map(|item| item.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();

        prop_assert_eq!(ids.len(), total, "Item ids must be unique within a workspace");
    }

    /// Property: Folder references always resolve
    ///
    /// Every non-null folder_id in a reachable state references an
    /// existing folder item (moves to vanished folders are no-ops,
    /// folder deletions clear their children).
    #[test]
    fn prop_folder_refs_resolve(events in event_sequence()) {
        let state = replay(WorkspaceState::empty(workspace_id()), events.iter());

        for item in &state.items {
            if let Some(folder_id) = &item.folder_id {
                prop_assert!(
                    state.folder_exists(folder_id),
                    "Item {} references missing folder {}",
                    item.id,
                    folder_id
                );
            }
        }
    }

    /// Property: The workspace id survives every event
    #[test]
    fn prop_workspace_id_is_stable(events in event_sequence()) {
        let state = replay(WorkspaceState::empty(workspace_id()), events.iter());

        prop_assert_eq!(state.workspace_id, workspace_id());
    }

    /// Property: Serialization round-trips every event
    ///
    /// Whatever the generator produces must survive the wire format the
    /// durable log uses.
    #[test]
    fn prop_event_serialization_roundtrip(event in arb_event()) {
        let json = serde_json::to_string(&event).expect("Failed to serialize");
        let back: WorkspaceEvent = serde_json::from_str(&json).expect("Failed to deserialize");

        prop_assert_eq!(back, event);
    }
}
