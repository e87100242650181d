// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-workspace
//!
//! Provides deterministic test data for replay and compaction tests.
//! All UUIDs and timestamps are fixed constants to ensure tests are
//! reproducible.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use cim_workspace::domain::{Item, ItemKind, ItemLayout};
use cim_workspace::events::workspace::*;

// Fixed test UUIDs (UUID v7 format, but deterministic for testing)
pub const WORKSPACE_ID_1: &str = "01934f4a-1000-7000-8000-000000001000";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

/// Parse a fixed UUID from a constant string
pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

/// The fixture workspace id
pub fn workspace_id() -> Uuid {
    parse_uuid(WORKSPACE_ID_1)
}

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// Wrap a payload in an event with fixed attribution and timestamp
pub fn event(payload: EventPayload) -> WorkspaceEvent {
    WorkspaceEvent::new_at(payload, "user-1", Some("Alice".to_string()), fixed_timestamp())
}

/// A note item fixture
pub fn note(id: &str, name: &str) -> Item {
    Item::new(id, ItemKind::Note, name)
}

/// A folder item fixture
pub fn folder(id: &str, name: &str) -> Item {
    Item::new(id, ItemKind::Folder, name)
}

/// A placed note fixture
pub fn placed_note(id: &str, name: &str) -> Item {
    note(id, name).with_layout(ItemLayout {
        x: 0.0,
        y: 0.0,
        w: 2.0,
        h: 2.0,
    })
}

/// ITEM_CREATED event fixture
pub fn item_created(item: Item) -> WorkspaceEvent {
    event(EventPayload::ItemCreated(ItemCreated { item }))
}

/// ITEM_DELETED event fixture
pub fn item_deleted(id: &str) -> WorkspaceEvent {
    event(EventPayload::ItemDeleted(ItemDeleted { id: id.to_string() }))
}

/// ITEM_MOVED_TO_FOLDER event fixture
pub fn item_moved(item_id: &str, folder_id: Option<&str>) -> WorkspaceEvent {
    event(EventPayload::ItemMovedToFolder(ItemMovedToFolder {
        item_id: item_id.to_string(),
        folder_id: folder_id.map(str::to_string),
    }))
}

/// GLOBAL_TITLE_SET event fixture
pub fn title_set(title: &str) -> WorkspaceEvent {
    event(EventPayload::GlobalTitleSet(GlobalTitleSet {
        title: title.to_string(),
    }))
}
