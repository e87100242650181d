// Copyright (c) 2025 - Cowboy AI, Inc.
//! Workspace Item Value Objects
//!
//! An [`Item`] is the polymorphic entity a workspace contains: notes, PDFs,
//! flashcard decks, folders, videos, quizzes. Folder membership is a weak
//! back-reference (`folder_id`), never ownership: deleting a folder clears
//! the reference on its former children, it does not delete them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Item type taxonomy
///
/// The known kinds are closed for reducer purposes (only [`ItemKind::Folder`]
/// changes behavior), but the set is open on the wire: kinds introduced by a
/// newer writer round-trip losslessly through [`ItemKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemKind {
    /// Free-form text note
    Note,
    /// Uploaded PDF document
    Pdf,
    /// Flashcard deck
    FlashcardDeck,
    /// Folder grouping other items
    Folder,
    /// Embedded YouTube video
    Youtube,
    /// Generated quiz
    Quiz,
    /// Kind unknown to this version of the engine
    Other(String),
}

impl ItemKind {
    /// Whether this item can contain other items
    pub fn is_folder(&self) -> bool {
        matches!(self, ItemKind::Folder)
    }

    /// Wire representation of the kind tag
    pub fn as_str(&self) -> &str {
        match self {
            ItemKind::Note => "note",
            ItemKind::Pdf => "pdf",
            ItemKind::FlashcardDeck => "flashcard-deck",
            ItemKind::Folder => "folder",
            ItemKind::Youtube => "youtube",
            ItemKind::Quiz => "quiz",
            ItemKind::Other(kind) => kind,
        }
    }
}

impl From<String> for ItemKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "note" => ItemKind::Note,
            "pdf" => ItemKind::Pdf,
            "flashcard-deck" => ItemKind::FlashcardDeck,
            "folder" => ItemKind::Folder,
            "youtube" => ItemKind::Youtube,
            "quiz" => ItemKind::Quiz,
            _ => ItemKind::Other(kind),
        }
    }
}

impl From<ItemKind> for String {
    fn from(kind: ItemKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spatial placement of an item on the workspace canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemLayout {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A single entity within a workspace
///
/// Item ids are client-generated strings, unique within a workspace and
/// never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable item identifier
    pub id: String,

    /// Type tag
    #[serde(rename = "type")]
    pub kind: ItemKind,

    /// Display name
    pub name: String,

    /// Free-form type-specific payload
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,

    /// Weak reference to a containing folder item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,

    /// Canvas placement; cleared when the item moves between folders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<ItemLayout>,

    /// Origin of the most recent ITEM_UPDATED mutation (user action, AI
    /// tool, import)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_source: Option<String>,
}

impl Item {
    /// Create an item with the given id, kind, and name
    pub fn new(id: impl Into<String>, kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            data: Value::Null,
            folder_id: None,
            layout: None,
            last_update_source: None,
        }
    }

    /// Attach a data payload
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Place the item on the canvas
    pub fn with_layout(mut self, layout: ItemLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Assign the item to a folder
    pub fn with_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }
}

/// Partial patch applied by an ITEM_UPDATED event
///
/// Absent fields leave the item untouched. A present `data` replaces the
/// payload wholesale (shallow merge semantics of the historical log format).
/// Folder membership changes go through the dedicated move events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<ItemLayout>,
}

/// Per-item layout patch carried by the BULK_ITEMS_UPDATED layout form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutUpdate {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl LayoutUpdate {
    /// The layout this patch resolves to
    pub fn layout(&self) -> ItemLayout {
        ItemLayout {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}
