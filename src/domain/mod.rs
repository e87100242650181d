// Copyright (c) 2025 - Cowboy AI, Inc.
//! Workspace Domain Models
//!
//! Value objects of the workspace domain:
//!
//! - [`Item`] - the polymorphic workspace entity (note, pdf, folder, ...)
//! - [`ItemKind`] - open-set item type taxonomy
//! - [`ItemLayout`] - spatial canvas placement
//! - [`ItemChanges`] - partial patch applied by ITEM_UPDATED
//! - [`LayoutUpdate`] - per-item patch of the bulk layout event
//!
//! The aggregate root built from these lives in [`crate::aggregate`];
//! everything here is pure data with serde representations matching the
//! historical log format.

pub mod item;

pub use item::{Item, ItemChanges, ItemKind, ItemLayout, LayoutUpdate};
