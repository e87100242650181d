// Copyright (c) 2025 - Cowboy AI, Inc.
//! Workspace Replay Tool
//!
//! Replays an exported workspace event log and prints the resulting state,
//! reporting advisory log anomalies along the way. Useful for inspecting
//! suspect logs and verifying exports offline.
//!
//! Input format: JSON Lines, one stored event per line, ascending by
//! version (the format produced by log export tooling).
//!
//! Run with: cargo run --bin workspace-replay -- <events.jsonl> [workspace-id]

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::{info, warn};
use uuid::Uuid;

use cim_workspace::aggregate::{replay, WorkspaceState};
use cim_workspace::event_store::StoredEvent;
use cim_workspace::events::validate_event_log;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: workspace-replay <events.jsonl> [workspace-id]")?;
    let workspace_id = match args.next() {
        Some(raw) => raw.parse::<Uuid>().context("invalid workspace id")?,
        None => Uuid::nil(),
    };

    let file = File::open(&path).with_context(|| format!("failed to open {path}"))?;
    let mut events: Vec<StoredEvent> = Vec::new();
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let stored: StoredEvent = serde_json::from_str(&line)
            .with_context(|| format!("malformed event on line {}", line_no + 1))?;
        events.push(stored);
    }
    events.sort_by_key(|stored| stored.version);
    info!("loaded {} events from {path}", events.len());

    for anomaly in validate_event_log(&events) {
        warn!("log anomaly: {anomaly}");
    }

    let state = replay(
        WorkspaceState::empty(workspace_id),
        events.iter().map(|stored| &stored.event),
    );

    print_summary(&state, events.len());

    Ok(())
}

fn print_summary(state: &WorkspaceState, event_count: usize) {
    println!("workspace  : {}", state.workspace_id);
    println!("title      : {}", state.title);
    println!("description: {}", state.description);
    println!("events     : {event_count}");
    println!("items      : {} ({} created)", state.items.len(), state.items_created);
    for item in &state.items {
        let folder = item
            .folder_id
            .as_deref()
            .map(|id| format!(" (in {id})"))
            .unwrap_or_default();
        println!("  [{}] {} {}{folder}", item.kind, item.id, item.name);
    }
}
