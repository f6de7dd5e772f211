//! Rolling activity log.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use fleetpulse_entity::activity::ActivityEntry;

/// Entries kept before the oldest are dropped.
const MAX_ENTRIES: usize = 1_000;

/// Bounded, append-only fleet activity log.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: RwLock<Vec<ActivityEntry>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, bus_id: Option<String>, message: impl Into<String>) -> ActivityEntry {
        let entry = ActivityEntry {
            id: Uuid::new_v4(),
            bus_id,
            message: message.into(),
            created_at: Utc::now(),
        };
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(|p| p.into_inner());
        entries.push(entry.clone());
        if entries.len() > MAX_ENTRIES {
            let excess = entries.len() - MAX_ENTRIES;
            entries.drain(..excess);
        }
        entry
    }

    /// Most recent entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<ActivityEntry> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        entries.iter().rev().take(limit).cloned().collect()
    }

    /// Entries relating to one bus, newest first.
    pub fn for_bus(&self, bus_id: &str) -> Vec<ActivityEntry> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        entries
            .iter()
            .rev()
            .filter(|e| e.bus_id.as_deref() == Some(bus_id))
            .cloned()
            .collect()
    }
}
