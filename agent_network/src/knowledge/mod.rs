//! Shared knowledge - last-write-wins snapshots contributed by external systems.

use agent_model::Payload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The latest snapshot contributed by one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub source: String,
    pub data: Payload,
    pub timestamp: DateTime<Utc>,
}

/// One entry per source; a later write from the same source replaces the entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedKnowledgeStore {
    entries: HashMap<String, KnowledgeEntry>,
}

impl SharedKnowledgeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `source`, stamped with the current time.
    pub fn update(&mut self, source: impl Into<String>, data: Payload) {
        let source = source.into();
        let entry = KnowledgeEntry {
            source: source.clone(),
            data,
            timestamp: Utc::now(),
        };
        self.entries.insert(source, entry);
    }

    /// Get the entry for a source.
    pub fn get(&self, source: &str) -> Option<&KnowledgeEntry> {
        self.entries.get(source)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    /// Copy of the full mapping.
    pub fn snapshot(&self) -> HashMap<String, KnowledgeEntry> {
        self.entries.clone()
    }

    /// Known sources, sorted by name.
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<_> = self.entries.keys().map(String::as_str).collect();
        sources.sort_unstable();
        sources
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
