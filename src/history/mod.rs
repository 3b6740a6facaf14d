//! Lookup history.
//!
//! A bounded, most-recent-first log of past lookups, keyed by query string.
//! The CLI persists it as a JSON array; the server never touches it.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::QueryKind;
use crate::config::MAX_HISTORY;
use crate::lookup::AggregatedResult;

/// One remembered lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub query: String,
    #[serde(rename = "type")]
    pub kind: QueryKind,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl From<&AggregatedResult> for HistoryItem {
    fn from(result: &AggregatedResult) -> Self {
        let geo = result.geo.as_ref();
        HistoryItem {
            query: result.query.clone(),
            kind: result.query_kind,
            city: geo.and_then(|g| g.city()).unwrap_or_default().to_string(),
            country: geo.and_then(|g| g.country()).unwrap_or_default().to_string(),
            timestamp: result.timestamp,
        }
    }
}

/// Capacity-bounded history, newest first. No two items share a query.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    items: Vec<HistoryItem>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        History {
            items: Vec::new(),
            capacity,
        }
    }

    /// Records `item` as the most recent entry.
    ///
    /// An existing entry for the same query is replaced, and the oldest entry
    /// is evicted once the history is over capacity.
    pub fn add(&mut self, item: HistoryItem) {
        self.items.retain(|existing| existing.query != item.query);
        self.items.insert(0, item);
        self.items.truncate(self.capacity);
    }

    /// Removes the entry for `query`. Returns whether one existed.
    pub fn remove(&mut self, query: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| existing.query != query);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Entries, newest first.
    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Loads the history stored at `path`.
    ///
    /// A missing, unreadable or corrupt file yields an empty history; the
    /// problem is logged and the next `save()` overwrites the file.
    pub fn load(path: &Path) -> Self {
        let mut history = History::new();
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return history,
            Err(e) => {
                log::warn!("Could not read history file {}: {}", path.display(), e);
                return history;
            }
        };

        match serde_json::from_str::<Vec<HistoryItem>>(&data) {
            Ok(mut items) => {
                items.truncate(history.capacity);
                history.items = items;
            }
            Err(e) => log::warn!("Ignoring corrupt history file {}: {}", path.display(), e),
        }
        history
    }

    /// Writes the history to `path` as a JSON array, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self.items)?;
        fs::write(path, json)?;
        Ok(())
    }
}
