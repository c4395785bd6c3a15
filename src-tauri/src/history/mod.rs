//! Recent contacts: a capped, de-duplicated, most-recent-first list.
//!
//! The store owns the list and its persistence. Every mutation re-writes
//! the whole list; the UI only reads it and asks the store to change it.

pub mod storage;

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

pub use storage::{FileStorage, HistoryStorage, MemoryStorage, HISTORY_KEY};

/// Maximum number of contacts kept.
pub const MAX_HISTORY: usize = 20;

/// One previously contacted number, in its persisted shape.
///
/// Every field has a default so entries written by older or newer versions
/// still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRecord {
    pub id: String,
    /// Local number, digits only.
    pub phone_number: String,
    /// Calling code + local number. The de-duplication key.
    pub full_number: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub country_iso: String,
}

impl ContactRecord {
    /// Build a record with a fresh id, stamped now.
    pub fn new(phone_number: &str, full_number: &str, country_iso: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            phone_number: phone_number.to_string(),
            full_number: full_number.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            country_iso: country_iso.to_string(),
        }
    }
}

pub struct RecencyStore {
    storage: Box<dyn HistoryStorage>,
    entries: Vec<ContactRecord>,
}

impl RecencyStore {
    /// Load the list from `storage`.
    ///
    /// Absent data gives an empty list. Unreadable or malformed data is
    /// logged, discarded, and replaced with an empty list on disk.
    pub fn load(storage: impl HistoryStorage + 'static) -> Self {
        let mut store = Self {
            storage: Box::new(storage),
            entries: Vec::new(),
        };

        let raw = match store.storage.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return store,
            Err(e) => {
                log::warn!("[HISTORY] Failed to read history: {}", e);
                return store;
            }
        };

        match parse_entries(&raw) {
            Ok(entries) => {
                log::info!("[HISTORY] Loaded {} contacts", entries.len());
                store.entries = entries;
            }
            Err(e) => {
                log::warn!("[HISTORY] Discarding malformed history: {}", e);
                store.persist_logged();
            }
        }
        store
    }

    /// Insert `record` at the front, replacing any entry with the same full
    /// number and evicting the oldest entries past [`MAX_HISTORY`].
    pub fn record(&mut self, record: ContactRecord) {
        self.entries.retain(|e| e.full_number != record.full_number);
        self.entries.insert(0, record);
        self.entries.truncate(MAX_HISTORY);
        self.persist_logged();
    }

    /// Delete the entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.persist_logged();
        }
        removed
    }

    /// Write the whole list to storage.
    pub fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.entries)?;
        self.storage.write(&json)
    }

    // Writes are fire-and-forget: the in-memory list stays authoritative.
    fn persist_logged(&self) {
        if let Err(e) = self.persist() {
            log::error!("[HISTORY] Failed to save history: {}", e);
        }
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[ContactRecord] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&ContactRecord> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse persisted history.
///
/// The top level must be a JSON array. Individual entries that are not
/// objects or lack a full number are skipped; a missing id is regenerated.
/// The cap and de-duplication are re-applied in case the file was edited.
fn parse_entries(raw: &str) -> Result<Vec<ContactRecord>, serde_json::Error> {
    let items: Vec<Value> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for item in items {
        let mut record = match serde_json::from_value::<ContactRecord>(item) {
            Ok(r) if !r.full_number.is_empty() => r,
            Ok(_) => {
                log::warn!("[HISTORY] Skipping entry without a number");
                continue;
            }
            Err(e) => {
                log::warn!("[HISTORY] Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !seen.insert(record.full_number.clone()) {
            continue;
        }
        if record.id.is_empty() {
            record.id = uuid::Uuid::new_v4().to_string();
        }
        entries.push(record);
        if entries.len() == MAX_HISTORY {
            break;
        }
    }
    Ok(entries)
}
