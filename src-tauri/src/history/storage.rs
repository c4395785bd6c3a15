//! Storage backends for the recent-contacts list.
//!
//! The store only ever reads or writes the whole serialized list under a
//! single key, so a backend is a single-slot text cell.

use crate::error::StoreError;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage key, also used as the file stem on disk.
pub const HISTORY_KEY: &str = "chat_history";

/// A single-slot text store.
pub trait HistoryStorage: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&self, contents: &str) -> Result<(), StoreError>;
}

/// JSON file under the user's config directory.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/direct-chat/chat_history.json` (platform equivalent on
    /// macOS and Windows).
    pub fn default_location() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("direct-chat");
        Self::new(dir.join(format!("{}.json", HISTORY_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-process storage, used by tests and headless callers.
#[derive(Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the slot, e.g. with data written by an older version.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(contents.into())),
        }
    }

    /// Current raw contents of the slot.
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl HistoryStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(contents.to_string());
        }
        Ok(())
    }
}

// Lets a caller keep a handle on the backend it hands to the store.
impl<S: HistoryStorage + ?Sized> HistoryStorage for std::sync::Arc<S> {
    fn read(&self) -> Result<Option<String>, StoreError> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        (**self).write(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nope.json"));
        assert!(storage.read().unwrap().is_none());
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("history.json"));
        storage.write("[]").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn default_location_uses_history_key() {
        let storage = FileStorage::default_location();
        assert!(storage.path().ends_with("direct-chat/chat_history.json"));
    }
}
