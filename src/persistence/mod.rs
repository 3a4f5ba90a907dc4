//! Key/value score storage
//!
//! Features:
//! - Flat string keys mapped to integer values
//! - Batched edits committed all-or-nothing
//! - In-memory store for tests and headless runs
//! - JSON file store with tmp → rename commits

pub mod file;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

pub use file::JsonFileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A batch of removals followed by writes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreEdit {
    pub removals: Vec<String>,
    pub writes: Vec<(String, i64)>,
}

impl StoreEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remove(&mut self, key: impl Into<String>) -> &mut Self {
        self.removals.push(key.into());
        self
    }

    pub fn put(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.writes.push((key.into(), value));
        self
    }

    /// Apply the edit to a map in place
    pub fn apply_to(&self, map: &mut BTreeMap<String, i64>) {
        for key in &self.removals {
            map.remove(key);
        }
        for (key, value) in &self.writes {
            map.insert(key.clone(), *value);
        }
    }
}

/// Persistent key-to-integer store
pub trait ScoreStore: Send {
    /// Every stored entry
    fn load_all(&self) -> Result<BTreeMap<String, i64>, StoreError>;

    /// Apply `edit` atomically: readers see either none or all of it
    fn commit(&mut self, edit: &StoreEdit) -> Result<(), StoreError>;
}

/// Shared in-memory store. Clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, i64>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K: Into<String>>(entries: impl IntoIterator<Item = (K, i64)>) -> Self {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, i64> {
        self.entries.lock().clone()
    }
}

impl ScoreStore for MemoryStore {
    fn load_all(&self) -> Result<BTreeMap<String, i64>, StoreError> {
        Ok(self.snapshot())
    }

    fn commit(&mut self, edit: &StoreEdit) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        edit.apply_to(&mut entries);
        Ok(())
    }
}
