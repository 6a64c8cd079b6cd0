//! In-memory key-value storage.
//!
//! # Responsibility
//! - Provide a non-durable `KeyValueStore` for tests and smoke probes.
//!
//! # Invariants
//! - Same visibility semantics as the SQLite store: a `set` fully
//!   replaces the payload and is observed by every later `get`.

use crate::storage::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value store backed by a process-local map.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, payload: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), payload.to_string());
        Ok(())
    }
}
