//! In-memory cart storage

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use super::{CartSnapshot, CartStorage, StorageError, validate_key};

/// Process-local storage. Values are kept as JSON so a round trip behaves like the
/// durable backends do.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw JSON under `key`, bypassing snapshot encoding.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the key is invalid or the lock is poisoned.
    pub fn insert_raw(&self, key: &str, json: impl Into<String>) -> Result<(), StorageError> {
        validate_key(key)?;

        self.entries
            .lock()
            .map_err(|_poisoned| StorageError::Poisoned)?
            .insert(key.to_string(), json.into());

        Ok(())
    }

    /// Raw JSON stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the lock is poisoned.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .map_err(|_poisoned| StorageError::Poisoned)?
            .get(key)
            .cloned())
    }
}

impl CartStorage for MemoryStorage {
    fn save(&self, key: &str, snapshot: &CartSnapshot) -> Result<(), StorageError> {
        let json = serde_json::to_string(snapshot)?;

        self.insert_raw(key, json)
    }

    fn load(&self, key: &str) -> Result<Option<CartSnapshot>, StorageError> {
        validate_key(key)?;

        self.get_raw(key)?
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(StorageError::from)
    }
}
