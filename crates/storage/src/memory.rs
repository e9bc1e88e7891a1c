use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use mygym_domain as domain;

use crate::KeyValueStore;

/// In-process key-value store, used for tests and for hosts without persistent storage.
#[derive(Debug)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    available: AtomicBool,
}

impl MemoryStore {
    /// Simulate storage that rejects every access, e.g. when the quota is exceeded or storage is
    /// disabled by the browser.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Relaxed);
    }

    fn check_available(&self) -> Result<(), domain::StorageError> {
        if self.available.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(domain::StorageError::Unavailable)
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MemoryStore {
    fn from(entries: [(&str, &str); N]) -> Self {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect(),
            ),
            available: AtomicBool::new(true),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, domain::StorageError> {
        self.check_available()?;
        let entries = self
            .entries
            .lock()
            .map_err(|_| domain::StorageError::Unavailable)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), domain::StorageError> {
        self.check_available()?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| domain::StorageError::Unavailable)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
