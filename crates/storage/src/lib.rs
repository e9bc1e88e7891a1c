#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use mygym_domain as domain;

#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod log;
pub mod memory;
pub mod migration;
mod normalize;
pub mod record;
pub mod user;
pub mod workspace;

/// Synchronous string key-value storage, shaped like the browser's `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, domain::StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), domain::StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, domain::StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), domain::StorageError> {
        (**self).set(key, value)
    }
}

/// Repository for the workspace and the user profile backed by a key-value store.
pub struct Store<S> {
    kv: S,
}

impl<S: KeyValueStore> Store<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }
}
