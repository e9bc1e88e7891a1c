use mygym_domain as domain;
use wasm_bindgen::JsValue;

use crate::KeyValueStore;

/// The browser's `localStorage`.
///
/// A missing window, disabled storage and denied access are reported as
/// [`domain::StorageError::Unavailable`].
pub struct LocalStorage;

impl LocalStorage {
    fn storage(
        window: Option<web_sys::Window>,
    ) -> Result<web_sys::Storage, domain::StorageError> {
        window
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(domain::StorageError::Unavailable)
    }
}

fn storage_error(err: &JsValue) -> domain::StorageError {
    domain::StorageError::Other(format!("{err:?}").into())
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, domain::StorageError> {
        Self::storage(web_sys::window())?
            .get_item(key)
            .map_err(|err| storage_error(&err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), domain::StorageError> {
        Self::storage(web_sys::window())?
            .set_item(key, value)
            .map_err(|err| storage_error(&err))
    }
}
