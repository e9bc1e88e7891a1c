use log::debug;
use mygym_domain as domain;
use serde_json::Value;

use crate::{
    KeyValueStore, Store,
    record::{User, UserRecord},
};

pub const STORAGE_KEY: &str = "sessionatlas.user";
pub const STORAGE_VERSION: u8 = 1;

#[must_use]
pub fn storage_key() -> &'static str {
    STORAGE_KEY
}

#[must_use]
pub fn storage_version() -> u8 {
    STORAGE_VERSION
}

impl<S: KeyValueStore> domain::UserRepository for Store<S> {
    fn read_user(&self) -> Result<Option<domain::UserProfile>, domain::ReadError> {
        let Some(serialized) = self.kv.get(STORAGE_KEY)? else {
            return Ok(None);
        };

        if serialized.is_empty() {
            return Ok(None);
        }

        let record: Value = serde_json::from_str(&serialized)
            .map_err(|err| domain::ReadError::Other(err.into()))?;

        if record.get("version").and_then(Value::as_u64) != Some(u64::from(STORAGE_VERSION)) {
            debug!("ignoring stored user with unexpected version");
            return Ok(None);
        }

        match record.get("user").cloned().map(serde_json::from_value::<User>) {
            Some(Ok(user)) => Ok(Some(user.into())),
            _ => {
                debug!("ignoring stored user with invalid shape");
                Ok(None)
            }
        }
    }

    fn write_user(&self, user: &domain::UserProfile) -> Result<(), domain::UpdateError> {
        if user.id.is_empty() {
            return Err(domain::UpdateError::Invalid("user"));
        }

        let serialized = serde_json::to_string(&UserRecord {
            version: STORAGE_VERSION,
            user: User::from(user),
        })
        .map_err(|err| domain::UpdateError::Other(err.into()))?;

        Ok(self.kv.set(STORAGE_KEY, &serialized)?)
    }
}
