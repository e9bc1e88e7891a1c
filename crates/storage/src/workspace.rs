use mygym_domain as domain;

use crate::{
    KeyValueStore, Store,
    migration::{SchemaVersion, migrate},
    record::{self, WorkspaceRecord},
};

pub const STORAGE_KEY: &str = "mygym.gyms";

#[must_use]
pub fn storage_key() -> &'static str {
    STORAGE_KEY
}

#[must_use]
pub fn storage_version() -> u8 {
    SchemaVersion::CURRENT.number()
}

impl<S: KeyValueStore> domain::WorkspaceRepository for Store<S> {
    fn read_workspace(&self) -> Result<Option<domain::Workspace>, domain::ReadError> {
        let Some(serialized) = self.kv.get(STORAGE_KEY)? else {
            return Ok(None);
        };

        if serialized.is_empty() {
            return Ok(None);
        }

        migrate(&serialized)
            .map(Some)
            .map_err(|err| domain::ReadError::Other(err.into()))
    }

    fn write_workspace(&self, workspace: &domain::Workspace) -> Result<(), domain::UpdateError> {
        let serialized = serde_json::to_string(&WorkspaceRecord {
            version: storage_version(),
            workspace: record::Workspace::from(workspace),
        })
        .map_err(|err| domain::UpdateError::Other(err.into()))?;

        Ok(self.kv.set(STORAGE_KEY, &serialized)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::{memory::MemoryStore, tests::data};
    use domain::WorkspaceRepository;

    #[test]
    fn test_read_workspace_missing() {
        let store = Store::new(MemoryStore::default());
        assert_eq!(store.read_workspace().unwrap(), None);

        let store = Store::new(MemoryStore::from([(STORAGE_KEY, "")]));
        assert_eq!(store.read_workspace().unwrap(), None);
    }

    #[test]
    fn test_round_trip() {
        let store = Store::new(MemoryStore::default());
        store.write_workspace(&data::WORKSPACE).unwrap();
        assert_eq!(store.read_workspace().unwrap(), Some(data::WORKSPACE.clone()));
    }

    #[test]
    fn test_write_workspace_format() {
        let store = Store::new(MemoryStore::default());
        store.write_workspace(&data::WORKSPACE).unwrap();

        let stored: Value =
            serde_json::from_str(&store.kv().get(STORAGE_KEY).unwrap().unwrap()).unwrap();

        assert_eq!(stored["version"], json!(storage_version()));
        assert_eq!(storage_key(), "mygym.gyms");
        assert_eq!(stored["workspace"]["selectedGymId"], json!("pulse-arena"));
        let device = &stored["workspace"]["gyms"][0]["devices"][0];
        assert_eq!(device["settingsLocked"], json!(true));
        assert_eq!(device["weightStackCount"], json!(2));
        assert_eq!(
            device["exercises"][0]["settingsValues"],
            json!({ "tenant-default": { "primary-user": { "setting-seat": "4" } } })
        );
        let training_log = &device["exercises"][0]["trainingLog"];
        assert_eq!(
            training_log["tenant-default"]["primary-user"][0]["performedAt"],
            json!("2024-03-01T18:30:00Z")
        );
    }

    #[test]
    fn test_read_workspace_invalid() {
        let store = Store::new(MemoryStore::from([(STORAGE_KEY, "{\"version\": 5")]));
        assert!(matches!(
            store.read_workspace(),
            Err(domain::ReadError::Other(_))
        ));

        let store = Store::new(MemoryStore::from([(
            STORAGE_KEY,
            r#"{"version": 9, "workspace": {}}"#,
        )]));
        let err = store.read_workspace().unwrap_err();
        assert_eq!(err.to_string(), "stored workspace has unsupported version 9");
    }

    #[test]
    fn test_read_workspace_partially_corrupted() {
        let store = Store::new(MemoryStore::from([(
            STORAGE_KEY,
            data::PARTIALLY_CORRUPTED_WORKSPACE,
        )]));
        let workspace = store.read_workspace().unwrap().unwrap();

        assert_eq!(
            workspace.gyms.iter().map(|g| g.id.as_str()).collect::<Vec<_>>(),
            vec!["pulse-arena"]
        );
        assert_eq!(workspace.selected_gym_id, Some("pulse-arena".into()));

        let device = &workspace.gyms[0].devices[0];
        assert!(device.settings_locked);
        assert_eq!(device.settings_definitions.len(), 1);

        let exercise = &device.exercises[0];
        assert_eq!(
            exercise.settings(&domain::TenantID::default_tenant(), &"primary-user".into()),
            Some(&BTreeMap::from([(
                domain::SettingID::from("setting-seat"),
                "4".to_string()
            )]))
        );

        let entries = exercise.entries(&domain::TenantID::default_tenant(), &"primary-user".into());
        assert_eq!(
            entries.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(),
            vec!["entry-3", "entry-1"]
        );
        assert_eq!(entries[0].loads, vec![10.5]);
        assert_eq!(entries[0].unit, domain::WeightUnit::Lb);

        assert_eq!(workspace.device_library.len(), 1);
    }

    #[test]
    fn test_write_workspace_unavailable() {
        let kv = MemoryStore::default();
        kv.set_available(false);
        let store = Store::new(&kv);
        assert!(matches!(
            store.write_workspace(&data::WORKSPACE),
            Err(domain::UpdateError::Storage(domain::StorageError::Unavailable))
        ));
        assert!(matches!(
            store.read_workspace(),
            Err(domain::ReadError::Storage(domain::StorageError::Unavailable))
        ));
    }
}
