use log::debug;
use mygym_domain as domain;
use serde_json::Value;

use crate::normalize;

/// Layouts of the persisted workspace record.
#[derive(strum::FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SchemaVersion {
    /// `{ gyms: [{ id, name }] }`
    GymList = 1,
    /// `{ workspace }` with gyms, devices and the device library
    Workspace = 2,
    /// Setting values are keyed by tenant.
    Settings = 3,
    /// Devices and templates carry `weightStackCount`.
    WeightStacks = 4,
    /// Exercises carry `trainingLog`.
    TrainingLog = 5,
}

impl SchemaVersion {
    pub const CURRENT: Self = Self::TrainingLog;

    #[must_use]
    pub fn number(self) -> u8 {
        self as u8
    }
}

#[derive(thiserror::Error, Debug)]
pub enum MigrationError {
    #[error("failed to parse stored workspace: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("stored workspace has no version")]
    MissingVersion,
    #[error("stored workspace has unsupported version {0}")]
    UnsupportedVersion(u64),
    #[error("stored workspace has invalid {0}")]
    InvalidShape(&'static str),
}

/// Upgrade a stored workspace record of any supported version to a normalized workspace.
pub fn migrate(serialized: &str) -> Result<domain::Workspace, MigrationError> {
    let record: Value = serde_json::from_str(serialized)?;
    let version = record
        .get("version")
        .and_then(Value::as_u64)
        .ok_or(MigrationError::MissingVersion)?;
    let schema = u8::try_from(version)
        .ok()
        .and_then(SchemaVersion::from_repr)
        .ok_or(MigrationError::UnsupportedVersion(version))?;

    if schema != SchemaVersion::CURRENT {
        debug!("migrating stored workspace from version {version}");
    }

    match schema {
        SchemaVersion::GymList => from_gym_list(&record),
        SchemaVersion::Workspace
        | SchemaVersion::Settings
        | SchemaVersion::WeightStacks
        | SchemaVersion::TrainingLog => from_workspace(&record),
    }
}

fn from_gym_list(record: &Value) -> Result<domain::Workspace, MigrationError> {
    let gyms = record
        .get("gyms")
        .and_then(Value::as_array)
        .ok_or(MigrationError::InvalidShape("gyms"))?;

    Ok(domain::Workspace {
        gyms: gyms.iter().filter_map(normalize::gym).collect(),
        device_library: vec![],
        selected_gym_id: None,
    }
    .normalized())
}

fn from_workspace(record: &Value) -> Result<domain::Workspace, MigrationError> {
    record
        .get("workspace")
        .and_then(normalize::workspace)
        .ok_or(MigrationError::InvalidShape("workspace"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_current_version() {
        assert_eq!(SchemaVersion::CURRENT.number(), 5);
    }

    #[test]
    fn test_migrate_gym_list() {
        let workspace = migrate(
            &json!({
                "version": 1,
                "gyms": [{ "id": "g1", "name": "Atlas" }, { "id": "g2", "name": "" }]
            })
            .to_string(),
        )
        .unwrap();

        assert_eq!(workspace.gyms.len(), 1);
        assert_eq!(workspace.gyms[0].name.as_str(), "Atlas");
        assert!(workspace.gyms[0].devices.is_empty());
        assert!(workspace.device_library.is_empty());
        assert_eq!(workspace.selected_gym_id, Some("g1".into()));
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    fn test_migrate_workspace(#[case] version: u8) {
        let workspace = migrate(
            &json!({
                "version": version,
                "workspace": {
                    "gyms": [{
                        "id": "g1",
                        "name": "Atlas",
                        "devices": [{
                            "id": "d1",
                            "name": "Rower",
                            "libraryDeviceId": "device-1",
                            "exercises": [{ "id": "x1", "name": "Rowing" }]
                        }]
                    }],
                    "deviceLibrary": [{ "id": "device-1", "name": "Rower" }],
                    "selectedGymId": "g1"
                }
            })
            .to_string(),
        )
        .unwrap();

        assert_eq!(workspace.gyms[0].devices[0].exercises[0].id.as_str(), "x1");
        assert_eq!(
            workspace.gyms[0].devices[0].weight_stack_count,
            domain::WeightStackCount::One
        );
        assert_eq!(workspace.device_library.len(), 1);
        assert_eq!(workspace.selected_gym_id, Some("g1".into()));
    }

    #[rstest]
    #[case(json!({ "version": 0, "workspace": {} }), "unsupported version 0")]
    #[case(json!({ "version": 6, "workspace": {} }), "unsupported version 6")]
    #[case(json!({ "version": 300, "workspace": {} }), "unsupported version 300")]
    #[case(json!({ "workspace": {} }), "no version")]
    #[case(json!({ "version": "5", "workspace": {} }), "no version")]
    #[case(json!({ "version": 1, "gyms": {} }), "invalid gyms")]
    #[case(json!({ "version": 5, "workspace": [] }), "invalid workspace")]
    #[case(json!({ "version": 5 }), "invalid workspace")]
    fn test_migrate_invalid(#[case] record: Value, #[case] message: &str) {
        let err = migrate(&record.to_string()).unwrap_err();
        assert!(err.to_string().ends_with(message), "{err}");
    }

    #[test]
    fn test_migrate_malformed() {
        assert!(matches!(
            migrate("{\"version\": 5, "),
            Err(MigrationError::Parse(_))
        ));
    }
}
