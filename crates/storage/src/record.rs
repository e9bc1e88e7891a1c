use std::collections::BTreeMap;

use chrono::SecondsFormat;
use mygym_domain as domain;

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct WorkspaceRecord {
    pub version: u8,
    pub workspace: Workspace,
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub gyms: Vec<Gym>,
    pub device_library: Vec<DeviceTemplate>,
    pub selected_gym_id: Option<String>,
}

impl From<&domain::Workspace> for Workspace {
    fn from(value: &domain::Workspace) -> Self {
        Self {
            gyms: value.gyms.iter().map(Gym::from).collect(),
            device_library: value.device_library.iter().map(DeviceTemplate::from).collect(),
            selected_gym_id: value.selected_gym_id.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct Gym {
    pub id: String,
    pub name: String,
    pub devices: Vec<Device>,
}

impl From<&domain::Gym> for Gym {
    fn from(value: &domain::Gym) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            devices: value.devices.iter().map(Device::from).collect(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct DeviceTemplate {
    pub id: String,
    pub name: String,
    pub tenant_id: String,
    pub published: bool,
    pub weight_stack_count: u8,
    pub settings_definitions: Vec<NamedItem>,
    pub exercises: Vec<NamedItem>,
}

impl From<&domain::DeviceTemplate> for DeviceTemplate {
    fn from(value: &domain::DeviceTemplate) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            tenant_id: value.tenant_id.to_string(),
            published: value.published,
            weight_stack_count: value.weight_stack_count.count(),
            settings_definitions: value
                .settings_definitions
                .iter()
                .map(NamedItem::from)
                .collect(),
            exercises: value.exercises.iter().map(NamedItem::from).collect(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub library_device_id: String,
    pub tenant_id: String,
    pub published: bool,
    pub weight_stack_count: u8,
    pub settings_locked: bool,
    pub settings_definitions: Vec<NamedItem>,
    pub exercises: Vec<Exercise>,
}

impl From<&domain::DeviceAssignment> for Device {
    fn from(value: &domain::DeviceAssignment) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            library_device_id: value.library_device_id.to_string(),
            tenant_id: value.tenant_id.to_string(),
            published: value.published,
            weight_stack_count: value.weight_stack_count.count(),
            settings_locked: value.settings_locked,
            settings_definitions: value
                .settings_definitions
                .iter()
                .map(NamedItem::from)
                .collect(),
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

/// Setting definitions and library exercises share the `{ id, name }` shape.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct NamedItem {
    pub id: String,
    pub name: String,
}

impl From<&domain::SettingDefinition> for NamedItem {
    fn from(value: &domain::SettingDefinition) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
        }
    }
}

impl From<&domain::ExerciseTemplate> for NamedItem {
    fn from(value: &domain::ExerciseTemplate) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub settings_values: BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>,
    pub training_log: BTreeMap<String, BTreeMap<String, Vec<TrainingEntry>>>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.to_string(),
            settings_values: value
                .settings_values
                .iter()
                .map(|(tenant_id, users)| {
                    (
                        tenant_id.to_string(),
                        users
                            .iter()
                            .map(|(user_id, values)| {
                                (
                                    user_id.to_string(),
                                    values
                                        .iter()
                                        .map(|(setting_id, v)| (setting_id.to_string(), v.clone()))
                                        .collect(),
                                )
                            })
                            .collect(),
                    )
                })
                .collect(),
            training_log: value
                .training_log
                .iter()
                .map(|(tenant_id, users)| {
                    (
                        tenant_id.to_string(),
                        users
                            .iter()
                            .map(|(user_id, entries)| {
                                (
                                    user_id.to_string(),
                                    entries.iter().map(TrainingEntry::from).collect(),
                                )
                            })
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(test, derive(serde::Deserialize))]
#[serde(rename_all = "camelCase")]
pub struct TrainingEntry {
    pub id: String,
    pub performed_at: String,
    pub loads: Vec<f64>,
    pub repetitions: u32,
    pub unit: String,
}

impl From<&domain::TrainingEntry> for TrainingEntry {
    fn from(value: &domain::TrainingEntry) -> Self {
        Self {
            id: value.id.to_string(),
            performed_at: value
                .performed_at
                .to_rfc3339_opts(SecondsFormat::AutoSi, true),
            loads: value.loads.clone(),
            repetitions: value.repetitions.into(),
            unit: value.unit.to_string(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct UserRecord {
    pub version: u8,
    pub user: User,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl From<&domain::UserProfile> for User {
    fn from(value: &domain::UserProfile) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
        }
    }
}

impl From<User> for domain::UserProfile {
    fn from(value: User) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
        }
    }
}
