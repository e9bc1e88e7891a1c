//! Lenient conversion of stored JSON into domain values.
//!
//! Every function either yields a valid domain value or rejects the record. Invalid records are
//! dropped individually, so a partially corrupted store still yields everything that is intact.

use std::collections::BTreeMap;

use log::debug;
use mygym_domain as domain;
use serde_json::{Map, Value};

pub fn workspace(value: &Value) -> Option<domain::Workspace> {
    let object = value.as_object()?;

    Some(
        domain::Workspace {
            gyms: collect(object.get("gyms"), gym, "gym"),
            device_library: collect(object.get("deviceLibrary"), template, "library device"),
            selected_gym_id: object
                .get("selectedGymId")
                .and_then(Value::as_str)
                .map(domain::GymID::from),
        }
        .normalized(),
    )
}

pub fn gym(value: &Value) -> Option<domain::Gym> {
    let mut gym = domain::Gym::new(id(value)?, name(value, "name")?);
    gym.devices = collect(value.get("devices"), device, "device");
    Some(gym)
}

fn device(value: &Value) -> Option<domain::DeviceAssignment> {
    let name = name(value, "name")?;
    let mut exercises = collect(value.get("exercises"), exercise, "exercise");

    if exercises.is_empty() {
        exercises.push(domain::Exercise::new(
            domain::ExerciseID::generate(),
            name.clone(),
        ));
    }

    let settings_locked = flag(value, "settingsLocked")
        || exercises.iter().any(domain::Exercise::has_any_recorded_settings);

    Some(domain::DeviceAssignment {
        id: id(value)?,
        name,
        library_device_id: string(value, "libraryDeviceId")?.into(),
        tenant_id: tenant_id(value),
        published: flag(value, "published"),
        weight_stack_count: weight_stack_count(value),
        settings_locked,
        settings_definitions: collect(
            value.get("settingsDefinitions"),
            setting_definition,
            "setting definition",
        ),
        exercises,
    })
}

fn template(value: &Value) -> Option<domain::DeviceTemplate> {
    Some(domain::DeviceTemplate {
        id: id(value)?,
        name: name(value, "name")?,
        tenant_id: tenant_id(value),
        published: flag(value, "published"),
        weight_stack_count: weight_stack_count(value),
        settings_definitions: collect(
            value.get("settingsDefinitions"),
            setting_definition,
            "setting definition",
        ),
        exercises: collect(value.get("exercises"), exercise_template, "library exercise"),
    })
}

fn setting_definition(value: &Value) -> Option<domain::SettingDefinition> {
    Some(domain::SettingDefinition {
        id: id(value)?,
        name: name(value, "name")?,
    })
}

fn exercise_template(value: &Value) -> Option<domain::ExerciseTemplate> {
    Some(domain::ExerciseTemplate {
        id: id(value)?,
        name: name(value, "name")?,
    })
}

fn exercise(value: &Value) -> Option<domain::Exercise> {
    let mut exercise = domain::Exercise::new(id(value)?, name(value, "name")?);
    exercise.settings_values = settings_values(value.get("settingsValues"));
    exercise.training_log = training_log(value.get("trainingLog"));
    Some(exercise)
}

/// Setting values are either keyed by tenant and user, or in the legacy shape keyed by user only.
/// Legacy values are assigned to the default tenant.
fn settings_values(value: Option<&Value>) -> domain::SettingsValues {
    let Some(tenants) = value.and_then(Value::as_object) else {
        return domain::SettingsValues::new();
    };

    if is_legacy_settings_values(tenants) {
        let users = user_settings_values(tenants);
        if users.is_empty() {
            return domain::SettingsValues::new();
        }
        debug!("migrating legacy setting values to default tenant");
        return BTreeMap::from([(domain::TenantID::default_tenant(), users)]);
    }

    tenants
        .iter()
        .filter(|(tenant_id, _)| !tenant_id.is_empty())
        .filter_map(|(tenant_id, users)| {
            let users = user_settings_values(users.as_object()?);
            (!users.is_empty()).then(|| (domain::TenantID::from(tenant_id.as_str()), users))
        })
        .collect()
}

fn is_legacy_settings_values(values: &Map<String, Value>) -> bool {
    !values.is_empty()
        && values.values().all(|user_values| {
            user_values
                .as_object()
                .is_some_and(|settings| settings.values().all(Value::is_string))
        })
}

fn user_settings_values(
    users: &Map<String, Value>,
) -> BTreeMap<domain::UserID, BTreeMap<domain::SettingID, String>> {
    users
        .iter()
        .filter(|(user_id, _)| !user_id.is_empty())
        .filter_map(|(user_id, settings)| {
            let settings = settings
                .as_object()?
                .iter()
                .filter(|(setting_id, _)| !setting_id.is_empty())
                .filter_map(|(setting_id, value)| {
                    let value = value.as_str()?.to_string();
                    Some((domain::SettingID::from(setting_id.as_str()), value))
                })
                .collect::<BTreeMap<_, _>>();
            (!settings.is_empty()).then(|| (domain::UserID::from(user_id.as_str()), settings))
        })
        .collect()
}

fn training_log(value: Option<&Value>) -> domain::TrainingLog {
    let Some(tenants) = value.and_then(Value::as_object) else {
        return domain::TrainingLog::new();
    };

    tenants
        .iter()
        .filter(|(tenant_id, _)| !tenant_id.is_empty())
        .filter_map(|(tenant_id, users)| {
            let users = users
                .as_object()?
                .iter()
                .filter(|(user_id, _)| !user_id.is_empty())
                .filter_map(|(user_id, entries)| {
                    let mut entries = collect(Some(entries), training_entry, "training entry");
                    domain::sort_entries(&mut entries);
                    (!entries.is_empty()).then(|| (domain::UserID::from(user_id.as_str()), entries))
                })
                .collect::<BTreeMap<_, _>>();
            (!users.is_empty()).then(|| (domain::TenantID::from(tenant_id.as_str()), users))
        })
        .collect()
}

fn training_entry(value: &Value) -> Option<domain::TrainingEntry> {
    let loads = value
        .get("loads")?
        .as_array()?
        .iter()
        .filter_map(load)
        .collect::<Vec<_>>();

    if loads.is_empty() {
        return None;
    }

    Some(domain::TrainingEntry {
        id: id(value)?,
        performed_at: domain::parse_timestamp(string(value, "performedAt")?)?,
        loads,
        repetitions: repetitions(value.get("repetitions")?)?,
        unit: domain::WeightUnit::from_tag(value.get("unit").and_then(Value::as_str)),
    })
}

fn load(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => domain::normalize_load(number.as_f64()?).ok(),
        Value::String(string) => domain::parse_load(string).ok(),
        _ => None,
    }
}

fn repetitions(value: &Value) -> Option<domain::Repetitions> {
    match value {
        Value::Number(number) => domain::Repetitions::try_from(number.as_f64()?).ok(),
        Value::String(string) => domain::Repetitions::try_from(string.as_str()).ok(),
        _ => None,
    }
}

/// Parse every element of an array, dropping the ones that are invalid. Anything other than an
/// array yields no elements.
fn collect<T>(value: Option<&Value>, parse: impl Fn(&Value) -> Option<T>, entity: &str) -> Vec<T> {
    let Some(values) = value.and_then(Value::as_array) else {
        return vec![];
    };

    let parsed = values.iter().filter_map(parse).collect::<Vec<_>>();

    if parsed.len() < values.len() {
        debug!("dropped {} invalid {entity} records", values.len() - parsed.len());
    }

    parsed
}

fn id<T: for<'a> From<&'a str>>(value: &Value) -> Option<T> {
    string(value, "id").map(T::from)
}

fn string<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn name(value: &Value, key: &str) -> Option<domain::Name> {
    domain::Name::new(value.get(key)?.as_str()?).ok()
}

fn flag(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn tenant_id(value: &Value) -> domain::TenantID {
    string(value, "tenantId").map_or_else(domain::TenantID::default_tenant, domain::TenantID::from)
}

fn weight_stack_count(value: &Value) -> domain::WeightStackCount {
    match value.get("weightStackCount").and_then(Value::as_f64) {
        Some(count) if (count - 2.0).abs() < f64::EPSILON => domain::WeightStackCount::Two,
        _ => domain::WeightStackCount::One,
    }
}
