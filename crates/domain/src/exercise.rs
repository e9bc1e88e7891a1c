use std::collections::BTreeMap;

use crate::{ExerciseID, Name, SettingID, TenantID, TrainingEntry, UserID, sort_entries};

/// Setting values per tenant and user.
pub type SettingsValues = BTreeMap<TenantID, BTreeMap<UserID, BTreeMap<SettingID, String>>>;

/// Recorded sets per tenant and user, newest first.
pub type TrainingLog = BTreeMap<TenantID, BTreeMap<UserID, Vec<TrainingEntry>>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub settings_values: SettingsValues,
    pub training_log: TrainingLog,
}

impl Exercise {
    #[must_use]
    pub fn new(id: ExerciseID, name: Name) -> Self {
        Self {
            id,
            name,
            settings_values: SettingsValues::new(),
            training_log: TrainingLog::new(),
        }
    }

    #[must_use]
    pub fn settings(
        &self,
        tenant_id: &TenantID,
        user_id: &UserID,
    ) -> Option<&BTreeMap<SettingID, String>> {
        self.settings_values.get(tenant_id)?.get(user_id)
    }

    #[must_use]
    pub fn entries(&self, tenant_id: &TenantID, user_id: &UserID) -> &[TrainingEntry] {
        self.training_log
            .get(tenant_id)
            .and_then(|users| users.get(user_id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the user has a non-blank value for any setting under the tenant.
    #[must_use]
    pub fn has_recorded_settings(&self, tenant_id: &TenantID, user_id: &UserID) -> bool {
        self.settings(tenant_id, user_id)
            .is_some_and(|values| values.values().any(|v| !v.trim().is_empty()))
    }

    /// Whether any user under any tenant has a non-blank setting value.
    #[must_use]
    pub fn has_any_recorded_settings(&self) -> bool {
        self.settings_values
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(BTreeMap::values)
            .any(|v| !v.trim().is_empty())
    }

    /// Store a trimmed setting value. A blank value removes the stored value, and users or
    /// tenants left without values are removed as well.
    pub fn set_setting_value(
        &mut self,
        tenant_id: &TenantID,
        user_id: &UserID,
        setting_id: &SettingID,
        value: &str,
    ) {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            let Some(users) = self.settings_values.get_mut(tenant_id) else {
                return;
            };
            if let Some(values) = users.get_mut(user_id) {
                values.remove(setting_id);
                if values.is_empty() {
                    users.remove(user_id);
                }
            }
            if users.is_empty() {
                self.settings_values.remove(tenant_id);
            }
            return;
        }

        self.settings_values
            .entry(tenant_id.clone())
            .or_default()
            .entry(user_id.clone())
            .or_default()
            .insert(setting_id.clone(), trimmed.to_string());
    }

    /// Add an entry to the user's log and keep the log ordered newest first.
    pub fn add_entry(&mut self, tenant_id: &TenantID, user_id: &UserID, entry: TrainingEntry) {
        let entries = self
            .training_log
            .entry(tenant_id.clone())
            .or_default()
            .entry(user_id.clone())
            .or_default();
        entries.insert(0, entry);
        sort_entries(entries);
    }
}
