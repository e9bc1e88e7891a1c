use chrono::{DateTime, Utc};
use log::debug;

use crate::{
    DeviceAssignment, DeviceID, DeviceTemplate, EntryID, Exercise, ExerciseID, Gym, GymID, Name,
    Repetitions, SettingDefinition, SettingID, TemplateID, TenantID, TrainingEntry, UserID,
    WeightStackCount, WeightUnit, Workspace, normalize_load,
};

/// State transitions of the workspace.
///
/// Every action leaves `self` untouched and returns the next workspace. Rejected actions return
/// an unchanged copy.
impl Workspace {
    #[must_use]
    pub fn select_gym(&self, gym_id: &GymID) -> Self {
        let mut next = self.clone();
        if self.gym(gym_id).is_some() {
            next.selected_gym_id = Some(gym_id.clone());
        } else {
            debug!("ignored selection of unknown gym {gym_id}");
        }
        next
    }

    #[must_use]
    pub fn add_gym(&self, name: &str) -> Self {
        let mut next = self.clone();
        let Ok(name) = Name::new(name) else {
            debug!("rejected gym without name");
            return next;
        };
        let gym = Gym::new(GymID::generate(), name);
        next.selected_gym_id = Some(gym.id.clone());
        next.gyms.push(gym);
        next
    }

    #[must_use]
    pub fn rename_gym(&self, gym_id: &GymID, name: &str) -> Self {
        let mut next = self.clone();
        let Ok(name) = Name::new(name) else {
            debug!("rejected empty name for gym {gym_id}");
            return next;
        };
        if let Some(gym) = next.gyms.iter_mut().find(|gym| gym.id == *gym_id) {
            gym.name = name;
        }
        next
    }

    /// Remove a gym that has no devices. The first remaining gym is selected if the removed
    /// gym was selected.
    #[must_use]
    pub fn remove_gym(&self, gym_id: &GymID) -> Self {
        let mut next = self.clone();
        match self.gym(gym_id) {
            Some(gym) if gym.devices.is_empty() => {}
            Some(_) => {
                debug!("refused to remove gym {gym_id} with devices");
                return next;
            }
            None => return next,
        }
        next.gyms.retain(|gym| gym.id != *gym_id);
        if next.selected_gym_id.as_ref() == Some(gym_id) {
            next.selected_gym_id = next.gyms.first().map(|gym| gym.id.clone());
        }
        next
    }

    /// Create a library template and add an instance of it to the gym.
    #[must_use]
    pub fn create_device(
        &self,
        gym_id: &GymID,
        name: &str,
        exercise_name: &str,
        tenant_id: &TenantID,
    ) -> Self {
        let (Ok(name), Ok(exercise_name)) = (Name::new(name), Name::new(exercise_name)) else {
            debug!("rejected device without name or exercise name");
            return self.clone();
        };
        let template = DeviceTemplate::new(name, exercise_name, tenant_id.clone());
        self.add_instance(gym_id, &template)
            .map_or_else(
                || self.clone(),
                |mut next| {
                    next.device_library.push(template);
                    next
                },
            )
    }

    #[must_use]
    pub fn adopt_device_from_library(&self, gym_id: &GymID, template_id: &TemplateID) -> Self {
        if template_id.is_empty() {
            return self.clone();
        }
        let Some(template) = self.template(template_id) else {
            debug!("ignored adoption of unknown template {template_id}");
            return self.clone();
        };
        self.add_instance(gym_id, template)
            .unwrap_or_else(|| self.clone())
    }

    fn add_instance(&self, gym_id: &GymID, template: &DeviceTemplate) -> Option<Self> {
        let mut next = self.clone();
        let Some(gym) = next.gyms.iter_mut().find(|gym| gym.id == *gym_id) else {
            debug!("ignored device for unknown gym {gym_id}");
            return None;
        };
        gym.devices.push(template.instantiate());
        Some(next)
    }

    #[must_use]
    pub fn rename_device(&self, gym_id: &GymID, device_id: &DeviceID, name: &str) -> Self {
        let Ok(name) = Name::new(name) else {
            return self.clone();
        };
        self.update_device(gym_id, device_id, |device| {
            device.name = name;
            true
        })
    }

    #[must_use]
    pub fn publish_device(&self, gym_id: &GymID, device_id: &DeviceID) -> Self {
        self.update_device(gym_id, device_id, |device| {
            device.published = true;
            true
        })
    }

    #[must_use]
    pub fn update_weight_stack_count(
        &self,
        gym_id: &GymID,
        device_id: &DeviceID,
        weight_stack_count: WeightStackCount,
    ) -> Self {
        self.update_device(gym_id, device_id, |device| {
            device.weight_stack_count = weight_stack_count;
            true
        })
    }

    #[must_use]
    pub fn add_setting(&self, gym_id: &GymID, device_id: &DeviceID, name: &str) -> Self {
        let Ok(name) = Name::new(name) else {
            return self.clone();
        };
        self.update_device(gym_id, device_id, |device| {
            if !device.settings_editable() {
                debug!("refused to add setting to locked device {}", device.id);
                return false;
            }
            device.settings_definitions.push(SettingDefinition {
                id: SettingID::generate(),
                name,
            });
            true
        })
    }

    #[must_use]
    pub fn rename_setting(
        &self,
        gym_id: &GymID,
        device_id: &DeviceID,
        setting_id: &SettingID,
        name: &str,
    ) -> Self {
        let Ok(name) = Name::new(name) else {
            return self.clone();
        };
        self.update_device(gym_id, device_id, |device| {
            if !device.settings_editable() {
                debug!("refused to rename setting of locked device {}", device.id);
                return false;
            }
            let Some(definition) = device
                .settings_definitions
                .iter_mut()
                .find(|d| d.id == *setting_id)
            else {
                return false;
            };
            definition.name = name;
            true
        })
    }

    #[must_use]
    pub fn remove_setting(
        &self,
        gym_id: &GymID,
        device_id: &DeviceID,
        setting_id: &SettingID,
    ) -> Self {
        self.update_device(gym_id, device_id, |device| {
            if !device.settings_editable() {
                debug!("refused to remove setting of locked device {}", device.id);
                return false;
            }
            let len = device.settings_definitions.len();
            device.settings_definitions.retain(|d| d.id != *setting_id);
            device.settings_definitions.len() != len
        })
    }

    #[must_use]
    pub fn add_exercise(&self, gym_id: &GymID, device_id: &DeviceID, name: &str) -> Self {
        let Ok(name) = Name::new(name) else {
            return self.clone();
        };
        self.update_device(gym_id, device_id, |device| {
            device
                .exercises
                .push(Exercise::new(ExerciseID::generate(), name));
            true
        })
    }

    #[must_use]
    pub fn rename_exercise(
        &self,
        gym_id: &GymID,
        device_id: &DeviceID,
        exercise_id: &ExerciseID,
        name: &str,
    ) -> Self {
        let Ok(name) = Name::new(name) else {
            return self.clone();
        };
        self.update_device(gym_id, device_id, |device| {
            let Some(exercise) = device.exercise_mut(exercise_id) else {
                return false;
            };
            exercise.name = name;
            true
        })
    }

    /// Remove an exercise. The last exercise of a device is never removed.
    #[must_use]
    pub fn remove_exercise(
        &self,
        gym_id: &GymID,
        device_id: &DeviceID,
        exercise_id: &ExerciseID,
    ) -> Self {
        self.update_device(gym_id, device_id, |device| {
            if device.exercises.len() <= 1 {
                debug!("refused to remove last exercise of device {}", device.id);
                return false;
            }
            let len = device.exercises.len();
            device.exercises.retain(|e| e.id != *exercise_id);
            device.exercises.len() != len
        })
    }

    /// Store a setting value of the user under the device's tenant. A blank value removes the
    /// stored value. Recording a value locks the settings definitions of the device for good.
    #[must_use]
    pub fn update_setting_value(
        &self,
        gym_id: &GymID,
        device_id: &DeviceID,
        exercise_id: &ExerciseID,
        setting_id: &SettingID,
        value: &str,
        user_id: &UserID,
    ) -> Self {
        self.update_device(gym_id, device_id, |device| {
            let tenant_id = device.tenant_id.clone();
            let Some(exercise) = device.exercise_mut(exercise_id) else {
                return false;
            };
            exercise.set_setting_value(&tenant_id, user_id, setting_id, value);
            device.settings_locked =
                device.settings_locked || device.has_recorded_settings(user_id);
            true
        })
    }

    /// Record a set performed now.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn record_exercise_set(
        &self,
        gym_id: &GymID,
        device_id: &DeviceID,
        exercise_id: &ExerciseID,
        loads: &[f64],
        repetitions: u32,
        unit: WeightUnit,
        user_id: &UserID,
    ) -> Self {
        self.record_exercise_set_at(
            gym_id,
            device_id,
            exercise_id,
            loads,
            repetitions,
            unit,
            user_id,
            Utc::now(),
        )
    }

    /// Record a set performed at the given time.
    ///
    /// Negative and non-finite loads are discarded and the remaining loads are rounded to two
    /// decimals. The set is rejected if no load remains or `repetitions` is zero.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn record_exercise_set_at(
        &self,
        gym_id: &GymID,
        device_id: &DeviceID,
        exercise_id: &ExerciseID,
        loads: &[f64],
        repetitions: u32,
        unit: WeightUnit,
        user_id: &UserID,
        performed_at: DateTime<Utc>,
    ) -> Self {
        let loads = loads
            .iter()
            .filter_map(|load| normalize_load(*load).ok())
            .collect::<Vec<_>>();
        if loads.is_empty() {
            debug!("rejected set without valid load");
            return self.clone();
        }
        let Ok(repetitions) = Repetitions::new(repetitions) else {
            debug!("rejected set without repetitions");
            return self.clone();
        };
        self.update_device(gym_id, device_id, |device| {
            let tenant_id = device.tenant_id.clone();
            let Some(exercise) = device.exercise_mut(exercise_id) else {
                return false;
            };
            exercise.add_entry(
                &tenant_id,
                user_id,
                TrainingEntry {
                    id: EntryID::generate(),
                    performed_at,
                    loads,
                    repetitions,
                    unit,
                },
            );
            true
        })
    }

    /// Apply `update` to a device and carry the resulting shape over to its library template.
    ///
    /// `update` returns `false` if it rejected the change without modifying the device.
    fn update_device(
        &self,
        gym_id: &GymID,
        device_id: &DeviceID,
        update: impl FnOnce(&mut DeviceAssignment) -> bool,
    ) -> Self {
        let mut next = self.clone();
        let Some(device) = next
            .gyms
            .iter_mut()
            .filter(|gym| gym.id == *gym_id)
            .flat_map(|gym| gym.devices.iter_mut())
            .find(|device| device.id == *device_id)
        else {
            debug!("ignored update of unknown device {device_id} in gym {gym_id}");
            return self.clone();
        };
        if !update(device) {
            return self.clone();
        }
        let device = device.clone();
        for template in next
            .device_library
            .iter_mut()
            .filter(|template| template.id == device.library_device_id)
        {
            template.sync_from(&device);
        }
        next
    }
}
