use crate::{DeviceID, Exercise, ExerciseID, Name, SettingID, TemplateID, TenantID, UserID};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WeightStackCount {
    #[default]
    One = 1,
    Two = 2,
}

impl WeightStackCount {
    #[must_use]
    pub fn count(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDefinition {
    pub id: SettingID,
    pub name: Name,
}

/// Exercise shape stored in the device library. Holds no per-user data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseTemplate {
    pub id: ExerciseID,
    pub name: Name,
}

/// Reusable device blueprint in the tenant's library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTemplate {
    pub id: TemplateID,
    pub name: Name,
    pub tenant_id: TenantID,
    pub published: bool,
    pub weight_stack_count: WeightStackCount,
    pub settings_definitions: Vec<SettingDefinition>,
    pub exercises: Vec<ExerciseTemplate>,
}

impl DeviceTemplate {
    /// Create an unpublished single-stack template with one exercise and no settings.
    #[must_use]
    pub fn new(name: Name, exercise_name: Name, tenant_id: TenantID) -> Self {
        Self {
            id: TemplateID::generate(),
            name,
            tenant_id,
            published: false,
            weight_stack_count: WeightStackCount::One,
            settings_definitions: vec![],
            exercises: vec![ExerciseTemplate {
                id: ExerciseID::generate(),
                name: exercise_name,
            }],
        }
    }

    /// Create a fresh gym assignment from this template.
    ///
    /// Setting definitions are copied and each template exercise becomes an exercise without
    /// values or log. A template without exercises yields one exercise named after the device.
    #[must_use]
    pub fn instantiate(&self) -> DeviceAssignment {
        let exercises = if self.exercises.is_empty() {
            vec![Exercise::new(ExerciseID::generate(), self.name.clone())]
        } else {
            self.exercises
                .iter()
                .map(|e| Exercise::new(e.id.clone(), e.name.clone()))
                .collect()
        };

        DeviceAssignment {
            id: DeviceID::generate(),
            name: self.name.clone(),
            library_device_id: self.id.clone(),
            tenant_id: self.tenant_id.clone(),
            published: self.published,
            weight_stack_count: self.weight_stack_count,
            settings_locked: false,
            settings_definitions: self.settings_definitions.clone(),
            exercises,
        }
    }

    /// Take over the shape of an edited assignment.
    pub fn sync_from(&mut self, device: &DeviceAssignment) {
        self.name = device.name.clone();
        self.tenant_id = device.tenant_id.clone();
        self.published = device.published;
        self.weight_stack_count = device.weight_stack_count;
        self.settings_definitions = device.settings_definitions.clone();
        self.exercises = device
            .exercises
            .iter()
            .map(|e| ExerciseTemplate {
                id: e.id.clone(),
                name: e.name.clone(),
            })
            .collect();
    }
}

/// Gym-owned instance of a library template.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceAssignment {
    pub id: DeviceID,
    pub name: Name,
    pub library_device_id: TemplateID,
    pub tenant_id: TenantID,
    pub published: bool,
    pub weight_stack_count: WeightStackCount,
    pub settings_locked: bool,
    pub settings_definitions: Vec<SettingDefinition>,
    pub exercises: Vec<Exercise>,
}

impl DeviceAssignment {
    /// Whether the user has a non-blank setting value on any exercise under the device's tenant.
    #[must_use]
    pub fn has_recorded_settings(&self, user_id: &UserID) -> bool {
        self.exercises
            .iter()
            .any(|e| e.has_recorded_settings(&self.tenant_id, user_id))
    }

    #[must_use]
    pub fn has_any_recorded_settings(&self) -> bool {
        self.exercises.iter().any(Exercise::has_any_recorded_settings)
    }

    /// Setting definitions are read-only once the device is locked or published.
    #[must_use]
    pub fn settings_editable(&self) -> bool {
        !self.settings_locked && !self.published
    }

    pub fn exercise_mut(&mut self, exercise_id: &ExerciseID) -> Option<&mut Exercise> {
        self.exercises.iter_mut().find(|e| e.id == *exercise_id)
    }
}
