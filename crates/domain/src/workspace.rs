use crate::{
    DeviceAssignment, DeviceID, DeviceTemplate, GymID, Name, ReadError, TemplateID, UpdateError,
    sort_entries,
};

pub trait WorkspaceService {
    /// Load the stored workspace, or the normalized fallback if nothing usable is stored.
    fn load_workspace(&self, fallback: Workspace) -> Workspace;
    /// Persist the workspace. Failures are logged and otherwise ignored.
    fn save_workspace(&self, workspace: &Workspace);
}

pub trait WorkspaceRepository {
    /// Returns `Ok(None)` if no workspace has been stored yet.
    fn read_workspace(&self) -> Result<Option<Workspace>, ReadError>;
    fn write_workspace(&self, workspace: &Workspace) -> Result<(), UpdateError>;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Workspace {
    pub gyms: Vec<Gym>,
    pub device_library: Vec<DeviceTemplate>,
    pub selected_gym_id: Option<GymID>,
}

impl Workspace {
    /// Build the first workspace from seed gyms. The first gym is selected.
    #[must_use]
    pub fn initial(seed_gyms: impl IntoIterator<Item = (GymID, Name)>) -> Self {
        let gyms = seed_gyms
            .into_iter()
            .map(|(id, name)| Gym::new(id, name))
            .collect::<Vec<_>>();
        let selected_gym_id = gyms.first().map(|gym| gym.id.clone());

        Self {
            gyms,
            device_library: vec![],
            selected_gym_id,
        }
    }

    /// Restore the workspace invariants that do not depend on how the data was obtained:
    /// the selected gym must exist and training logs must be ordered newest first.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if !self
            .selected_gym_id
            .as_ref()
            .is_some_and(|id| self.gym(id).is_some())
        {
            self.selected_gym_id = self.gyms.first().map(|gym| gym.id.clone());
        }

        for exercise in self
            .gyms
            .iter_mut()
            .flat_map(|gym| gym.devices.iter_mut())
            .flat_map(|device| device.exercises.iter_mut())
        {
            for entries in exercise
                .training_log
                .values_mut()
                .flat_map(|users| users.values_mut())
            {
                sort_entries(entries);
            }
        }

        self
    }

    #[must_use]
    pub fn gym(&self, gym_id: &GymID) -> Option<&Gym> {
        self.gyms.iter().find(|gym| gym.id == *gym_id)
    }

    #[must_use]
    pub fn selected_gym(&self) -> Option<&Gym> {
        self.gym(self.selected_gym_id.as_ref()?)
    }

    #[must_use]
    pub fn device(&self, gym_id: &GymID, device_id: &DeviceID) -> Option<&DeviceAssignment> {
        self.gym(gym_id)?.device(device_id)
    }

    #[must_use]
    pub fn template(&self, template_id: &TemplateID) -> Option<&DeviceTemplate> {
        self.device_library.iter().find(|t| t.id == *template_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gym {
    pub id: GymID,
    pub name: Name,
    pub devices: Vec<DeviceAssignment>,
}

impl Gym {
    #[must_use]
    pub fn new(id: GymID, name: Name) -> Self {
        Self {
            id,
            name,
            devices: vec![],
        }
    }

    #[must_use]
    pub fn device(&self, device_id: &DeviceID) -> Option<&DeviceAssignment> {
        self.devices.iter().find(|device| device.id == *device_id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Repetitions, TenantID, TrainingEntry, UserID, WeightUnit};

    fn name(value: &str) -> Name {
        Name::new(value).unwrap()
    }

    #[test]
    fn test_initial() {
        let workspace = Workspace::initial([
            ("pulse-arena".into(), name("Pulse Arena")),
            ("iron-haven".into(), name("Iron Haven")),
        ]);

        assert_eq!(
            workspace,
            Workspace {
                gyms: vec![
                    Gym::new("pulse-arena".into(), name("Pulse Arena")),
                    Gym::new("iron-haven".into(), name("Iron Haven")),
                ],
                device_library: vec![],
                selected_gym_id: Some("pulse-arena".into()),
            }
        );
    }

    #[test]
    fn test_initial_without_gyms() {
        assert_eq!(
            Workspace::initial(Vec::<(GymID, Name)>::new()),
            Workspace::default()
        );
    }

    #[test]
    fn test_normalized_selection() {
        let mut workspace = Workspace::initial([
            ("a".into(), name("A")),
            ("b".into(), name("B")),
        ]);

        workspace.selected_gym_id = Some("b".into());
        assert_eq!(
            workspace.clone().normalized().selected_gym_id,
            Some("b".into())
        );

        workspace.selected_gym_id = Some("missing".into());
        assert_eq!(
            workspace.clone().normalized().selected_gym_id,
            Some("a".into())
        );

        workspace.selected_gym_id = None;
        assert_eq!(
            workspace.clone().normalized().selected_gym_id,
            Some("a".into())
        );

        workspace.gyms.clear();
        workspace.selected_gym_id = Some("a".into());
        assert_eq!(workspace.normalized().selected_gym_id, None);
    }

    #[test]
    fn test_normalized_sorts_training_log() {
        let template =
            DeviceTemplate::new(name("Rower"), name("Rowing"), TenantID::default_tenant());
        let mut device = template.instantiate();
        let entry = |id: &str, hour: u32| TrainingEntry {
            id: id.into(),
            performed_at: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            loads: vec![20.0],
            repetitions: Repetitions::new(5).unwrap(),
            unit: WeightUnit::Lb,
        };
        device.exercises[0].training_log.insert(
            TenantID::default_tenant(),
            [(UserID::from("u"), vec![entry("old", 8), entry("new", 9)])].into(),
        );
        let mut gym = Gym::new("a".into(), name("A"));
        gym.devices.push(device);
        let workspace = Workspace {
            gyms: vec![gym],
            device_library: vec![template],
            selected_gym_id: Some("a".into()),
        }
        .normalized();

        let exercise = &workspace.gyms[0].devices[0].exercises[0];
        assert_eq!(
            exercise
                .entries(&TenantID::default_tenant(), &"u".into())
                .iter()
                .map(|e| e.id.as_str())
                .collect::<Vec<_>>(),
            vec!["new", "old"]
        );
    }

    #[test]
    fn test_lookup() {
        let template =
            DeviceTemplate::new(name("Rower"), name("Rowing"), TenantID::default_tenant());
        let device = template.instantiate();
        let device_id = device.id.clone();
        let mut gym = Gym::new("a".into(), name("A"));
        gym.devices.push(device);
        let workspace = Workspace {
            gyms: vec![gym],
            device_library: vec![template.clone()],
            selected_gym_id: Some("a".into()),
        };

        assert_eq!(workspace.selected_gym().map(|g| g.id.as_str()), Some("a"));
        assert!(workspace.device(&"a".into(), &device_id).is_some());
        assert!(workspace.device(&"b".into(), &device_id).is_none());
        assert_eq!(workspace.template(&template.id), Some(&template));
        assert_eq!(workspace.template(&"device-missing".into()), None);
    }
}
