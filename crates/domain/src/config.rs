use crate::{DEFAULT_TENANT_ID, GymID, Name, TenantID, UserProfile, Workspace};

/// Defaults wired in at application startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub tenant_id: TenantID,
    pub default_user: UserProfile,
    pub seed_gyms: Vec<(String, String)>,
}

impl Config {
    /// The workspace used before anything has been persisted. Seed gyms with a blank name are
    /// skipped.
    #[must_use]
    pub fn initial_workspace(&self) -> Workspace {
        Workspace::initial(self.seed_gyms.iter().filter_map(|(id, name)| {
            Some((GymID::from(id.as_str()), Name::new(name).ok()?))
        }))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tenant_id: DEFAULT_TENANT_ID.into(),
            default_user: UserProfile::new("primary-user".into(), ""),
            seed_gyms: [
                ("pulse-arena", "Pulse Arena"),
                ("iron-haven", "Iron Haven"),
                ("urban-move", "Urban Move Loft"),
            ]
            .into_iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.tenant_id, TenantID::default_tenant());
        assert_eq!(config.default_user.id.as_str(), "primary-user");
        assert_eq!(config.default_user.name, "");
    }

    #[test]
    fn test_initial_workspace() {
        let workspace = Config::default().initial_workspace();
        assert_eq!(
            workspace
                .gyms
                .iter()
                .map(|gym| (gym.id.as_str(), gym.name.as_str()))
                .collect::<Vec<_>>(),
            vec![
                ("pulse-arena", "Pulse Arena"),
                ("iron-haven", "Iron Haven"),
                ("urban-move", "Urban Move Loft"),
            ]
        );
        assert!(workspace.gyms.iter().all(|gym| gym.devices.is_empty()));
        assert!(workspace.device_library.is_empty());
        assert_eq!(workspace.selected_gym_id, Some("pulse-arena".into()));
    }

    #[test]
    fn test_initial_workspace_skips_blank_seed() {
        let config = Config {
            seed_gyms: vec![
                ("blank".to_string(), "  ".to_string()),
                ("atlas".to_string(), "Atlas Forge".to_string()),
            ],
            ..Config::default()
        };
        let workspace = config.initial_workspace();
        assert_eq!(workspace.gyms.len(), 1);
        assert_eq!(workspace.selected_gym_id, Some("atlas".into()));
    }
}
