use crate::{ReadError, UpdateError, UserID};

pub trait UserService {
    fn load_user(&self, fallback: UserProfile) -> UserProfile;
    fn save_user(&self, user: &UserProfile);
}

pub trait UserRepository {
    /// Returns `Ok(None)` if no profile has been stored yet.
    fn read_user(&self) -> Result<Option<UserProfile>, ReadError>;
    fn write_user(&self, user: &UserProfile) -> Result<(), UpdateError>;
}

/// Profile of the active user. An empty name means the default display name is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserID,
    pub name: String,
}

impl UserProfile {
    #[must_use]
    pub fn new(id: UserID, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn display_name<'a>(&'a self, default: &'a str) -> &'a str {
        if self.name.trim().is_empty() {
            default
        } else {
            &self.name
        }
    }

    #[must_use]
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            id: self.id.clone(),
            name: name.trim().to_string(),
        }
    }
}
