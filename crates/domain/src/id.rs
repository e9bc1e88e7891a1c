use derive_more::{AsRef, Deref, Display};
use uuid::Uuid;

/// Generate a unique identifier of the form `<prefix>-<uuid>`.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

macro_rules! string_id {
    ($id: ident) => {
        #[derive(AsRef, Deref, Debug, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $id(String);

        impl From<String> for $id {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $id {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
    ($id: ident, $prefix: literal) => {
        string_id!($id);

        impl $id {
            #[must_use]
            pub fn generate() -> Self {
                Self(generate_id($prefix))
            }
        }
    };
}

string_id!(GymID, "gym");
string_id!(TemplateID, "device");
string_id!(DeviceID, "assignment");
string_id!(ExerciseID, "exercise");
string_id!(SettingID, "setting");
string_id!(EntryID, "entry");
string_id!(TenantID);
string_id!(UserID);

impl TenantID {
    #[must_use]
    pub fn default_tenant() -> Self {
        Self(DEFAULT_TENANT_ID.to_string())
    }
}

pub const DEFAULT_TENANT_ID: &str = "tenant-default";
