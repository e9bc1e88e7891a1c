use log::warn;

use crate::{
    UserProfile, UserRepository, UserService, Workspace, WorkspaceRepository, WorkspaceService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! warn_on_error {
    ($result: expr, $action: literal, $entity: literal) => {{
        let result = $result;
        if let Err(ref err) = result {
            warn!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

impl<R: WorkspaceRepository> WorkspaceService for Service<R> {
    fn load_workspace(&self, fallback: Workspace) -> Workspace {
        match warn_on_error!(self.repository.read_workspace(), "load", "workspace") {
            Ok(Some(workspace)) => workspace,
            Ok(None) | Err(_) => fallback.normalized(),
        }
    }

    fn save_workspace(&self, workspace: &Workspace) {
        let _ = warn_on_error!(
            self.repository.write_workspace(workspace),
            "persist",
            "workspace"
        );
    }
}

impl<R: UserRepository> UserService for Service<R> {
    fn load_user(&self, fallback: UserProfile) -> UserProfile {
        match warn_on_error!(self.repository.read_user(), "load", "user") {
            Ok(Some(user)) => user,
            Ok(None) | Err(_) => fallback,
        }
    }

    fn save_user(&self, user: &UserProfile) {
        let _ = warn_on_error!(self.repository.write_user(user), "persist", "user");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Name, ReadError, StorageError, UpdateError};

    #[derive(Default)]
    struct FakeRepository {
        workspace: Option<Workspace>,
        user: Option<UserProfile>,
        fail_read: bool,
        fail_write: bool,
        written_workspaces: RefCell<Vec<Workspace>>,
        written_users: RefCell<Vec<UserProfile>>,
    }

    impl WorkspaceRepository for FakeRepository {
        fn read_workspace(&self) -> Result<Option<Workspace>, ReadError> {
            if self.fail_read {
                return Err(ReadError::Other("unexpected token".into()));
            }
            Ok(self.workspace.clone())
        }

        fn write_workspace(&self, workspace: &Workspace) -> Result<(), UpdateError> {
            if self.fail_write {
                return Err(StorageError::Other("quota exceeded".into()).into());
            }
            self.written_workspaces.borrow_mut().push(workspace.clone());
            Ok(())
        }
    }

    impl UserRepository for FakeRepository {
        fn read_user(&self) -> Result<Option<UserProfile>, ReadError> {
            if self.fail_read {
                return Err(StorageError::Unavailable.into());
            }
            Ok(self.user.clone())
        }

        fn write_user(&self, user: &UserProfile) -> Result<(), UpdateError> {
            if self.fail_write {
                return Err(StorageError::Unavailable.into());
            }
            self.written_users.borrow_mut().push(user.clone());
            Ok(())
        }
    }

    fn fallback() -> Workspace {
        let mut workspace =
            Workspace::initial([("pulse-arena".into(), Name::new("Pulse Arena").unwrap())]);
        workspace.selected_gym_id = Some("missing".into());
        workspace
    }

    #[test]
    fn test_load_workspace_stored() {
        let stored = Workspace::initial([("atlas".into(), Name::new("Atlas Forge").unwrap())]);
        let service = Service::new(FakeRepository {
            workspace: Some(stored.clone()),
            ..FakeRepository::default()
        });
        assert_eq!(service.load_workspace(fallback()), stored);
    }

    #[test]
    fn test_load_workspace_falls_back_to_normalized_fallback() {
        let expected = fallback().normalized();
        assert_eq!(expected.selected_gym_id, Some("pulse-arena".into()));

        let service = Service::new(FakeRepository::default());
        assert_eq!(service.load_workspace(fallback()), expected);

        let service = Service::new(FakeRepository {
            fail_read: true,
            ..FakeRepository::default()
        });
        assert_eq!(service.load_workspace(fallback()), expected);
    }

    #[test]
    fn test_save_workspace() {
        let service = Service::new(FakeRepository::default());
        service.save_workspace(&fallback());
        assert_eq!(
            *service.repository().written_workspaces.borrow(),
            vec![fallback()]
        );
    }

    #[test]
    fn test_save_workspace_swallows_errors() {
        let service = Service::new(FakeRepository {
            fail_write: true,
            ..FakeRepository::default()
        });
        service.save_workspace(&fallback());
        assert!(service.repository().written_workspaces.borrow().is_empty());
    }

    #[test]
    fn test_load_user() {
        let default_user = UserProfile::new("primary-user".into(), "");
        let stored = UserProfile::new("u-1".into(), "Alice");

        let service = Service::new(FakeRepository {
            user: Some(stored.clone()),
            ..FakeRepository::default()
        });
        assert_eq!(service.load_user(default_user.clone()), stored);

        let service = Service::new(FakeRepository::default());
        assert_eq!(service.load_user(default_user.clone()), default_user);

        let service = Service::new(FakeRepository {
            user: Some(stored),
            fail_read: true,
            ..FakeRepository::default()
        });
        assert_eq!(service.load_user(default_user.clone()), default_user);
    }

    #[test]
    fn test_save_user() {
        let user = UserProfile::new("u-1".into(), "Alice");

        let service = Service::new(FakeRepository::default());
        service.save_user(&user);
        assert_eq!(*service.repository().written_users.borrow(), vec![user.clone()]);

        let service = Service::new(FakeRepository {
            fail_write: true,
            ..FakeRepository::default()
        });
        service.save_user(&user);
        assert!(service.repository().written_users.borrow().is_empty());
    }
}
