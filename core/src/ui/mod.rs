//! Endpoints served under `ui/`, the API used by Artifactory's own web UI.

mod repositories;
mod security;
pub mod types;

pub use repositories::RepositoriesService;
pub use security::SecurityService;
pub use types::{
    Group, NewUser, PermissionAction, PermissionTarget, PermissionTargetDetails, PrincipalActions,
    RepositoryDetails, User, UserDetails,
};

use crate::client::Client;

/// The UI endpoint groups, sharing one client.
#[derive(Debug, Clone)]
pub struct Ui {
    pub repositories: RepositoriesService,
    pub security: SecurityService,
}

impl Ui {
    pub fn new(client: Client) -> Self {
        Self {
            repositories: RepositoriesService::new(client.clone()),
            security: SecurityService::new(client),
        }
    }
}
