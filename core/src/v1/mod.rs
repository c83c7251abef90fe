//! The legacy REST API under `api/`.

mod repositories;
mod security;
mod system;
pub mod types;

pub use repositories::RepositoriesService;
pub use security::SecurityService;
pub use system::SystemService;
pub use types::{
    Group, GroupDetails, PermissionTarget, PermissionTargetDetails, Principals, RepositoryKind,
    RepositorySummary, User, UserDetails, Versions,
};

use crate::client::Client;

#[derive(Debug, Clone)]
pub struct V1 {
    pub repositories: RepositoriesService,
    pub security: SecurityService,
    pub system: SystemService,
}

impl V1 {
    pub fn new(client: Client) -> Self {
        Self {
            repositories: RepositoriesService::new(client.clone()),
            security: SecurityService::new(client.clone()),
            system: SystemService::new(client),
        }
    }
}
