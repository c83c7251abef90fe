//! The v2 REST API under `api/v2/`.

mod security;
pub mod types;

pub use security::SecurityService;
pub use types::{Actions, PermissionSection, PermissionTarget, PermissionTargetDetails};

use crate::client::Client;

#[derive(Debug, Clone)]
pub struct V2 {
    pub security: SecurityService,
}

impl V2 {
    pub fn new(client: Client) -> Self {
        Self {
            security: SecurityService::new(client),
        }
    }
}
