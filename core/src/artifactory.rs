use crate::client::Client;
use crate::error::ApiError;
use crate::http::HttpExecutor;
use crate::ui::Ui;
use crate::v1::V1;
use crate::v2::V2;

/// Entry point bundling every API generation behind one client.
///
/// Cloning is cheap; all service groups share the same executor.
#[derive(Debug, Clone)]
pub struct Artifactory {
    pub v1: V1,
    pub v2: V2,
    pub ui: Ui,
}

impl Artifactory {
    /// `base_url` is the instance root, ending in `/`, e.g.
    /// `https://repo.example.com/artifactory/`.
    pub fn new<E: HttpExecutor + 'static>(base_url: &str, executor: E) -> Result<Self, ApiError> {
        Ok(Self::from_client(Client::new(base_url, executor)?))
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            v1: V1::new(client.clone()),
            v2: V2::new(client.clone()),
            ui: Ui::new(client),
        }
    }
}
