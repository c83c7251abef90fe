use crate::client::Client;
use crate::context::Context;
use crate::error::ApiError;
use crate::http::{ApiResponse, HttpMethod};

use super::types::RepositoryDetails;

#[derive(Debug, Clone)]
pub struct RepositoriesService {
    client: Client,
}

impl RepositoriesService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Repositories visible to the current user, with their kind flags.
    pub fn list_repositories(
        &self,
        ctx: &Context,
    ) -> Result<ApiResponse<Vec<RepositoryDetails>>, ApiError> {
        let req = self.client.new_request(HttpMethod::Get, "ui/repodata")?;
        self.client.execute_json(ctx, &req)
    }
}
