use crate::client::Client;
use crate::context::Context;
use crate::error::ApiError;
use crate::http::{ApiResponse, HttpMethod};
use crate::types::path;

use super::types::{RepositoryKind, RepositorySummary};

const REPOSITORIES: &str = "api/repositories";

#[derive(Debug, Clone)]
pub struct RepositoriesService {
    client: Client,
}

impl RepositoriesService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// All repositories, or only those of `kind`.
    pub fn list_repositories(
        &self,
        ctx: &Context,
        kind: Option<RepositoryKind>,
    ) -> Result<ApiResponse<Vec<RepositorySummary>>, ApiError> {
        let target = match kind {
            Some(kind) => format!("{REPOSITORIES}?type={kind}"),
            None => REPOSITORIES.to_string(),
        };
        let req = self.client.new_request(HttpMethod::Get, &target)?;
        self.client.execute_json(ctx, &req)
    }

    /// Remove a repository and everything stored in it.
    pub fn delete_repository(
        &self,
        ctx: &Context,
        key: &str,
    ) -> Result<ApiResponse<String>, ApiError> {
        let req = self.client.new_request(HttpMethod::Delete, &path(REPOSITORIES, key))?;
        self.client.execute_text(ctx, &req)
    }
}
