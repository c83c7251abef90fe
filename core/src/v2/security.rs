//! Permission targets v2 (`api/v2/security/permissions/...`).
//!
//! Unlike the v1 API, creation is POST and replacement is PUT.

use crate::client::Client;
use crate::context::Context;
use crate::error::ApiError;
use crate::http::{ApiResponse, HttpMethod, HttpResponse};
use crate::types::path;

use super::types::{PermissionTarget, PermissionTargetDetails};

const PERMISSIONS: &str = "api/v2/security/permissions";

#[derive(Debug, Clone)]
pub struct SecurityService {
    client: Client,
}

impl SecurityService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn list_permission_targets(
        &self,
        ctx: &Context,
    ) -> Result<ApiResponse<Vec<PermissionTargetDetails>>, ApiError> {
        let req = self.client.new_request(HttpMethod::Get, PERMISSIONS)?;
        self.client.execute_json(ctx, &req)
    }

    pub fn get_permission_target(
        &self,
        ctx: &Context,
        name: &str,
    ) -> Result<ApiResponse<PermissionTarget>, ApiError> {
        let req = self.client.new_request(HttpMethod::Get, &path(PERMISSIONS, name))?;
        self.client.execute_json(ctx, &req)
    }

    /// Existence check by HEAD. `true` on any 2xx answer; inspect the
    /// response to tell a 404 apart from an authorization failure.
    pub fn permission_target_exists(
        &self,
        ctx: &Context,
        name: &str,
    ) -> Result<ApiResponse<bool>, ApiError> {
        let req = self.client.new_request(HttpMethod::Head, &path(PERMISSIONS, name))?;
        let response = self.client.execute(ctx, &req)?;
        Ok(ApiResponse {
            value: response.is_success(),
            response,
        })
    }

    pub fn create_permission_target(
        &self,
        ctx: &Context,
        name: &str,
        target: &PermissionTarget,
    ) -> Result<HttpResponse, ApiError> {
        let req = self
            .client
            .new_json_request(HttpMethod::Post, &path(PERMISSIONS, name), target)?;
        self.client.execute(ctx, &req)
    }

    pub fn replace_permission_target(
        &self,
        ctx: &Context,
        name: &str,
        target: &PermissionTarget,
    ) -> Result<HttpResponse, ApiError> {
        let req = self
            .client
            .new_json_request(HttpMethod::Put, &path(PERMISSIONS, name), target)?;
        self.client.execute(ctx, &req)
    }

    pub fn delete_permission_target(
        &self,
        ctx: &Context,
        name: &str,
    ) -> Result<ApiResponse<String>, ApiError> {
        let req = self.client.new_request(HttpMethod::Delete, &path(PERMISSIONS, name))?;
        self.client.execute_text(ctx, &req)
    }
}
