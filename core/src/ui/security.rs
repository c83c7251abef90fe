//! Users, groups and permission targets through the UI-internal API.
//!
//! All operations require an admin user on an Artifactory Pro instance.
//! Update semantics are per endpoint: users are updated with PUT, groups are
//! replaced with PUT and partially updated with POST.

use crate::client::Client;
use crate::context::Context;
use crate::error::ApiError;
use crate::http::{ApiResponse, HttpMethod, HttpResponse};
use crate::types::path;

use super::types::{Group, NewUser, PermissionTarget, PermissionTargetDetails, User, UserDetails};

const USERS: &str = "ui/users";
const GROUPS: &str = "ui/groups";
const PERMISSION_TARGETS: &str = "ui/permissiontargets";

#[derive(Debug, Clone)]
pub struct SecurityService {
    client: Client,
}

impl SecurityService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn list_users(&self, ctx: &Context) -> Result<ApiResponse<Vec<UserDetails>>, ApiError> {
        let req = self.client.new_request(HttpMethod::Get, USERS)?;
        self.client.execute_json(ctx, &req)
    }

    pub fn get_user(&self, ctx: &Context, username: &str) -> Result<ApiResponse<User>, ApiError> {
        let req = self.client.new_request(HttpMethod::Get, &path(USERS, username))?;
        self.client.execute_json(ctx, &req)
    }

    /// Create a user. Missing values take the server's defaults.
    pub fn create_user(&self, ctx: &Context, user: &NewUser) -> Result<HttpResponse, ApiError> {
        let req = self.client.new_json_request(HttpMethod::Post, USERS, user)?;
        self.client.execute(ctx, &req)
    }

    pub fn update_user(
        &self,
        ctx: &Context,
        username: &str,
        user: &User,
    ) -> Result<HttpResponse, ApiError> {
        let req = self
            .client
            .new_json_request(HttpMethod::Put, &path(USERS, username), user)?;
        self.client.execute(ctx, &req)
    }

    /// Remove a user. The server answers with a plain-text confirmation.
    pub fn delete_user(&self, ctx: &Context, username: &str) -> Result<ApiResponse<String>, ApiError> {
        let req = self.client.new_request(HttpMethod::Delete, &path(USERS, username))?;
        self.client.execute_text(ctx, &req)
    }

    pub fn get_group(&self, ctx: &Context, group_name: &str) -> Result<ApiResponse<Group>, ApiError> {
        let req = self.client.new_request(HttpMethod::Get, &path(GROUPS, group_name))?;
        self.client.execute_json(ctx, &req)
    }

    pub fn create_or_replace_group(
        &self,
        ctx: &Context,
        group_name: &str,
        group: &Group,
    ) -> Result<HttpResponse, ApiError> {
        let req = self
            .client
            .new_json_request(HttpMethod::Put, &path(GROUPS, group_name), group)?;
        self.client.execute(ctx, &req)
    }

    /// Partial update: only the fields set on `group` are changed.
    pub fn update_group(
        &self,
        ctx: &Context,
        group_name: &str,
        group: &Group,
    ) -> Result<HttpResponse, ApiError> {
        let req = self
            .client
            .new_json_request(HttpMethod::Post, &path(GROUPS, group_name), group)?;
        self.client.execute(ctx, &req)
    }

    pub fn delete_group(
        &self,
        ctx: &Context,
        group_name: &str,
    ) -> Result<ApiResponse<String>, ApiError> {
        let req = self.client.new_request(HttpMethod::Delete, &path(GROUPS, group_name))?;
        self.client.execute_text(ctx, &req)
    }

    pub fn list_permission_targets(
        &self,
        ctx: &Context,
    ) -> Result<ApiResponse<Vec<PermissionTargetDetails>>, ApiError> {
        let req = self.client.new_request(HttpMethod::Get, PERMISSION_TARGETS)?;
        self.client.execute_json(ctx, &req)
    }

    pub fn get_permission_target(
        &self,
        ctx: &Context,
        name: &str,
    ) -> Result<ApiResponse<PermissionTarget>, ApiError> {
        let req = self
            .client
            .new_request(HttpMethod::Get, &path(PERMISSION_TARGETS, name))?;
        self.client.execute_json(ctx, &req)
    }

    pub fn create_or_replace_permission_target(
        &self,
        ctx: &Context,
        name: &str,
        target: &PermissionTarget,
    ) -> Result<HttpResponse, ApiError> {
        let req =
            self.client
                .new_json_request(HttpMethod::Put, &path(PERMISSION_TARGETS, name), target)?;
        self.client.execute(ctx, &req)
    }

    pub fn delete_permission_target(
        &self,
        ctx: &Context,
        name: &str,
    ) -> Result<ApiResponse<String>, ApiError> {
        let req = self
            .client
            .new_request(HttpMethod::Delete, &path(PERMISSION_TARGETS, name))?;
        self.client.execute_text(ctx, &req)
    }
}
