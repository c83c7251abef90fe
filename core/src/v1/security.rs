//! Security endpoints of the legacy REST API (`api/security/...`).
//!
//! Requires an admin user. Replace is PUT, partial update is POST.

use crate::client::Client;
use crate::context::Context;
use crate::error::ApiError;
use crate::http::{ApiResponse, HttpMethod, HttpResponse, MEDIA_TYPE_TEXT};
use crate::types::path;

use super::types::{
    Group, GroupDetails, PermissionTarget, PermissionTargetDetails, User, UserDetails,
};

const USERS: &str = "api/security/users";
const GROUPS: &str = "api/security/groups";
const PERMISSIONS: &str = "api/security/permissions";
const ENCRYPTED_PASSWORD: &str = "api/security/encryptedPassword";

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

    /// Missing values are reset to the server defaults.
    pub fn create_or_replace_user(
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

    /// Only the fields set on `user` are changed.
    pub fn update_user(
        &self,
        ctx: &Context,
        username: &str,
        user: &User,
    ) -> Result<HttpResponse, ApiError> {
        let req = self
            .client
            .new_json_request(HttpMethod::Post, &path(USERS, username), user)?;
        self.client.execute(ctx, &req)
    }

    pub fn delete_user(&self, ctx: &Context, username: &str) -> Result<ApiResponse<String>, ApiError> {
        let req = self.client.new_request(HttpMethod::Delete, &path(USERS, username))?;
        self.client.execute_text(ctx, &req)
    }

    /// The calling user's password in encrypted form.
    pub fn get_encrypted_password(&self, ctx: &Context) -> Result<ApiResponse<String>, ApiError> {
        let mut req = self.client.new_request(HttpMethod::Get, ENCRYPTED_PASSWORD)?;
        req.set_header("accept", MEDIA_TYPE_TEXT);
        self.client.execute_text(ctx, &req)
    }

    pub fn list_groups(&self, ctx: &Context) -> Result<ApiResponse<Vec<GroupDetails>>, ApiError> {
        let req = self.client.new_request(HttpMethod::Get, GROUPS)?;
        self.client.execute_json(ctx, &req)
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

    pub fn create_or_replace_permission_target(
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
