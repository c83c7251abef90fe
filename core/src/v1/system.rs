use crate::client::Client;
use crate::context::Context;
use crate::error::ApiError;
use crate::http::{ApiResponse, HttpMethod, MEDIA_TYPE_TEXT};

use super::types::Versions;

#[derive(Debug, Clone)]
pub struct SystemService {
    client: Client,
}

impl SystemService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Health check. A healthy instance answers `OK`.
    pub fn ping(&self, ctx: &Context) -> Result<ApiResponse<String>, ApiError> {
        let mut req = self.client.new_request(HttpMethod::Get, "api/system/ping")?;
        req.set_header("accept", MEDIA_TYPE_TEXT);
        self.client.execute_text(ctx, &req)
    }

    pub fn get_version(&self, ctx: &Context) -> Result<ApiResponse<Versions>, ApiError> {
        let req = self.client.new_request(HttpMethod::Get, "api/system/version")?;
        self.client.execute_json(ctx, &req)
    }
}
