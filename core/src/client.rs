//! Request construction and response decoding shared by every endpoint.
//!
//! # Design
//! `Client` holds the base URL and an executor and carries no mutable state
//! between calls, so a single instance can be cloned into every service
//! group and used from many threads at once. Each endpoint goes through the
//! same three steps: `new_request`/`new_json_request` resolves the path and
//! sets headers, the executor performs the round-trip, and one of the
//! `execute*` methods decodes the body. Status codes are passed through
//! untouched; endpoints and their callers decide what a 404 means.

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::context::Context;
use crate::error::{ApiError, TransportError};
use crate::http::{
    ApiResponse, HttpExecutor, HttpMethod, HttpRequest, HttpResponse, MEDIA_TYPE_JSON,
};

/// Shared transport handle for all Artifactory endpoint groups.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    executor: Arc<dyn HttpExecutor>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// `base_url` must be absolute and end with `/`, e.g.
    /// `https://repo.example.com/artifactory/`.
    pub fn new<E: HttpExecutor + 'static>(base_url: &str, executor: E) -> Result<Self, ApiError> {
        let config_error = |reason: &str| ApiError::Config {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        if base_url.trim().is_empty() {
            return Err(config_error("base URL is empty"));
        }
        let parsed = Url::parse(base_url).map_err(|e| config_error(&e.to_string()))?;
        if parsed.cannot_be_a_base() || !parsed.has_host() {
            return Err(config_error("base URL must be a hierarchical URL with a host"));
        }
        if !parsed.path().ends_with('/') {
            return Err(config_error("base URL must have a trailing slash"));
        }

        Ok(Self {
            base_url: parsed,
            executor: Arc::new(executor),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a bodiless request for `path`, relative to the base URL.
    pub fn new_request(&self, method: HttpMethod, path: &str) -> Result<HttpRequest, ApiError> {
        let url = self.resolve(path)?;
        Ok(HttpRequest {
            method,
            url: url.into(),
            headers: vec![("accept".to_string(), MEDIA_TYPE_JSON.to_string())],
            body: None,
        })
    }

    /// Build a request whose body is `body` encoded as JSON.
    pub fn new_json_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let mut request = self.new_request(method, path)?;
        let encoded = serde_json::to_string(body).map_err(ApiError::Serialization)?;
        request.set_header("content-type", MEDIA_TYPE_JSON);
        request.body = Some(encoded);
        Ok(request)
    }

    /// Perform the round-trip and return the raw response, whatever its status.
    ///
    /// A context cancelled while the executor was busy fails the call with
    /// `Cancelled`, even if a response arrived.
    pub fn execute(&self, ctx: &Context, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        ctx.check()?;
        debug!("{} {}", request.method, request.url);

        let result = self.executor.execute(request, ctx);
        if ctx.is_cancelled() {
            debug!("{} {} cancelled", request.method, request.url);
            return Err(TransportError::Cancelled.into());
        }
        let response = result?;

        trace!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.url,
            response.status,
            response.body.len()
        );
        Ok(response)
    }

    /// Perform the round-trip and decode the body as JSON.
    pub fn execute_json<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        request: &HttpRequest,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self.execute(ctx, request)?;
        match serde_json::from_str(&response.body) {
            Ok(value) => Ok(ApiResponse { value, response }),
            Err(source) => Err(ApiError::Decode {
                source,
                response: Box::new(response),
            }),
        }
    }

    /// Perform the round-trip and return the body verbatim as text.
    pub fn execute_text(
        &self,
        ctx: &Context,
        request: &HttpRequest,
    ) -> Result<ApiResponse<String>, ApiError> {
        let response = self.execute(ctx, request)?;
        Ok(ApiResponse {
            value: response.body.clone(),
            response,
        })
    }

    fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        let path_error = |reason: &str| ApiError::Path {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        if path.starts_with('/') || path.starts_with('\\') {
            return Err(path_error("path must be relative to the base URL"));
        }
        if Url::parse(path).is_ok() {
            return Err(path_error("path must not be an absolute URL"));
        }
        let path_part = path.split(['?', '#']).next().unwrap_or_default();
        if path_part.split(['/', '\\']).any(is_dot_segment) {
            return Err(path_error("path must not contain dot segments"));
        }

        let resolved = self
            .base_url
            .join(path)
            .map_err(|e| path_error(&e.to_string()))?;
        if resolved.origin() != self.base_url.origin()
            || !resolved.path().starts_with(self.base_url.path())
        {
            return Err(path_error("path escapes the base URL"));
        }
        Ok(resolved)
    }
}

/// `.` or `..`, including percent-encoded dots which URL parsers normalize.
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}
