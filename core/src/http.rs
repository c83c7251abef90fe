//! HTTP transport types and the executor seam.
//!
//! # Design
//! Requests and responses are plain owned data. The client builds an
//! `HttpRequest`, hands it to an `HttpExecutor`, and decodes the returned
//! `HttpResponse`. The executor is the only piece that touches the network,
//! so tests substitute a recording executor and production code plugs in
//! `UreqExecutor` (or any other HTTP stack).
//!
//! Executors return non-2xx responses as data. Interpreting status codes is
//! left to the caller of each endpoint.

use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::error::TransportError;

pub(crate) const MEDIA_TYPE_JSON: &str = "application/json";
pub(crate) const MEDIA_TYPE_TEXT: &str = "text/plain";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `Client::new_request` / `Client::new_json_request`; `url` is
/// always absolute and already resolved against the client's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Replace the value of `name` if present, otherwise append it.
    pub fn set_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A decoded value together with the raw response it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub value: T,
    pub response: HttpResponse,
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Performs the actual network round-trip for an `HttpRequest`.
///
/// Implementations must be safe to share between threads; the client
/// itself adds no synchronization. `ctx` is the caller's context: its
/// `remaining()` time bounds the call, and executors that can interrupt
/// IO should poll `is_cancelled()` and return `TransportError::Cancelled`.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: &HttpRequest, ctx: &Context)
        -> Result<HttpResponse, TransportError>;
}

impl<E: HttpExecutor + ?Sized> HttpExecutor for Arc<E> {
    fn execute(&self, request: &HttpRequest, ctx: &Context) -> Result<HttpResponse, TransportError> {
        (**self).execute(request, ctx)
    }
}

impl<E: HttpExecutor + ?Sized> HttpExecutor for Box<E> {
    fn execute(&self, request: &HttpRequest, ctx: &Context) -> Result<HttpResponse, TransportError> {
        (**self).execute(request, ctx)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
