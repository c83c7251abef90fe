//! Error types for the Artifactory client.
//!
//! # Design
//! The client never maps HTTP status codes to errors. `ApiError` only covers
//! failures of the client's own machinery: a bad base URL, a request that
//! cannot be built, a failed round-trip, or a body that cannot be decoded.
//! A decode failure keeps the raw response so callers can still look at the
//! status and body.

use thiserror::Error;

use crate::http::HttpResponse;

/// Boxed cause of a network failure, as produced by an executor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by `Client` and every endpoint function.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL given at construction is empty, malformed, or not a
    /// directory-style URL ending in `/`.
    #[error("invalid base URL {url:?}: {reason}")]
    Config { url: String, reason: String },

    /// The relative request path is absolute or escapes the base URL.
    #[error("invalid request path {path:?}: {reason}")]
    Path { path: String, reason: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The executor failed to complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The response body could not be decoded into the expected type.
    #[error("decode failed (HTTP {}): {source}", .response.status)]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<HttpResponse>,
    },
}

impl ApiError {
    /// The raw response attached to this error, if the round-trip completed.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            ApiError::Decode { response, .. } => Some(response),
            _ => None,
        }
    }
}

/// Failures of the network round-trip itself.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The caller's context was cancelled.
    #[error("request cancelled")]
    Cancelled,

    /// The caller's deadline passed before the response arrived.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// Connection, TLS, or I/O failure reported by the executor.
    #[error("network error: {0}")]
    Network(#[source] BoxError),
}

impl TransportError {
    pub fn network<E: Into<BoxError>>(cause: E) -> Self {
        TransportError::Network(cause.into())
    }
}
