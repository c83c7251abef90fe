//! Typed client for the JFrog Artifactory REST API.
//!
//! # Overview
//! Endpoints are grouped by API generation (`v1`, `v2`, `ui`) and then by
//! area (security, repositories, system). Every endpoint function builds an
//! `HttpRequest`, hands it to a pluggable `HttpExecutor`, and decodes the
//! `HttpResponse` into a DTO.
//!
//! # Design
//! - `Client` is stateless after construction: a validated base URL plus an
//!   executor behind an `Arc`. Clones are shared by all service groups.
//! - The executor does the I/O. `UreqExecutor` (default `ureq` feature) is
//!   provided; tests plug in recording executors.
//! - HTTP status codes are never turned into errors. Every successful
//!   round-trip returns the raw `HttpResponse` so callers decide what a
//!   404 or 409 means.
//! - DTO fields are all `Option`, and omitted fields are left out of the
//!   JSON entirely.
//!
//! ```no_run
//! use artifactory_core::{Artifactory, Context, UreqExecutor};
//!
//! let executor = UreqExecutor::builder()
//!     .header("authorization", "Bearer <token>")
//!     .build();
//! let rt = Artifactory::new("https://repo.example.com/artifactory/", executor)?;
//! let users = rt.ui.security.list_users(&Context::background())?;
//! for user in &users.value {
//!     println!("{}", user);
//! }
//! # Ok::<(), artifactory_core::ApiError>(())
//! ```

pub mod artifactory;
pub mod client;
pub mod context;
pub mod error;
#[cfg(feature = "ureq")]
pub mod executor;
pub mod http;
mod types;
pub mod ui;
pub mod v1;
pub mod v2;

pub use artifactory::Artifactory;
pub use client::Client;
pub use context::{CancelHandle, Context};
pub use error::{ApiError, BoxError, TransportError};
#[cfg(feature = "ureq")]
pub use executor::{UreqExecutor, UreqExecutorBuilder};
pub use http::{ApiResponse, HttpExecutor, HttpMethod, HttpRequest, HttpResponse};
