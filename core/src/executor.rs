//! Blocking `HttpExecutor` backed by ureq.
//!
//! ureq's status-as-error behavior is disabled, so 4xx/5xx responses come
//! back as data and the endpoint functions can hand them to the caller.
//! Authentication is configured here as a default header; the client
//! itself knows nothing about credentials.

use std::time::Duration;

use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};

use crate::context::Context;
use crate::error::TransportError;
use crate::http::{HttpExecutor, HttpMethod, HttpRequest, HttpResponse};

const USER_AGENT: &str = concat!("artifactory-core/", env!("CARGO_PKG_VERSION"));

/// Largest response body read by default. Full repository listings of big
/// instances exceed ureq's own 10 MB default.
const DEFAULT_BODY_LIMIT: u64 = 512 * 1024 * 1024;

pub struct UreqExecutor {
    agent: Agent,
    timeout: Option<Duration>,
    body_limit: u64,
    default_headers: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct UreqExecutorBuilder {
    timeout: Option<Duration>,
    body_limit: u64,
    default_headers: Vec<(String, String)>,
}

impl Default for UreqExecutorBuilder {
    fn default() -> Self {
        Self {
            timeout: None,
            body_limit: DEFAULT_BODY_LIMIT,
            default_headers: vec![("user-agent".to_string(), USER_AGENT.to_string())],
        }
    }
}

impl UreqExecutorBuilder {
    /// Upper bound for every call. A context deadline can shorten it but
    /// never extend it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Maximum response body size in bytes; larger bodies fail with a
    /// network error.
    pub fn body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }

    /// Sent with every request unless the request sets the same header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.default_headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.default_headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> UreqExecutor {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(self.timeout)
            .build()
            .new_agent();
        UreqExecutor {
            agent,
            timeout: self.timeout,
            body_limit: self.body_limit,
            default_headers: self.default_headers,
        }
    }
}

impl UreqExecutor {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> UreqExecutorBuilder {
        UreqExecutorBuilder::default()
    }

    fn prepare<B>(
        &self,
        mut builder: RequestBuilder<B>,
        request: &HttpRequest,
        timeout: Option<Duration>,
    ) -> RequestBuilder<B> {
        let defaults = self
            .default_headers
            .iter()
            .filter(|(name, _)| request.header(name).is_none());
        for (name, value) in defaults.chain(request.headers.iter()) {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = timeout {
            builder = builder.config().timeout_global(Some(timeout)).build();
        }
        builder
    }
}

impl Default for UreqExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// The shorter of the executor's own bound and the time left on the context.
fn effective_timeout(configured: Option<Duration>, remaining: Option<Duration>) -> Option<Duration> {
    match (configured, remaining) {
        (Some(configured), Some(remaining)) => Some(configured.min(remaining)),
        (configured, remaining) => configured.or(remaining),
    }
}

fn send(
    builder: RequestBuilder<WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

impl HttpExecutor for UreqExecutor {
    /// ureq blocks until the call finishes or times out, so cancellation is
    /// observed before sending; the client discards responses that arrive
    /// after it.
    fn execute(&self, request: &HttpRequest, ctx: &Context) -> Result<HttpResponse, TransportError> {
        if ctx.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        let timeout = effective_timeout(self.timeout, ctx.remaining());
        let url = request.url.as_str();
        let body = request.body.as_deref();
        let result = match request.method {
            HttpMethod::Get => self.prepare(self.agent.get(url), request, timeout).call(),
            HttpMethod::Head => self.prepare(self.agent.head(url), request, timeout).call(),
            HttpMethod::Delete => self.prepare(self.agent.delete(url), request, timeout).call(),
            HttpMethod::Post => send(self.prepare(self.agent.post(url), request, timeout), body),
            HttpMethod::Put => send(self.prepare(self.agent.put(url), request, timeout), body),
        };

        let mut response = match result {
            Ok(response) => response,
            Err(ureq::Error::Timeout(_)) => return Err(TransportError::DeadlineExceeded),
            Err(e) => return Err(TransportError::network(e)),
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_string()
            .map_err(TransportError::network)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Instant;

    use super::*;

    fn get(url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn builder_replaces_default_header() {
        let builder = UreqExecutor::builder()
            .header("User-Agent", "ci-bot/1.0")
            .header("authorization", "Bearer abc");
        assert_eq!(
            builder.default_headers,
            vec![
                ("User-Agent".to_string(), "ci-bot/1.0".to_string()),
                ("authorization".to_string(), "Bearer abc".to_string()),
            ]
        );
    }

    #[test]
    fn timeout_is_the_shorter_bound() {
        let short = Duration::from_millis(300);
        let long = Duration::from_secs(5);
        assert_eq!(effective_timeout(Some(short), Some(long)), Some(short));
        assert_eq!(effective_timeout(Some(long), Some(short)), Some(short));
        assert_eq!(effective_timeout(Some(short), None), Some(short));
        assert_eq!(effective_timeout(None, Some(long)), Some(long));
        assert_eq!(effective_timeout(None, None), None);
    }

    #[test]
    fn connection_refused_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let executor = UreqExecutor::builder()
            .timeout(Duration::from_secs(5))
            .build();
        let request = get("http://127.0.0.1:9/artifactory/api/system/ping".to_string());
        let err = executor
            .execute(&request, &Context::background())
            .unwrap_err();
        assert!(matches!(
            err,
            TransportError::Network(_) | TransportError::DeadlineExceeded
        ));
    }

    #[test]
    fn cancelled_context_is_not_sent() {
        let executor = UreqExecutor::new();
        let (ctx, handle) = Context::background().with_cancel();
        handle.cancel();
        let request = get("http://127.0.0.1:9/artifactory/api/system/ping".to_string());
        let err = executor.execute(&request, &ctx).unwrap_err();
        assert!(matches!(err, TransportError::Cancelled));
    }

    #[test]
    fn executor_timeout_caps_a_longer_context_deadline() {
        // Accepts connections (kernel backlog) but never answers.
        let silent = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = silent.local_addr().unwrap();

        let executor = UreqExecutor::builder()
            .timeout(Duration::from_millis(300))
            .build();
        let ctx = Context::background().with_timeout(Duration::from_secs(5));

        let started = Instant::now();
        let err = executor
            .execute(&get(format!("http://{addr}/artifactory/api/system/ping")), &ctx)
            .unwrap_err();
        assert!(matches!(err, TransportError::DeadlineExceeded), "{err:?}");
        assert!(started.elapsed() < Duration::from_secs(3));
        drop(silent);
    }

    #[test]
    fn reads_bodies_beyond_ten_megabytes() {
        const SIZE: usize = 11 * 1024 * 1024;
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {SIZE}\r\nconnection: close\r\n\r\n"
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(&vec![b' '; SIZE]).unwrap();
        });

        let executor = UreqExecutor::builder()
            .timeout(Duration::from_secs(30))
            .build();
        let response = executor
            .execute(
                &get(format!("http://{addr}/artifactory/api/repositories")),
                &Context::background(),
            )
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body.len(), SIZE);
    }

    #[test]
    fn body_limit_is_configurable() {
        let executor = UreqExecutor::builder().body_limit(1024).build();
        assert_eq!(executor.body_limit, 1024);
        assert_eq!(UreqExecutor::new().body_limit, DEFAULT_BODY_LIMIT);
    }
}
