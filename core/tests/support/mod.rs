//! Recording executor shared by the integration test binaries.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use artifactory_core::{
    Artifactory, Context, HttpExecutor, HttpRequest, HttpResponse, TransportError,
};

pub const BASE_URL: &str = "http://localhost:8081/artifactory/";

enum Reply {
    Response(HttpResponse),
    Failure(fn() -> TransportError),
}

#[derive(Default)]
struct State {
    replies: VecDeque<Reply>,
    requests: Vec<HttpRequest>,
}

/// Answers requests from a queue and records everything it was asked.
///
/// An empty queue answers `200` with an empty body.
#[derive(Clone, Default)]
pub struct MockExecutor {
    state: Arc<Mutex<State>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.respond_with(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    pub fn respond_with(&self, response: HttpResponse) -> &Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Reply::Response(response));
        self
    }

    pub fn fail(&self, error: fn() -> TransportError) -> &Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(Reply::Failure(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was executed")
    }
}

impl HttpExecutor for MockExecutor {
    fn execute(&self, request: &HttpRequest, _ctx: &Context) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        match state.replies.pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(error)) => Err(error()),
            None => Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: String::new(),
            }),
        }
    }
}

/// A client wired to a fresh `MockExecutor`.
pub fn artifactory() -> (Artifactory, MockExecutor) {
    let executor = MockExecutor::new();
    let rt = Artifactory::new(BASE_URL, executor.clone()).unwrap();
    (rt, executor)
}

pub fn connection_refused() -> TransportError {
    TransportError::network(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}
