//! Scripted `Transport` shared by the controller tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use fleet_core::{ApiError, HttpRequest, HttpResponse, Transport};

/// Replays queued responses in order and records every request it sees.
/// Once the script runs dry every call fails as a transport error.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.script.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(&self) -> &Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Transport("connection refused".to_string())));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("script exhausted".to_string())))
    }
}
