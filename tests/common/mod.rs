//! Shared test support: a scripted transport that replays canned responses
//! and records every request it was asked to send.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use manila_client::client::transport::{HttpRequest, HttpResponse, HttpTransport};
use manila_client::error::{ManilaError, Result};
use manila_client::ServiceClient;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

pub struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn with_responses(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ManilaError::network("scripted transport ran out of responses"))
    }
}

pub fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status: StatusCode::from_u16(status).unwrap(),
        headers: HeaderMap::new(),
        body: body.to_string(),
    }
}

pub fn client_with(transport: Arc<ScriptedTransport>) -> Arc<ServiceClient> {
    Arc::new(
        ServiceClient::with_transport("http://manila.example.com:8786/v2/demo", transport)
            .unwrap()
            .with_token("test-token"),
    )
}
