//! Transport abstraction over the HTTP layer
//!
//! Every operation funnels through [`HttpTransport`], which performs exactly
//! one request attempt. The default implementation wraps a configured
//! `reqwest::Client`; tests substitute a mock.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::utils::network::{classify_network_error, create_http_client, NetworkConfig};

/// A single outgoing API request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// The raw response handed back by the transport. The body is kept as text;
/// decoding happens later, when the caller asks for a typed payload.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// One request, one response. No retries, no backoff; cancellation is
/// dropping the returned future.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Default transport backed by a `reqwest::Client` with the timeouts and user
/// agent from [`NetworkConfig`].
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config)?,
        })
    }

    /// Wrap an already-configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.to_string();
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| classify_network_error(&e, &url))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
