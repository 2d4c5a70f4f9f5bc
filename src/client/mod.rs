//! Service client handle and per-call result wrapper
//!
//! [`ServiceClient`] carries the endpoint, auth token and transport, and is
//! passed explicitly into every resource API. [`ApiResult`] is the wrapper
//! each call returns: raw body, headers and any error travel together, and
//! decoding is deferred until the caller extracts the typed payload.

pub mod transport;

use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{ManilaError, Result};
use crate::utils::network::NetworkConfig;
use crate::utils::query::QueryParams;
use transport::{HttpRequest, HttpTransport, ReqwestTransport};

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const API_VERSION_HEADER: &str = "X-OpenStack-Manila-API-Version";

/// Capability for options values that serialize into an enveloped JSON
/// request body. Implement this to extend an operation's options shape.
pub trait ToRequestBody {
    fn to_request_body(&self) -> Result<Value>;
}

/// Capability for filter values that serialize into query parameters.
/// Unset fields must be omitted entirely.
pub trait ToQueryParams {
    fn to_query_params(&self) -> Result<QueryParams>;
}

/// Typed payloads that can be pulled out of a response body.
pub trait Extractable: DeserializeOwned {
    /// JSON key the server wraps a single resource in.
    const ROOT_KEY: &'static str;
}

/// Raw per-call response: headers plus the decoded-but-untyped body.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// Per-call result wrapper.
///
/// Validation, transport and unexpected-status failures all land here rather
/// than interrupting control flow; callers check for the error when they
/// extract the payload (or via [`ApiResult::check`] for body-less calls).
#[derive(Debug)]
pub struct ApiResult<T> {
    body: Option<Value>,
    headers: HeaderMap,
    err: Option<ManilaError>,
    _payload: PhantomData<T>,
}

impl<T> ApiResult<T> {
    pub(crate) fn from_raw(raw: RawResponse) -> Self {
        Self {
            body: raw.body,
            headers: raw.headers,
            err: None,
            _payload: PhantomData,
        }
    }

    pub(crate) fn from_error(err: ManilaError) -> Self {
        Self {
            body: None,
            headers: HeaderMap::new(),
            err: Some(err),
            _payload: PhantomData,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.err.is_none()
    }

    /// Response headers. Empty when the call failed before a response
    /// arrived.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The undecoded response body, if the call produced one.
    pub fn raw_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn err(&self) -> Option<&ManilaError> {
        self.err.as_ref()
    }

    /// Consume the wrapper, surfacing only the error. This is how body-less
    /// results (delete, reset status, force delete) are checked.
    pub fn check(self) -> Result<()> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<T: Extractable> ApiResult<T> {
    /// Decode the typed payload from under its envelope key. Decoding is
    /// deferred to this point; a stored error is returned instead if the
    /// call failed.
    pub fn extract(self) -> Result<T> {
        if let Some(err) = self.err {
            return Err(err);
        }
        let body = self
            .body
            .ok_or_else(|| ManilaError::serialization("Response carried no body to decode"))?;
        let payload = body.get(T::ROOT_KEY).cloned().ok_or_else(|| {
            ManilaError::serialization(format!(
                "Response body is missing the '{}' key",
                T::ROOT_KEY
            ))
        })?;
        Ok(serde_json::from_value(payload)?)
    }
}

impl<T> From<ManilaError> for ApiResult<T> {
    fn from(err: ManilaError) -> Self {
        Self::from_error(err)
    }
}

/// Handle to one Manila v2 endpoint.
///
/// Holds the service endpoint (the versioned, project-scoped base URL), the
/// caller's auth token and the transport. Cloning is cheap; resource APIs
/// take it by `Arc`.
pub struct ServiceClient {
    endpoint: Url,
    token: Option<String>,
    api_version: Option<String>,
    transport: Arc<dyn HttpTransport>,
}

impl ServiceClient {
    /// Create a client against `endpoint` using the default reqwest
    /// transport.
    pub fn new(endpoint: &str) -> Result<Self> {
        let transport = ReqwestTransport::new(&NetworkConfig::default())?;
        Self::with_transport(endpoint, Arc::new(transport))
    }

    /// Create a client with a caller-supplied transport.
    pub fn with_transport(endpoint: &str, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ManilaError::invalid_url(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
        if endpoint.cannot_be_a_base() {
            return Err(ManilaError::invalid_url(format!(
                "Endpoint '{}' cannot serve as a base URL",
                endpoint
            )));
        }
        Ok(Self {
            endpoint,
            token: None,
            api_version: None,
            transport,
        })
    }

    /// Attach the auth token sent as `X-Auth-Token` on every request.
    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Pin a Manila microversion, sent as `X-OpenStack-Manila-API-Version`.
    pub fn with_api_version<S: Into<String>>(mut self, version: S) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(token)
                .map_err(|e| ManilaError::validation(format!("Invalid auth token: {}", e)))?;
            headers.insert(AUTH_TOKEN_HEADER, value);
        }
        if let Some(version) = &self.api_version {
            let value = HeaderValue::from_str(version)
                .map_err(|e| ManilaError::validation(format!("Invalid API version: {}", e)))?;
            headers.insert(API_VERSION_HEADER, value);
        }
        Ok(headers)
    }

    /// Build a resource URL by appending path segments to the endpoint.
    pub(crate) fn resource_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ManilaError::invalid_url("Endpoint cannot serve as a base URL"))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Issue a single request and check the response status against the
    /// operation's OK-code set. One attempt only.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
        ok_codes: &[u16],
    ) -> Result<RawResponse> {
        debug!(method = %method, url = %url, "issuing request");
        let request = HttpRequest {
            method,
            url,
            headers: self.headers()?,
            body,
        };
        let response = self.transport.send(request).await?;
        debug!(status = %response.status, "response received");

        if !ok_codes.contains(&response.status.as_u16()) {
            return Err(ManilaError::unexpected_status(
                response.status.as_u16(),
                response.body,
            ));
        }

        let body = if response.body.trim().is_empty() {
            None
        } else {
            let decoded = serde_json::from_str(&response.body).map_err(|e| {
                ManilaError::serialization(format!("Failed to decode response body: {}", e))
            })?;
            Some(decoded)
        };

        Ok(RawResponse {
            headers: response.headers,
            body,
        })
    }

    /// Request against a resource path, packing the outcome into an
    /// [`ApiResult`].
    pub(crate) async fn issue<T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Value>,
        ok_codes: &[u16],
    ) -> ApiResult<T> {
        let url = match self.resource_url(segments) {
            Ok(url) => url,
            Err(err) => return ApiResult::from_error(err),
        };
        match self.request(method, url, body, ok_codes).await {
            Ok(raw) => ApiResult::from_raw(raw),
            Err(err) => ApiResult::from_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::transport::{HttpResponse, MockHttpTransport};
    use super::*;
    use reqwest::StatusCode;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Widget {
        id: String,
    }

    impl Extractable for Widget {
        const ROOT_KEY: &'static str = "widget";
    }

    fn client_with(transport: MockHttpTransport) -> ServiceClient {
        ServiceClient::with_transport(
            "http://manila.example.com:8786/v2/proj",
            Arc::new(transport),
        )
        .unwrap()
        .with_token("token-123")
    }

    #[test]
    fn test_resource_url_appends_segments() {
        let client = client_with(MockHttpTransport::new());
        let url = client
            .resource_url(&["share-networks", "abc", "action"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://manila.example.com:8786/v2/proj/share-networks/abc/action"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let result = ServiceClient::new("not a url");
        assert!(matches!(result, Err(ManilaError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_request_sends_auth_and_accept_headers() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_send()
            .withf(|req: &HttpRequest| {
                req.headers.get("X-Auth-Token").map(|v| v.to_str().unwrap()) == Some("token-123")
                    && req.headers.get(ACCEPT).map(|v| v.to_str().unwrap())
                        == Some("application/json")
            })
            .times(1)
            .returning(|_| {
                Ok(HttpResponse {
                    status: StatusCode::OK,
                    headers: HeaderMap::new(),
                    body: json!({"widget": {"id": "w1"}}).to_string(),
                })
            });

        let client = client_with(transport);
        let result: ApiResult<Widget> = client
            .issue(Method::GET, &["widgets", "w1"], None, &[200])
            .await;
        assert_eq!(result.extract().unwrap().id, "w1");
    }

    #[tokio::test]
    async fn test_unexpected_status_carries_code_and_body() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse {
                status: StatusCode::BAD_REQUEST,
                headers: HeaderMap::new(),
                body: "bad input".to_string(),
            })
        });

        let client = client_with(transport);
        let result: ApiResult<Widget> = client.issue(Method::GET, &["widgets"], None, &[200]).await;
        match result.extract() {
            Err(ManilaError::UnexpectedStatus { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad input");
            }
            other => panic!("expected unexpected-status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_body_yields_no_payload() {
        let mut transport = MockHttpTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse {
                status: StatusCode::ACCEPTED,
                headers: HeaderMap::new(),
                body: String::new(),
            })
        });

        let client = client_with(transport);
        let result: ApiResult<()> = client
            .issue(Method::DELETE, &["widgets", "w1"], None, &[200, 202, 204])
            .await;
        assert!(result.raw_body().is_none());
        assert!(result.check().is_ok());
    }

    #[test]
    fn test_extract_reports_missing_envelope() {
        let raw = RawResponse {
            headers: HeaderMap::new(),
            body: Some(json!({"something_else": {}})),
        };
        let result: ApiResult<Widget> = ApiResult::from_raw(raw);
        assert!(matches!(
            result.extract(),
            Err(ManilaError::SerializationError(_))
        ));
    }
}
