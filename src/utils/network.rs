use crate::error::{ManilaError, Result};
use reqwest::Client;
use std::time::Duration;

/// Configuration for the HTTP client with proper timeouts
pub struct NetworkConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(120),
            user_agent: format!("manila-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create a properly configured HTTP client with timeouts
pub fn create_http_client(config: &NetworkConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| ManilaError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Classify a transport-level reqwest failure into a client error.
///
/// The classification is pass-through: no failure is retried or rewritten,
/// only sorted into timeout, connection and request variants so callers can
/// tell them apart.
pub fn classify_network_error(error: &reqwest::Error, url: &str) -> ManilaError {
    if error.is_timeout() {
        return ManilaError::connection_timeout(format!(
            "Request to '{}' timed out: {}",
            url, error
        ));
    }

    if error.is_connect() {
        return ManilaError::network(format!("Failed to connect to '{}': {}", url, error));
    }

    if error.is_request() {
        return ManilaError::invalid_url(format!("Invalid request to '{}': {}", url, error));
    }

    ManilaError::network(format!("Network error for '{}': {}", url, error))
}
