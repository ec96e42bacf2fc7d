//! Configuration shared by the map provider clients.

use std::time::Duration;

use super::error::ClientInitError;

/// Default base URL for the Maps web services (directions, geocoding).
pub const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com";

/// Default base URL for the geolocation service.
pub const DEFAULT_GEOLOCATION_BASE_URL: &str = "https://www.googleapis.com";

/// Default maximum concurrent requests per client.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for a map provider client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_MAPS_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Build the HTTP client these settings describe.
    ///
    /// Fails if the key is blank or cannot travel in a query string, or if
    /// the TLS backend cannot be initialised.
    pub(crate) fn http_client(&self) -> Result<reqwest::Client, ClientInitError> {
        validate_api_key(&self.api_key)?;
        if self.max_concurrent == 0 {
            return Err(ClientInitError::InvalidConfig(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;

        Ok(http)
    }
}

/// Check that `key` is present and can travel in a query string.
///
/// Surrounding whitespace is ignored.
pub fn validate_api_key(key: &str) -> Result<(), ClientInitError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ClientInitError::MissingApiKey);
    }
    if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ClientInitError::InvalidApiKey);
    }
    Ok(())
}
