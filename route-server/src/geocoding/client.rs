//! Reverse geocoding HTTP client.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::Coordinate;
use crate::itinerary::NameResolver;
use crate::maps::{ClientInitError, MapsConfig, truncate_body};

use super::error::GeocodeError;
use super::types::GeocodeResponse;

/// Reverse geocoding API client.
///
/// Each call is independent. A semaphore bounds how many lookups are in
/// flight at once, since one refresh cycle fans out a lookup per leg.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl GeocodingClient {
    /// Create a new geocoding client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, ClientInitError> {
        let http = config.http_client()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Resolve a coordinate to its most specific formatted address.
    pub async fn reverse_geocode(&self, at: Coordinate) -> Result<String, GeocodeError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| GeocodeError::LimiterClosed)?;

        let url = format!("{}/maps/api/geocode/json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("latlng", at.to_string()), ("key", self.api_key.clone())])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        let body = response.text().await?;

        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
                body: Some(truncate_body(&body)),
            })?;

        let address = first_address(parsed, at)?;
        trace!(at = %at, address = %address, "Resolved address");
        Ok(address)
    }
}

impl NameResolver for GeocodingClient {
    async fn resolve_name(&self, at: Coordinate) -> Result<String, GeocodeError> {
        self.reverse_geocode(at).await
    }
}

/// Pick `results[0].formatted_address`.
///
/// `ZERO_RESULTS`, or `OK` with an empty list, is reported as
/// [`GeocodeError::NoResults`]; any other non-OK status is a provider
/// failure.
fn first_address(response: GeocodeResponse, at: Coordinate) -> Result<String, GeocodeError> {
    match response.status.as_str() {
        "OK" | "ZERO_RESULTS" => {}
        _ => {
            return Err(GeocodeError::Status {
                status: response.status,
                message: response.error_message,
            });
        }
    }

    response
        .results
        .into_iter()
        .map(|r| r.formatted_address)
        .find(|a| !a.trim().is_empty())
        .ok_or(GeocodeError::NoResults(at))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> Coordinate {
        Coordinate::new(-1.939826787816454, 30.0445426438232).unwrap()
    }

    fn parse(json: &str) -> GeocodeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn takes_first_result() {
        let response = parse(
            r#"{
                "status": "OK",
                "results": [
                    {"formatted_address": "KN 3 Rd, Kigali, Rwanda", "place_id": "abc", "types": ["route"]},
                    {"formatted_address": "Kigali, Rwanda", "types": ["locality"]}
                ]
            }"#,
        );
        assert_eq!(first_address(response, at()).unwrap(), "KN 3 Rd, Kigali, Rwanda");
    }

    #[test]
    fn zero_results_is_no_results() {
        let response = parse(r#"{"status": "ZERO_RESULTS", "results": []}"#);
        assert!(matches!(
            first_address(response, at()),
            Err(GeocodeError::NoResults(_))
        ));
    }

    #[test]
    fn ok_with_empty_results_is_no_results() {
        let response = parse(r#"{"status": "OK", "results": []}"#);
        assert!(matches!(
            first_address(response, at()),
            Err(GeocodeError::NoResults(_))
        ));
    }

    #[test]
    fn failure_status_is_error() {
        let response = parse(
            r#"{"status": "REQUEST_DENIED", "error_message": "API key invalid", "results": []}"#,
        );
        match first_address(response, at()) {
            Err(GeocodeError::Status { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message.as_deref(), Some("API key invalid"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn client_creation() {
        assert!(GeocodingClient::new(MapsConfig::new("test-key")).is_ok());
        assert!(GeocodingClient::new(MapsConfig::new("")).is_err());
    }
}
