//! Geolocation HTTP client.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::Coordinate;
use crate::maps::{ClientInitError, MapsConfig, truncate_body};

use super::error::GeolocationError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeolocateRequest {
    consider_ip: bool,
}

#[derive(Debug, Deserialize)]
struct GeolocateResponse {
    location: LatLng,
    accuracy: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

/// Client for the device geolocation API.
///
/// With no radio measurements to send, the provider locates the caller
/// from its IP address.
#[derive(Debug, Clone)]
pub struct GeolocationClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeolocationClient {
    /// Create a new geolocation client.
    pub fn new(config: MapsConfig) -> Result<Self, ClientInitError> {
        let http = config.http_client()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.trim().to_string(),
        })
    }

    /// Ask the provider where this device is.
    pub async fn geolocate(&self) -> Result<Coordinate, GeolocationError> {
        let url = format!("{}/geolocation/v1/geolocate", self.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GeolocateRequest { consider_ip: true })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| truncate_body(&body));

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(GeolocationError::Unavailable(message));
            }
            return Err(GeolocationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_position(&body)
    }
}

fn parse_position(body: &str) -> Result<Coordinate, GeolocationError> {
    if let Ok(err) = serde_json::from_str::<ErrorResponse>(body) {
        return Err(GeolocationError::Api {
            status: err.error.code,
            message: err.error.message,
        });
    }

    let parsed: GeolocateResponse =
        serde_json::from_str(body).map_err(|e| GeolocationError::Json {
            message: e.to_string(),
        })?;

    let position = Coordinate::new(parsed.location.lat, parsed.location.lng)
        .map_err(|e| GeolocationError::InvalidPosition(e.to_string()))?;

    info!(
        position = %position,
        accuracy_m = parsed.accuracy.unwrap_or_default(),
        "Located device"
    );

    Ok(position)
}
