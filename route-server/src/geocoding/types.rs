//! Reverse geocoding response DTOs.

use serde::Deserialize;

/// Top-level reverse geocoding response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    /// `"OK"`, `"ZERO_RESULTS"`, or a failure status.
    pub status: String,

    pub error_message: Option<String>,

    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// One candidate address, most specific first.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
}
