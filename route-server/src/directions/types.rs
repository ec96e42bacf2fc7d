//! Directions API response DTOs.
//!
//! These types map directly to the provider's JSON. Fields the provider
//! omits in some responses are `Option` or defaulted.

use serde::Deserialize;

/// Top-level directions response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// `"OK"` on success; anything else is a provider-level failure
    /// (`"ZERO_RESULTS"`, `"NOT_FOUND"`, `"OVER_QUERY_LIMIT"`, ...).
    pub status: String,

    /// Human-readable detail accompanying a non-OK status.
    pub error_message: Option<String>,

    #[serde(default)]
    pub routes: Vec<RouteDto>,
}

/// One candidate route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub legs: Vec<LegDto>,

    pub overview_polyline: Option<PolylineDto>,

    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A leg between two consecutive visited points.
#[derive(Debug, Clone, Deserialize)]
pub struct LegDto {
    pub start_location: LatLngDto,
    pub end_location: LatLngDto,
    pub distance: TextValueDto,
    pub duration: TextValueDto,
}

/// Unvalidated `{lat, lng}` pair.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLngDto {
    pub lat: f64,
    pub lng: f64,
}

/// Distance (meters) or duration (seconds) with its display text.
#[derive(Debug, Clone, Deserialize)]
pub struct TextValueDto {
    pub text: String,
    pub value: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolylineDto {
    pub points: String,
}
