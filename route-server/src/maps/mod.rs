//! Shared plumbing for the map provider HTTP clients.
//!
//! Directions, reverse geocoding and geolocation all live on the same
//! provider platform: they share an API key, timeout settings and the
//! way a client is constructed.

mod config;
mod error;

pub use config::{
    DEFAULT_GEOLOCATION_BASE_URL, DEFAULT_MAPS_BASE_URL, MapsConfig, validate_api_key,
};
pub use error::ClientInitError;

/// Keep error bodies short enough to log.
pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(500).collect()
}
