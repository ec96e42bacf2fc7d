//! Geocoding Resolver: reverse geocoding client.
//!
//! Resolves a leg endpoint into a human-readable address. Results are
//! never cached: every refresh cycle asks again.

mod client;
mod error;
mod types;

pub use client::GeocodingClient;
pub use error::GeocodeError;
pub use types::{GeocodeResponse, GeocodeResult};
