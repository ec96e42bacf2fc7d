//! Origin providers.
//!
//! The device position is requested exactly once at startup. It seeds the
//! route origin and is never polled again.

mod client;
mod error;

use std::future::Future;

use crate::domain::Coordinate;

pub use client::GeolocationClient;
pub use error::GeolocationError;

/// A one-shot source of the route origin.
pub trait LocationProvider: Send + Sync {
    /// Determine the current position.
    fn locate(&self) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

/// The origin providers the server can be configured with.
#[derive(Debug, Clone)]
pub enum Locator {
    /// A position given in configuration.
    Fixed(Coordinate),
    /// Ask the geolocation API.
    Remote(GeolocationClient),
}

impl LocationProvider for Locator {
    async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        match self {
            Locator::Fixed(at) => Ok(*at),
            Locator::Remote(client) => client.geolocate().await,
        }
    }
}
