//! Provider traits the aggregator is written against.
//!
//! These abstractions let the aggregator and scheduler run against stub
//! providers in tests and against the HTTP clients in production.

use std::future::Future;
use std::sync::Arc;

use crate::directions::RouteError;
use crate::domain::{Coordinate, Route};
use crate::geocoding::GeocodeError;

/// Computes driving routes through an ordered list of points.
pub trait RouteProvider: Send + Sync {
    /// Route from `origin` through `waypoints` (in order, as stopovers) to
    /// `destination`.
    ///
    /// `waypoints` excludes origin and destination. The result must hold one
    /// leg per consecutive pair of `[origin, ..waypoints, destination]`.
    fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> impl Future<Output = Result<Route, RouteError>> + Send;
}

/// Resolves coordinates into display names.
pub trait NameResolver: Send + Sync {
    fn resolve_name(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<String, GeocodeError>> + Send;
}

impl<T: RouteProvider> RouteProvider for Arc<T> {
    fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        waypoints: &[Coordinate],
    ) -> impl Future<Output = Result<Route, RouteError>> + Send {
        (**self).compute_route(origin, destination, waypoints)
    }
}

impl<T: NameResolver> NameResolver for Arc<T> {
    fn resolve_name(
        &self,
        at: Coordinate,
    ) -> impl Future<Output = Result<String, GeocodeError>> + Send {
        (**self).resolve_name(at)
    }
}
