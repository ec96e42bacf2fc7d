//! Route Requester: directions provider client.
//!
//! Turns an origin, an ordered waypoint list and a destination into a
//! [`Route`](crate::domain::Route) with one leg per consecutive pair of
//! points. The provider answers with an overall status where only `OK`
//! means success.

mod client;
mod convert;
mod error;
mod types;

pub use client::{DirectionsClient, MAX_WAYPOINTS};
pub use convert::{STATUS_OK, convert_directions};
pub use error::RouteError;
pub use types::{DirectionsResponse, LatLngDto, LegDto, PolylineDto, RouteDto, TextValueDto};
