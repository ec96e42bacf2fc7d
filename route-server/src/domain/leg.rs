//! Routed legs as returned by the directions provider.

use serde::Serialize;

use super::Coordinate;

/// One directed segment between two consecutive visited points.
///
/// The text fields are provider-formatted for display ("5.2 km",
/// "12 mins"); the numeric fields carry the same values in meters and
/// seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub start: Coordinate,
    pub end: Coordinate,
    pub distance_text: String,
    pub duration_text: String,
    pub distance_meters: u64,
    pub duration_secs: u64,
}

impl Leg {
    /// True when start and end coincide (consecutive duplicate stops).
    ///
    /// Such legs are still valid and are displayed like any other.
    pub fn is_stationary(&self) -> bool {
        self.distance_meters == 0 && self.duration_secs == 0
    }
}

/// A routed path through origin, waypoints and destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// One leg per consecutive pair of visited points, in visiting order.
    pub legs: Vec<Leg>,

    /// Short provider description, usually the main roads taken.
    pub summary: String,

    /// Encoded overview polyline for drawing the route.
    pub overview_polyline: Option<String>,

    /// Warnings the provider asks to be shown with the route.
    pub warnings: Vec<String>,
}

impl Route {
    pub fn total_distance_meters(&self) -> u64 {
        self.legs.iter().map(|l| l.distance_meters).sum()
    }

    pub fn total_duration_secs(&self) -> u64 {
        self.legs.iter().map(|l| l.duration_secs).sum()
    }
}
