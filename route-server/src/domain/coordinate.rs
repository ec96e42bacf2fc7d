//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lng}): {reason}")]
pub struct InvalidCoordinate {
    lat: f64,
    lng: f64,
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair.
///
/// Both components are finite, latitude lies in `[-90, 90]` and longitude
/// in `[-180, 180]`. Any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use route_server::domain::Coordinate;
///
/// let kigali = Coordinate::new(-1.9441, 30.0619).unwrap();
/// assert_eq!(kigali.to_string(), "-1.9441,30.0619");
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

/// Unvalidated wire form; matches the `{lat, lng}` objects the map
/// providers send.
#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    /// Create a coordinate, validating both components.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        let invalid = |reason| InvalidCoordinate { lat, lng, reason };

        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid("components must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self { lat, lng })
    }

    /// Parse a `"lat,lng"` pair, as accepted in environment configuration.
    pub fn parse(s: &str) -> Result<Self, InvalidCoordinate> {
        let unparsable = InvalidCoordinate {
            lat: f64::NAN,
            lng: f64::NAN,
            reason: "expected \"lat,lng\"",
        };

        let (lat, lng) = s.split_once(',').ok_or_else(|| unparsable.clone())?;
        let lat = lat.trim().parse().map_err(|_| unparsable.clone())?;
        let lng = lng.trim().parse().map_err(|_| unparsable)?;

        Self::new(lat, lng)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Formats as `lat,lng`, the form map provider query strings expect.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
