//! Conversion from directions DTOs to domain types.

use crate::domain::{Coordinate, Leg, Route};

use super::error::RouteError;
use super::types::{DirectionsResponse, LatLngDto, LegDto, RouteDto};

/// The only status value that means success.
pub const STATUS_OK: &str = "OK";

/// Convert a directions response into the first (and only requested) route.
///
/// Any status other than `OK` is a provider-level failure. An `OK` response
/// with no routes is treated as a failure too.
pub fn convert_directions(response: DirectionsResponse) -> Result<Route, RouteError> {
    if response.status != STATUS_OK {
        return Err(RouteError::Status {
            status: response.status,
            message: response.error_message,
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(RouteError::NoRoutes)?;

    convert_route(route)
}

fn convert_route(route: RouteDto) -> Result<Route, RouteError> {
    let legs = route
        .legs
        .iter()
        .map(convert_leg)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Route {
        legs,
        summary: route.summary,
        overview_polyline: route.overview_polyline.map(|p| p.points),
        warnings: route.warnings,
    })
}

fn convert_leg(leg: &LegDto) -> Result<Leg, RouteError> {
    Ok(Leg {
        start: convert_location(leg.start_location)?,
        end: convert_location(leg.end_location)?,
        distance_text: leg.distance.text.clone(),
        duration_text: leg.duration.text.clone(),
        distance_meters: leg.distance.value,
        duration_secs: leg.duration.value,
    })
}

fn convert_location(loc: LatLngDto) -> Result<Coordinate, RouteError> {
    Coordinate::new(loc.lat, loc.lng).map_err(|e| RouteError::InvalidLocation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_LEGS: &str = r#"{
        "status": "OK",
        "geocoded_waypoints": [],
        "routes": [{
            "summary": "KN 5 Rd",
            "overview_polyline": { "points": "a~l~Fjk~uOwHJy@P" },
            "warnings": [],
            "legs": [
                {
                    "start_location": { "lat": 0.0, "lng": 0.0 },
                    "end_location": { "lat": -1.9398, "lng": 30.0445 },
                    "distance": { "text": "5 km", "value": 5000 },
                    "duration": { "text": "10 mins", "value": 600 },
                    "start_address": "Origin",
                    "end_address": "KN 3 Rd, Kigali",
                    "steps": []
                },
                {
                    "start_location": { "lat": -1.9398, "lng": 30.0445 },
                    "end_location": { "lat": -1.9355, "lng": 30.0601 },
                    "distance": { "text": "3 km", "value": 3000 },
                    "duration": { "text": "7 mins", "value": 420 }
                }
            ]
        }]
    }"#;

    fn parse(json: &str) -> DirectionsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn converts_ok_response() {
        let route = convert_directions(parse(TWO_LEGS)).unwrap();

        assert_eq!(route.legs.len(), 2);
        assert_eq!(route.summary, "KN 5 Rd");
        assert_eq!(route.overview_polyline.as_deref(), Some("a~l~Fjk~uOwHJy@P"));

        let first = &route.legs[0];
        assert_eq!(first.distance_text, "5 km");
        assert_eq!(first.duration_text, "10 mins");
        assert_eq!(first.distance_meters, 5000);
        assert_eq!(first.duration_secs, 600);
        assert_eq!(first.end, Coordinate::new(-1.9398, 30.0445).unwrap());

        assert_eq!(route.legs[1].duration_text, "7 mins");
    }

    #[test]
    fn non_ok_status_is_error() {
        let response = parse(
            r#"{"status": "ZERO_RESULTS", "routes": [], "error_message": "no way through"}"#,
        );
        let err = convert_directions(response).unwrap_err();

        match err {
            RouteError::Status { status, message } => {
                assert_eq!(status, "ZERO_RESULTS");
                assert_eq!(message.as_deref(), Some("no way through"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn status_without_routes_field() {
        let err = convert_directions(parse(r#"{"status": "OVER_QUERY_LIMIT"}"#)).unwrap_err();
        assert!(matches!(err, RouteError::Status { .. }));
    }

    #[test]
    fn ok_without_routes_is_error() {
        let err = convert_directions(parse(r#"{"status": "OK", "routes": []}"#)).unwrap_err();
        assert!(matches!(err, RouteError::NoRoutes));
    }

    #[test]
    fn invalid_location_rejected() {
        let response = parse(
            r#"{"status": "OK", "routes": [{"legs": [{
                "start_location": {"lat": 0.0, "lng": 0.0},
                "end_location": {"lat": 123.0, "lng": 0.0},
                "distance": {"text": "1 m", "value": 1},
                "duration": {"text": "1 min", "value": 60}
            }]}]}"#,
        );
        let err = convert_directions(response).unwrap_err();
        assert!(matches!(err, RouteError::InvalidLocation(_)));
    }

    #[test]
    fn zero_length_leg_is_kept() {
        let response = parse(
            r#"{"status": "OK", "routes": [{"legs": [{
                "start_location": {"lat": 1.0, "lng": 1.0},
                "end_location": {"lat": 1.0, "lng": 1.0},
                "distance": {"text": "1 m", "value": 0},
                "duration": {"text": "1 min", "value": 0}
            }]}]}"#,
        );
        let route = convert_directions(response).unwrap();
        assert_eq!(route.legs.len(), 1);
        assert!(route.legs[0].is_stationary());
    }
}
