//! The fixed, ordered stop set.

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{Coordinate, Stop, StopId};

use super::error::RegistryError;

/// One entry of a stops file.
///
/// ```json
/// [{ "id": 1, "name": "Stop B", "lat": -1.9398, "lng": 30.0445, "order": 1 }]
/// ```
#[derive(Debug, Deserialize)]
struct StopEntry {
    id: u32,
    name: String,
    lat: f64,
    lng: f64,
    order: u32,
}

/// Immutable registry of route stops, sorted by `order`.
///
/// Duplicate orders and ids are rejected at construction, so the visiting
/// sequence is total and deterministic for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct StopRegistry {
    stops: Vec<Stop>,
}

impl StopRegistry {
    /// Build a registry from stops in any order.
    pub fn new(mut stops: Vec<Stop>) -> Result<Self, RegistryError> {
        let mut ids = HashSet::new();
        let mut orders: HashMap<u32, StopId> = HashMap::new();

        for stop in &stops {
            if stop.name.trim().is_empty() {
                return Err(RegistryError::BlankName(stop.id));
            }
            if !ids.insert(stop.id) {
                return Err(RegistryError::DuplicateId(stop.id));
            }
            if let Some(&first) = orders.get(&stop.order) {
                return Err(RegistryError::DuplicateOrder {
                    order: stop.order,
                    first,
                    second: stop.id,
                });
            }
            orders.insert(stop.order, stop.id);
        }

        stops.sort_by_key(|s| s.order);

        Ok(Self { stops })
    }

    /// Load a registry from a JSON stops file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a registry from a JSON array of stop entries.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let entries: Vec<StopEntry> = serde_json::from_str(json)?;

        let stops = entries
            .into_iter()
            .map(|e| {
                let position = Coordinate::new(e.lat, e.lng).map_err(|err| {
                    RegistryError::Json(serde::de::Error::custom(format!(
                        "stop {}: {err}",
                        e.id
                    )))
                })?;
                Ok(Stop::new(e.id, e.name, position, e.order))
            })
            .collect::<Result<Vec<_>, RegistryError>>()?;

        Self::new(stops)
    }

    /// All stops, sorted by `order` ascending.
    pub fn list_stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn at(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn sorts_by_order() {
        let registry = StopRegistry::new(vec![
            Stop::new(3, "C", at(0.0, 3.0), 30),
            Stop::new(1, "A", at(0.0, 1.0), 10),
            Stop::new(2, "B", at(0.0, 2.0), 20),
        ])
        .unwrap();

        let names: Vec<_> = registry.list_stops().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn listing_is_stable() {
        let registry = StopRegistry::new(vec![
            Stop::new(2, "B", at(0.0, 2.0), 2),
            Stop::new(1, "A", at(0.0, 1.0), 1),
        ])
        .unwrap();

        assert_eq!(registry.list_stops(), registry.list_stops());
    }

    #[test]
    fn rejects_duplicate_order() {
        let err = StopRegistry::new(vec![
            Stop::new(1, "A", at(0.0, 1.0), 1),
            Stop::new(2, "B", at(0.0, 2.0), 1),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            RegistryError::DuplicateOrder {
                order: 1,
                first: StopId(1),
                second: StopId(2),
            }
        ));
    }

    #[test]
    fn rejects_duplicate_id() {
        let err = StopRegistry::new(vec![
            Stop::new(7, "A", at(0.0, 1.0), 1),
            Stop::new(7, "B", at(0.0, 2.0), 2),
        ])
        .unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateId(StopId(7))));
    }

    #[test]
    fn rejects_blank_name() {
        let err = StopRegistry::new(vec![Stop::new(1, "  ", at(0.0, 1.0), 1)]).unwrap_err();
        assert!(matches!(err, RegistryError::BlankName(StopId(1))));
    }

    #[test]
    fn empty_registry_is_allowed() {
        let registry = StopRegistry::new(vec![]).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn loads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": 2, "name": "Stop C", "lat": -1.93, "lng": 30.06, "order": 2}},
                {{"id": 1, "name": "Stop B", "lat": -1.94, "lng": 30.04, "order": 1}}
            ]"#
        )
        .unwrap();

        let registry = StopRegistry::from_json_file(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.list_stops()[0].name, "Stop B");
        assert_eq!(registry.list_stops()[1].id, StopId(2));
    }

    #[test]
    fn json_with_invalid_coordinate_is_rejected() {
        let err = StopRegistry::from_json(
            r#"[{"id": 1, "name": "Pole", "lat": 95.0, "lng": 0.0, "order": 1}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, RegistryError::Json(_)));
        assert!(err.to_string().contains("stop 1"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = StopRegistry::from_json_file("/nonexistent/stops.json").unwrap_err();
        assert!(matches!(err, RegistryError::Io(_)));
    }
}
