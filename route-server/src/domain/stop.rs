//! Stop types.

use std::fmt;

use serde::Serialize;

use super::Coordinate;

/// Unique identifier of a stop within the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StopId(pub u32);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fixed stop on the route.
///
/// `order` defines the visiting sequence; the registry guarantees it is
/// unique. The device position is never a `Stop`: it travels separately as
/// the route origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub position: Coordinate,
    pub order: u32,
}

impl Stop {
    pub fn new(id: u32, name: impl Into<String>, position: Coordinate, order: u32) -> Self {
        Self {
            id: StopId(id),
            name: name.into(),
            position,
            order,
        }
    }
}
