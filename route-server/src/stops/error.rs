//! Stop registry error types.

use crate::domain::StopId;

/// Errors raised while loading the stop registry.
///
/// These are configuration errors: the registry either loads completely or
/// not at all.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two stops share the same `order`, so visiting order is ambiguous
    #[error("duplicate stop order {order} (stops {first} and {second})")]
    DuplicateOrder {
        order: u32,
        first: StopId,
        second: StopId,
    },

    /// Two stops share the same id
    #[error("duplicate stop id {0}")]
    DuplicateId(StopId),

    /// A stop has an empty or whitespace-only name
    #[error("stop {0} has a blank name")]
    BlankName(StopId),

    /// Stops file could not be read
    #[error("failed to read stops file: {0}")]
    Io(#[from] std::io::Error),

    /// Stops file is not valid JSON or contains an invalid coordinate
    #[error("failed to parse stops file: {0}")]
    Json(#[from] serde_json::Error),
}
