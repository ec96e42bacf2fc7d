//! Reverse geocoding error types.

use crate::domain::Coordinate;

/// Errors resolving a coordinate into a display name.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Provider-level failure status
    #[error("geocoding failed with status {status}{}", detail(.message))]
    Status {
        status: String,
        message: Option<String>,
    },

    /// No address is known for the coordinate
    #[error("no address found for {0}")]
    NoResults(Coordinate),

    /// Concurrency limiter was shut down
    #[error("request limiter closed")]
    LimiterClosed,
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}
