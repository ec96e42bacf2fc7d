//! Route request error types.

/// Errors from a route request.
///
/// Every variant is recoverable: the refresh cycle that saw it is dropped,
/// the previous itinerary stays on display and the next tick retries.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// HTTP request failed (network error, timeout, etc.)
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

    /// Provider-level failure status (anything but `OK`)
    #[error("directions request failed with status {status}{}", detail(.message))]
    Status {
        status: String,
        message: Option<String>,
    },

    /// Status was OK but no route came back
    #[error("provider returned no routes")]
    NoRoutes,

    /// More waypoints than the provider accepts in one request
    #[error("too many waypoints: {count} (provider maximum is {max})")]
    TooManyWaypoints { count: usize, max: usize },

    /// A routed location was outside the valid coordinate range
    #[error("invalid location in response: {0}")]
    InvalidLocation(String),

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
