//! Geolocation error types.

/// The one-shot origin lookup failed.
///
/// Fatal to leaving `AwaitingOrigin`: it is surfaced to the presentation
/// layer and never retried.
#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider rejected the request
    #[error("geolocation API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Provider returned an impossible position
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// Position could not be determined
    #[error("position unavailable: {0}")]
    Unavailable(String),
}
