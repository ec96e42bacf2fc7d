//! Client construction errors.

/// A map provider client could not be constructed.
///
/// For the directions client this keeps the scheduler out of `Ready`
/// for the rest of the process; it is surfaced, never retried.
#[derive(Debug, thiserror::Error)]
pub enum ClientInitError {
    /// No API key configured
    #[error("no API key configured (set MAPS_API_KEY)")]
    MissingApiKey,

    /// API key contains characters that cannot be sent
    #[error("invalid API key format")]
    InvalidApiKey,

    /// Other invalid client settings
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            ClientInitError::MissingApiKey.to_string(),
            "no API key configured (set MAPS_API_KEY)"
        );
        assert_eq!(
            ClientInitError::InvalidConfig("bad".into()).to_string(),
            "invalid client configuration: bad"
        );
    }
}
