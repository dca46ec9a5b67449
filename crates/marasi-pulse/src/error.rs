//! Error types for the open-data API client.

use thiserror::Error;

/// Errors that can occur when fetching datasets from the open-data API.
#[derive(Debug, Error)]
pub enum PulseError {
    /// Missing base URL configuration.
    #[error("MARASI_DATA_URL environment variable not set")]
    MissingBaseUrl,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("Open-data API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded by the open-data API")]
    RateLimitExceeded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PulseError::Api("HTTP 500: boom".to_string());
        assert_eq!(err.to_string(), "Open-data API error: HTTP 500: boom");
        assert_eq!(
            PulseError::MissingBaseUrl.to_string(),
            "MARASI_DATA_URL environment variable not set"
        );
    }
}
