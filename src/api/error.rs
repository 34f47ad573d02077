//! API-specific error types
//!
//! All failures the remote endpoints can produce, categorized by transport
//! stage. The UI collapses these into a single user-facing message per
//! request kind; the categories exist for logging and tests.

use thiserror::Error;

/// Errors that can occur while talking to the remote API
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL or a constructed request URL is unusable
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// DNS resolution failed for the API host
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// TCP connection could not be established
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// The server answered with a non-success status code
    #[error("Request failed with HTTP {status}")]
    Status {
        /// HTTP status code returned by the server
        status: u16,
    },

    /// The response could not be parsed (bad HTTP framing or bad JSON)
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// I/O error while writing the request or reading the response
    #[error("I/O error: {0}")]
    Io(String),
}

impl ApiError {
    /// Whether this error came back as an HTTP status rather than a
    /// transport failure
    #[must_use]
    pub const fn is_http_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_includes_code() {
        let err = ApiError::Status { status: 500 };
        assert_eq!(err.to_string(), "Request failed with HTTP 500");
        assert!(err.is_http_status());
    }

    #[test]
    fn test_timeout_display() {
        let err = ApiError::Timeout(10_000);
        assert_eq!(err.to_string(), "Request timed out after 10000ms");
        assert!(!err.is_http_status());
    }

    #[test]
    fn test_connect_display() {
        let err = ApiError::Connect("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
