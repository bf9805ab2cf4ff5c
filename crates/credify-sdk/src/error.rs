//! Error type for the Credify SDK.

use thiserror::Error;

/// Failure of any call to the verification service
///
/// Network failures, non-2xx answers and undecodable bodies all end up here.
/// `Display` is the bare message so it can be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable description
    pub message: String,

    /// HTTP status, when a response was received
    pub status: Option<u16>,
}

impl ApiError {
    /// Create an error with an explicit message and status
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Error for a non-2xx response
    ///
    /// The body becomes the message when it has any content; otherwise a
    /// generic status-coded message is used.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!("HTTP error! status: {}", status)
        } else {
            body.to_string()
        };
        Self::new(message, Some(status))
    }

    /// Error for a 2xx response whose body could not be decoded
    pub fn decode(status: u16, cause: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to parse response: {}", cause), Some(status))
    }

    /// Error for a malformed service address
    pub fn invalid_base_url(url: &str, cause: impl std::fmt::Display) -> Self {
        Self::new(format!("Invalid base URL '{}': {}", url, cause), None)
    }

    /// HTTP status, if any
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether the service reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        let status = e.status().map(|s| s.as_u16());
        if e.is_decode() {
            ApiError::new(format!("Failed to parse response: {}", e), status)
        } else {
            ApiError::new(format!("Network error: {}", e), status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_body() {
        let err = ApiError::from_status(500, "Internal error");
        assert_eq!(err.to_string(), "Internal error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_status_error_without_body() {
        let err = ApiError::from_status(503, "  \n");
        assert_eq!(err.message, "HTTP error! status: 503");
    }

    #[test]
    fn test_not_found() {
        assert!(ApiError::from_status(404, "").is_not_found());
        assert!(!ApiError::from_status(500, "").is_not_found());
        assert!(!ApiError::new("offline", None).is_not_found());
    }
}
