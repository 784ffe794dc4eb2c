//! API error types for the Prime REST API client.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::CredentialsError;

/// API-specific error type for the Prime REST API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP/network error from reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing or rejected API key (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(ErrorResponse),

    /// Permission denied, signature mismatch (403)
    #[error("Permission denied: {0}")]
    Forbidden(ErrorResponse),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(ErrorResponse),

    /// Invalid request parameters (400)
    #[error("Bad request: {0}")]
    BadRequest(ErrorResponse),

    /// Resource already exists (409)
    #[error("Conflict: {0}")]
    Conflict(ErrorResponse),

    /// Too many requests (429)
    #[error("Rate limited: {0}")]
    RateLimited(ErrorResponse),

    /// Server-side error (5xx)
    #[error("Server error: {0}")]
    ServerError(ErrorResponse),

    /// Unexpected HTTP status code
    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, ErrorResponse),

    /// Response or request body (de)serialization error
    #[error("Deserialization error: {0}")]
    Deserialize(String),

    /// Invalid parameter provided
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Credentials could not be loaded or used
    #[error("Credentials error: {0}")]
    Credentials(#[from] CredentialsError),
}

impl ApiError {
    /// HTTP status carried by the error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::BadRequest(_) => Some(400),
            Self::Conflict(_) => Some(409),
            Self::RateLimited(_) => Some(429),
            Self::UnexpectedStatus(status, _) => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Parsed error body, if the error came from a response.
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Unauthorized(r)
            | Self::Forbidden(r)
            | Self::NotFound(r)
            | Self::BadRequest(r)
            | Self::Conflict(r)
            | Self::RateLimited(r)
            | Self::ServerError(r)
            | Self::UnexpectedStatus(_, r) => Some(r),
            _ => None,
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response format from the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[serde(default, alias = "error")]
    pub message: Option<String>,
    /// Additional error details
    #[serde(default)]
    pub details: Option<String>,
    /// Machine-readable error code
    #[serde(default)]
    pub code: Option<String>,
}

impl ErrorResponse {
    /// Wrap a non-JSON body.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            ..Default::default()
        }
    }

    /// Parse a response body, falling back to the raw text.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .filter(|r| r.message.is_some() || r.details.is_some() || r.code.is_some())
            .unwrap_or_else(|| Self::from_text(body))
    }

    /// Get the error message, preferring `message` over `details`.
    pub fn get_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.details.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({})", self.get_message(), code),
            None => f.write_str(&self.get_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_from_json_body() {
        let r = ErrorResponse::from_body(r#"{"message": "order not found", "code": "NOT_FOUND"}"#);
        assert_eq!(r.message.as_deref(), Some("order not found"));
        assert_eq!(r.to_string(), "order not found (NOT_FOUND)");
    }

    #[test]
    fn test_error_response_alias_and_details() {
        let r = ErrorResponse::from_body(r#"{"error": "bad signature"}"#);
        assert_eq!(r.get_message(), "bad signature");

        let r = ErrorResponse::from_body(r#"{"details": "limit too large"}"#);
        assert_eq!(r.get_message(), "limit too large");
    }

    #[test]
    fn test_error_response_falls_back_to_text() {
        let r = ErrorResponse::from_body("<html>gateway timeout</html>");
        assert_eq!(r.get_message(), "<html>gateway timeout</html>");

        let r = ErrorResponse::from_body(r#"{"unrelated": true}"#);
        assert_eq!(r.get_message(), r#"{"unrelated": true}"#);
    }

    #[test]
    fn test_api_error_status() {
        let err = ApiError::NotFound(ErrorResponse::from_text("missing"));
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Not found: missing");
        assert!(err.response().is_some());

        let err = ApiError::UnexpectedStatus(418, ErrorResponse::default());
        assert_eq!(err.status(), Some(418));
        assert_eq!(err.to_string(), "Unexpected status 418: Unknown error");

        let err = ApiError::InvalidParameter("portfolio_id cannot be empty".into());
        assert_eq!(err.status(), None);
    }
}
