/*
[INPUT]:  Error sources (HTTP transport, API responses, serialization, configuration)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ErrorResponse;

/// Main error type for the maintenance adapter
#[derive(Error, Debug)]
pub enum MaintenanceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MaintenanceError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            MaintenanceError::Http(err) => err.is_timeout() || err.is_connect(),
            MaintenanceError::Api { status, .. } => *status >= 500 || *status == 429,
            MaintenanceError::InvalidResponse(_) => true,
            _ => false,
        }
    }

    /// Check if the server reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, MaintenanceError::Api { status: 404, .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        MaintenanceError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Build an API error from a non-success response body.
    ///
    /// Uses the backend's `detail` field when present, the raw body otherwise.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => parsed.message(),
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            Err(_) => body.trim().to_string(),
        };
        Self::api_error(status, message)
    }
}

/// Result type alias for maintenance API operations
pub type Result<T> = std::result::Result<T, MaintenanceError>;
