//! Error types for the health advisor

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Health advisor errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document could not be parsed
    #[error("{0}")]
    Extraction(String),

    /// Remote archive unavailable or upload failed
    #[error("Archive error: {0}")]
    Archive(String),

    /// Generative model call failed
    #[error("Error generating health advice: {0}")]
    Generation(String),

    /// Malformed request (missing fields, unreadable multipart body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Create an archive error
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Error::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            Error::Extraction(_) => (StatusCode::BAD_REQUEST, "extraction_error"),
            Error::Archive(_) => (StatusCode::BAD_GATEWAY, "archive_error"),
            Error::Generation(_) => (StatusCode::SERVICE_UNAVAILABLE, "generation_error"),
            Error::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_maps_to_bad_request() {
        let response = Error::invalid_request("missing field 'query'").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_generation_error_message() {
        let err = Error::generation("quota exceeded");
        assert_eq!(err.to_string(), "Error generating health advice: quota exceeded");
    }

    #[test]
    fn test_internal_error_maps_to_server_error() {
        let err = Error::internal("Task join error: cancelled");
        assert_eq!(err.to_string(), "Internal error: Task join error: cancelled");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
