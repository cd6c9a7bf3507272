//! Gateway error types.
//!
//! Every non-2xx response carries an [`ErrorBody`] `{error, message}` where
//! `error` is a fixed tag and `message` is a human-readable hint.

use axum::extract::rejection::{BytesRejection, FormRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared_types::ErrorBody;
use std::fmt;
use ws_01_signature_verification::Rejection;

/// Fixed error tags
pub mod tags {
    pub const MISSING_FIELDS: &str = "Missing required fields";
    pub const INVALID_FIELD_TYPES: &str = "Invalid field types";
    pub const INVALID_JSON: &str = "Invalid JSON";
    pub const INVALID_BODY: &str = "Invalid request body";
    pub const PAYLOAD_TOO_LARGE: &str = "Payload too large";
    pub const INTERNAL: &str = "Internal server error";
    pub const NOT_FOUND: &str = "Not found";
}

/// API error with HTTP status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: StatusCode,
    /// Fixed tag
    pub error: &'static str,
    /// Human-readable hint
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error,
            message: message.into(),
        }
    }

    /// `message` or `signature` absent or falsy
    pub fn missing_fields() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            tags::MISSING_FIELDS,
            r#"Both "message" and "signature" are required"#,
        )
    }

    /// `message` or `signature` not a string
    pub fn invalid_field_types() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            tags::INVALID_FIELD_TYPES,
            r#"Both "message" and "signature" must be strings"#,
        )
    }

    /// Syntactically invalid JSON body
    pub fn invalid_json(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, tags::INVALID_JSON, details)
    }

    /// Body exceeds the configured limit
    pub fn payload_too_large(details: impl Into<String>) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, tags::PAYLOAD_TOO_LARGE, details)
    }

    /// Unexpected failure; details stay in the logs
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            tags::INTERNAL,
            "An error occurred while verifying the signature",
        )
    }

    /// No route for this method and path
    pub fn not_found(method: &str, path: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            tags::NOT_FOUND,
            format!("Route {} {} not found", method, path),
        )
    }

    /// Wire body for this error
    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(self.error, self.message.clone())
    }

    fn from_body_failure(status: StatusCode, text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::payload_too_large(text)
        } else {
            Self::new(StatusCode::BAD_REQUEST, tags::INVALID_BODY, text)
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status.as_u16(), self.error, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

impl From<Rejection> for ApiError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::MissingFields => Self::missing_fields(),
            Rejection::InvalidFieldTypes => Self::invalid_field_types(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_json(e.to_string())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::from_body_failure(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::from_body_failure(rejection.status(), rejection.body_text())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (startup and serving, not per-request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_mapping() {
        let err = ApiError::from(Rejection::MissingFields);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, "Missing required fields");
        assert_eq!(err.message, r#"Both "message" and "signature" are required"#);

        let err = ApiError::from(Rejection::InvalidFieldTypes);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, "Invalid field types");
        assert_eq!(err.message, r#"Both "message" and "signature" must be strings"#);
    }

    #[test]
    fn test_internal_hides_details() {
        let err = ApiError::internal();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error, "Internal server error");
        assert_eq!(
            err.message,
            "An error occurred while verifying the signature"
        );
    }

    #[test]
    fn test_not_found_names_route() {
        let err = ApiError::not_found("DELETE", "/verify-signature");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Route DELETE /verify-signature not found");
    }

    #[test]
    fn test_error_body_serialization() {
        let json = serde_json::to_value(ApiError::missing_fields().body()).unwrap();
        assert_eq!(json["error"], "Missing required fields");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_from_serde_error() {
        let json_err: Result<serde_json::Value, _> = serde_json::from_str("{invalid json");
        let api_err: ApiError = json_err.unwrap_err().into();
        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.error, "Invalid JSON");
    }

    #[test]
    fn test_display() {
        let err = ApiError::payload_too_large("length limit exceeded");
        assert_eq!(
            err.to_string(),
            "[413] Payload too large: length limit exceeded"
        );
    }
}
