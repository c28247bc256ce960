//! # Web API Error Types
//!
//! Error types specific to the web API and their HTTP response conversions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::ContactApiError;

/// Web API specific errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Response serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Create a BadRequest error with a custom message
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::SerializationError { .. } => "SERIALIZATION_ERROR",
            ApiError::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::BadRequest { message } => message.clone(),
            ApiError::SerializationError { .. } => "Failed to encode response".to_string(),
            other => other.to_string(),
        };

        let error_response = json!({
            "error": {
                "code": self.error_code(),
                "message": message
            }
        });

        (self.status_code(), Json(error_response)).into_response()
    }
}

impl From<ContactApiError> for ApiError {
    fn from(err: ContactApiError) -> Self {
        match err {
            ContactApiError::Deserialization(message) => ApiError::BadRequest { message },
            ContactApiError::Serialization(message) => ApiError::SerializationError { message },
            ContactApiError::ShuttingDown(_) => ApiError::ServiceUnavailable,
            ContactApiError::AuxiliaryFailure(_) | ContactApiError::Configuration(_) => {
                ApiError::Internal
            }
        }
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;
