use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use vitals_log_domain::services::ReadingsServiceError;

/// Error response format for API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    #[schema(example = "validation_error")]
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(id: i64) -> Self {
        Self {
            error: "not_found".to_string(),
            message: format!("Reading {} not found", id),
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.into(),
        }
    }

    /// Create a conflict error response
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            error: "conflict".to_string(),
            message: message.into(),
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
        }
    }

    /// HTTP status matching the error code
    pub fn status(&self) -> StatusCode {
        match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            "conflict" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ReadingsServiceError> for ErrorResponse {
    fn from(err: ReadingsServiceError) -> Self {
        match err {
            ReadingsServiceError::ValidationError(message) => Self::validation_error(message),
            ReadingsServiceError::NotFound(id) => Self::not_found(id),
            ReadingsServiceError::DuplicateId(id) => {
                Self::conflict(format!("A reading with id {} already exists", id))
            }
            ReadingsServiceError::Storage(detail) => {
                error!("Storage failure: {}", detail);
                Self::internal_error()
            }
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_map_to_status_codes() {
        let cases = [
            (ReadingsServiceError::ValidationError("date is required".into()), StatusCode::BAD_REQUEST),
            (ReadingsServiceError::NotFound(7), StatusCode::NOT_FOUND),
            (ReadingsServiceError::DuplicateId(7), StatusCode::CONFLICT),
            (ReadingsServiceError::Storage("disk full".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ErrorResponse::from(err).status(), expected);
        }
    }

    #[test]
    fn test_storage_detail_is_not_exposed() {
        let response = ErrorResponse::from(ReadingsServiceError::Storage(
            "failed to write /srv/data/readings.json".into(),
        ));

        assert_eq!(response.error, "internal_error");
        assert!(!response.message.contains("/srv/data"));
    }
}
