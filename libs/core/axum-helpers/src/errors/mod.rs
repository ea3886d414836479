pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body returned for every error response.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "status": "NOT_FOUND",
///   "reason": "The required object was not found.",
///   "message": "Event with id=7 was not found",
///   "timestamp": "2025-03-01 12:00:00"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable identifier
    pub error: String,
    /// HTTP status name, e.g. `CONFLICT`
    pub status: String,
    /// General reason for this class of error
    pub reason: String,
    /// What went wrong in this request
    pub message: String,
    /// Moment the error was produced, `yyyy-MM-dd HH:mm:ss`
    pub timestamp: String,
    /// Field errors for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            status: status_name(status),
            reason: code.default_message().to_string(),
            message: message.into(),
            timestamp: crate::datetime::to_string(&Utc::now()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// `404 Not Found` → `NOT_FOUND`
fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace([' ', '-'], "_")
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::SerdeJson(_) | AppError::Database(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::JsonExtractorRejection(e) => e.status(),
            AppError::InvalidQuery(_)
            | AppError::InvalidPath(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::SerdeJson(e) => {
                tracing::error!(error_code = ErrorCode::SerdeJsonError.code(), error = ?e, "JSON serialization error");
                ErrorResponse::new(status, ErrorCode::SerdeJsonError, e.to_string())
            }
            AppError::Database(e) => {
                tracing::error!(error_code = ErrorCode::DatabaseError.code(), error = ?e, "Database error");
                ErrorResponse::new(status, ErrorCode::DatabaseError, "A database error occurred")
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = ErrorCode::JsonExtraction.code(), error = ?e, "JSON extraction error");
                ErrorResponse::new(status, ErrorCode::JsonExtraction, e.body_text())
            }
            AppError::InvalidQuery(msg) => {
                tracing::warn!(error_code = ErrorCode::InvalidQuery.code(), "Invalid query: {}", msg);
                ErrorResponse::new(status, ErrorCode::InvalidQuery, msg)
            }
            AppError::InvalidPath(msg) => {
                tracing::warn!(error_code = ErrorCode::InvalidPath.code(), "Invalid path: {}", msg);
                ErrorResponse::new(status, ErrorCode::InvalidPath, msg)
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "Validation error: {}", e);
                let details = serde_json::to_value(&e).unwrap_or(serde_json::Value::Null);
                ErrorResponse::new(status, ErrorCode::ValidationError, e.to_string())
                    .with_details(details)
            }
            AppError::BadRequest(msg) => {
                tracing::warn!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                ErrorResponse::new(status, ErrorCode::BadRequest, msg)
            }
            AppError::NotFound(msg) => {
                tracing::warn!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                ErrorResponse::new(status, ErrorCode::NotFound, msg)
            }
            AppError::Conflict(msg) => {
                tracing::warn!(error_code = ErrorCode::Conflict.code(), "Conflict: {}", msg);
                ErrorResponse::new(status, ErrorCode::Conflict, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), "Internal server error: {}", msg);
                ErrorResponse::new(status, ErrorCode::InternalError, msg)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = ErrorCode::ServiceUnavailable.code(), "Service unavailable: {}", msg);
                ErrorResponse::new(status, ErrorCode::ServiceUnavailable, msg)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Build an error response outside of an `AppError`, e.g. in a fallback handler.
pub fn error_response(status: StatusCode, message: impl Into<String>, code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(status, code, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = AppError::NotFound("Event with id=7 was not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["status"], "NOT_FOUND");
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["reason"], "The required object was not found.");
        assert_eq!(body["message"], "Event with id=7 was not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_conflict_status() {
        let response = AppError::Conflict("limit reached".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["status"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let response = AppError::Database(DbErr::Custom("password leaked".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "A database error occurred");
        assert_eq!(body["status"], "INTERNAL_SERVER_ERROR");
    }

    #[test]
    fn test_timestamp_uses_wire_format() {
        let body = ErrorResponse::new(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, "x");
        assert!(crate::datetime::parse(&body.timestamp).is_ok());
    }
}
