//! Error codes shared by every service in the workspace.
//!
//! Each code has a SCREAMING_SNAKE_CASE identifier for clients, an integer for
//! logs and dashboards, and a default reason phrase.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::Conflict;
//! assert_eq!(code.as_str(), "CONFLICT");
//! assert_eq!(code.code(), 1005);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Body failed `validator` rules
    ValidationError,
    /// Path segment could not be parsed
    InvalidPath,
    /// Query string could not be parsed
    InvalidQuery,
    /// JSON body could not be read
    JsonExtraction,
    NotFound,
    /// Business rule violated by the current state
    Conflict,
    BadRequest,

    // Server errors
    InternalError,
    ServiceUnavailable,

    // Database errors (2000-2999)
    DatabaseError,

    // Serialization errors (5000-5999)
    SerdeJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidPath => "INVALID_PATH",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Integer code for structured logs:
    /// 1000-1999 client errors, 2000-2999 database errors, 5000-5999 serialization.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidPath => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::Conflict => 1005,
            Self::BadRequest => 1006,
            Self::InvalidQuery => 1007,
            Self::InternalError => 1100,
            Self::ServiceUnavailable => 1101,
            Self::DatabaseError => 2001,
            Self::SerdeJsonError => 5001,
        }
    }

    /// Reason phrase placed in the `reason` field of [`super::ErrorResponse`].
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError
            | Self::InvalidPath
            | Self::InvalidQuery
            | Self::JsonExtraction
            | Self::BadRequest => "Incorrectly made request.",
            Self::NotFound => "The required object was not found.",
            Self::Conflict => "For the requested operation the conditions are not met.",
            Self::ServiceUnavailable => "Service is temporarily unavailable.",
            Self::InternalError | Self::DatabaseError | Self::SerdeJsonError => "Unexpected error.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
