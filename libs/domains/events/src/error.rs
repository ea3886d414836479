use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_categories::CategoryError;
use domain_users::UserError;
use thiserror::Error;

use crate::models::EventState;

#[derive(Debug, Error)]
pub enum EventError {
    /// Absent, or present but owned by someone else
    #[error("{entity} with id={id} was not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Business rule violated by the current state
    #[error("{0}")]
    Conflict(String),

    /// Malformed filter, date or enum value
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    pub fn event_not_found(id: i64) -> Self {
        Self::NotFound { entity: "Event", id }
    }

    pub fn request_not_found(id: i64) -> Self {
        Self::NotFound { entity: "Request", id }
    }

    pub fn compilation_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Compilation",
            id,
        }
    }

    pub fn comment_not_found(id: i64) -> Self {
        Self::NotFound { entity: "Comment", id }
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound { entity: "User", id }
    }

    pub fn category_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "Category",
            id,
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Another update moved the event on before this one was written
    pub fn state_changed(id: i64, current: EventState) -> Self {
        Self::Conflict(format!(
            "Event with id={} was concurrently changed to {}, retry the update",
            id, current
        ))
    }
}

impl From<sea_orm::DbErr> for EventError {
    fn from(err: sea_orm::DbErr) -> Self {
        EventError::Internal(format!("Database error: {}", err))
    }
}

impl From<validator::ValidationErrors> for EventError {
    fn from(err: validator::ValidationErrors) -> Self {
        EventError::Validation(err.to_string())
    }
}

impl From<UserError> for EventError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => EventError::user_not_found(id),
            other => EventError::Internal(other.to_string()),
        }
    }
}

impl From<CategoryError> for EventError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => EventError::category_not_found(id),
            other => EventError::Internal(other.to_string()),
        }
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound { .. } => AppError::NotFound(err.to_string()),
            EventError::Conflict(msg) => AppError::Conflict(msg),
            EventError::BadRequest(msg) | EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
