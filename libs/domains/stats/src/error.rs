use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// Stats server could not be reached or answered with an error
    #[error("Stats server error: {0}")]
    Remote(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type StatsResult<T> = Result<T, StatsError>;

impl From<sea_orm::DbErr> for StatsError {
    fn from(err: sea_orm::DbErr) -> Self {
        StatsError::Internal(format!("Database error: {}", err))
    }
}

impl From<reqwest::Error> for StatsError {
    fn from(err: reqwest::Error) -> Self {
        StatsError::Remote(err.to_string())
    }
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::BadRequest(msg) | StatsError::Validation(msg) => AppError::BadRequest(msg),
            StatsError::Remote(msg) => AppError::ServiceUnavailable(msg),
            StatsError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
