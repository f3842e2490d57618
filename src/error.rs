use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(String),

    /// Business-rule violation: duplicate course code, duplicate active
    /// enrollment. Reported as 400, matching the validation category.
    #[error("{0}")]
    BusinessRule(String),

    #[error("{0}")]
    NotFound(String),
}

/// True when the error is a storage-level UNIQUE violation. The services use
/// this to fold constraint conflicts into the same business-rule error their
/// advisory pre-checks raise.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) | AppError::BusinessRule(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Database(err) => {
                error!("database error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        ApiResponse::<()>::error(message, status.as_u16()).into_response()
    }
}
