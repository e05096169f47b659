/// Error types for Query Service
///
/// Every failure reaching a handler is rendered as `{"detail": "<message>"}`
/// with the status code of its variant.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

/// Result type for query-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Referenced entity id does not exist
    #[error("{0}")]
    NotFound(String),

    /// Database-layer failure; carries the driver message unmodified
    #[error("{0}")]
    Execution(String),

    /// Object store failure
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Request body could not be parsed
    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body returned to API clients
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Execution(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.to_string(),
        })
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            // Surface the server's own message, not sqlx's "error returned from database:" wrapper
            sqlx::Error::Database(db_err) => AppError::Execution(db_err.message().to_string()),
            other => AppError::Execution(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<s3_utils::S3Error> for AppError {
    fn from(err: s3_utils::S3Error) -> Self {
        AppError::ExternalService(err.to_string())
    }
}
