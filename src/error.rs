/// Error types
///
/// All business-rule violations surface here and are converted to
/// appropriate HTTP responses for API clients. None of them are retried
/// internally.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("You cannot follow yourself")]
    SelfFollow,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::SelfFollow => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Do not leak SQL details to clients
        let error_msg = match self {
            AppError::Database(e) => {
                tracing::error!("database error: {}", e);
                "Database error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": error_msg,
            "status": status.as_u16(),
        }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("post".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Forbidden("not yours".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::SelfFollow.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Validation("too short".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("email taken".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_database_error_is_not_leaked() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
