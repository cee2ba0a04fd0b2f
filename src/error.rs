//! Domain error types for the members server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Bearer token failed signature or claim validation
    #[error("Invalid bearer token: {0}")]
    TokenInvalid(String),

    /// Bearer token is past its expiry claim
    #[error("Bearer token has expired")]
    TokenExpired,

    /// Authenticated but not permitted
    #[error("User does not have the required permissions")]
    Forbidden,

    /// Resource not found; the argument names the resource kind
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Presented API key secret matches no active key
    #[error("Invalid API key")]
    InvalidApiKey,

    /// API key exists but its expiry is in the past
    #[error("API key has expired")]
    ApiKeyExpired,

    /// API key exists but has been deactivated
    #[error("API key is inactive")]
    ApiKeyInactive,

    /// Referenced API key row does not exist
    #[error("API key not found")]
    ApiKeyNotFound,

    /// Storage-level uniqueness violation mapped to a domain field
    #[error("The value for {field} you provided already exists, and must be unique")]
    UniqueViolation { field: &'static str },

    /// Anything not otherwise classified
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        use actix_web::http::StatusCode;

        let (status, error_code, response_message) = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Unexpected(reason) => {
                tracing::error!("Unexpected error: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected server error occurred".to_string(),
                )
            }
            AppError::TokenInvalid(_) => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_INVALID",
                self.to_string(),
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                self.to_string(),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            AppError::InvalidInput(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
                self.to_string(),
            ),
            // API key failures are all unauthorized, matching the external
            // integration contract: callers never learn whether a key row
            // exists versus being unusable.
            AppError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                "INVALID_API_KEY",
                self.to_string(),
            ),
            AppError::ApiKeyExpired => (
                StatusCode::UNAUTHORIZED,
                "API_KEY_EXPIRED",
                self.to_string(),
            ),
            AppError::ApiKeyInactive => (
                StatusCode::UNAUTHORIZED,
                "API_KEY_INACTIVE",
                self.to_string(),
            ),
            AppError::ApiKeyNotFound => (
                StatusCode::UNAUTHORIZED,
                "API_KEY_NOT_FOUND",
                self.to_string(),
            ),
            AppError::UniqueViolation { .. } => {
                (StatusCode::CONFLICT, "CONFLICT", self.to_string())
            }
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: error_code.to_string(),
            message: response_message,
        })
    }
}

/// Error response body matching the OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::TokenExpired.error_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden.error_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("User").error_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ApiKeyNotFound.error_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::UniqueViolation { field: "name" }
                .error_response()
                .status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_internal_errors_do_not_leak_details() {
        let err = AppError::Database("connection refused to 10.0.0.3:5432".to_string());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Body is rendered from ErrorResponse; the generic message is fixed.
        let msg = AppError::Unexpected("user row missing after insert".into());
        assert_eq!(
            msg.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
