use sea_orm::DbErr;
use thiserror::Error;

use super::ValidationErrors;

/// Errors raised by handlers and propagated unchanged to the HTTP boundary
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced entity is absent at some level of the route
    #[error("Entity \"{entity}\" ({id}) was not found")]
    NotFound {
        /// Entity type name, e.g. `Path`
        entity: &'static str,
        /// Offending identifier
        id: String,
    },

    /// One or more field validation rules failed
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Malformed or inconsistent request (route/body mismatch, unparsable input)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No identity attached to a request that requires one
    #[error("Authentication required")]
    Unauthorized,

    /// Identity lacks the role required for the operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The caller cancelled the request while it was in flight
    #[error("Operation was cancelled")]
    Cancelled,

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Anything else that should surface as a server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::Forbidden(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal(message.into())
    }

    /// Single-field validation failure
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        AppError::Validation(errors)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }

    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound { .. }
                | AppError::Validation(_)
                | AppError::BadRequest(_)
                | AppError::Unauthorized
                | AppError::Forbidden(_)
        )
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_FAILED",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::Cancelled => "CANCELLED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code for this error.
    ///
    /// Cancellation maps to 499 (client closed request): the caller is gone, so the code is
    /// only visible in access logs.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::NotFound { .. } => 404,
            AppError::Validation(_) => 422,
            AppError::BadRequest(_) => 400,
            AppError::Unauthorized => 401,
            AppError::Forbidden(_) => 403,
            AppError::Cancelled => 499,
            AppError::Database(_) | AppError::Internal(_) => 500,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_id() {
        let err = AppError::not_found("Theme", 99999);
        assert_eq!(err.to_string(), "Entity \"Theme\" (99999) was not found");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("Path", 1).http_status_code(), 404);
        assert_eq!(AppError::invalid_field("title", "required").http_status_code(), 422);
        assert_eq!(AppError::bad_request("id mismatch").http_status_code(), 400);
        assert_eq!(AppError::Unauthorized.http_status_code(), 401);
        assert_eq!(AppError::forbidden("admin only").http_status_code(), 403);
        assert_eq!(AppError::Cancelled.http_status_code(), 499);
        assert_eq!(AppError::internal("boom").http_status_code(), 500);
    }

    #[test]
    fn test_database_error_is_server_error() {
        let err = AppError::from(DbErr::Custom("disk full".to_string()));
        assert!(!err.is_client_error());
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_cancelled_is_not_client_error() {
        assert!(AppError::Cancelled.is_cancelled());
        assert!(!AppError::Cancelled.is_client_error());
    }
}
