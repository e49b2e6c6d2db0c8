//! Error types shared by the application and HTTP layers
//!
//! Every handler returns [`AppResult`]; the HTTP boundary is the only place that turns an
//! [`AppError`] into a status code (see `server::error`).
//!
//! # Examples
//!
//! ```rust
//! use developer_path::errors::{AppError, ValidationErrors};
//!
//! let err = AppError::not_found("Path", 42);
//! assert!(err.is_not_found());
//! assert_eq!(err.http_status_code(), 404);
//!
//! let mut errors = ValidationErrors::new();
//! errors.add("title", "The Title field is required.");
//! let err = AppError::from(errors);
//! assert_eq!(err.error_code(), "VALIDATION_FAILED");
//! ```

pub mod app_error;
pub mod validation;

pub use app_error::AppError;
pub use validation::ValidationErrors;

/// Result type alias used by handlers, the dispatcher and controllers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_result_alias() {
        let result: AppResult<i32> = Err(AppError::not_found("Module", 7));
        assert!(result.is_err());
    }
}
