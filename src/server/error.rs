use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::errors::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self {
            AppError::Database(err) => error!("Database error: {}", err),
            AppError::Internal(message) => error!("Internal error: {}", message),
            AppError::Cancelled => warn!("Request cancelled by the client"),
            _ => {}
        }

        let body = match self {
            AppError::Validation(errors) => json!({ "errors": errors }),
            other => json!({
                "error": other.error_code(),
                "message": other.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
