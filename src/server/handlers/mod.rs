pub mod health;
pub mod modules;
pub mod paths;
pub mod sections;
pub mod sources;
pub mod tags;
pub mod themes;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::Paged;
use crate::errors::{AppError, AppResult};

/// Response header with the page metadata of a paged list
pub const PAGINATION_HEADER: &str = "x-pagination";

/// Items as the body, page metadata in `X-Pagination`
pub(crate) fn paged<T: Serialize>(page: Paged<T>) -> AppResult<Response> {
    let metadata = serde_json::to_string(&page.pagination)
        .map_err(|err| AppError::internal(err.to_string()))?;
    let value =
        HeaderValue::from_str(&metadata).map_err(|err| AppError::internal(err.to_string()))?;

    let mut response = Json(page.items).into_response();
    response.headers_mut().insert(PAGINATION_HEADER, value);
    Ok(response)
}

/// 201 with the new resource in the body and its URL in `Location`
pub(crate) fn created<T: Serialize>(location: String, body: T) -> AppResult<Response> {
    let location =
        HeaderValue::from_str(&location).map_err(|err| AppError::internal(err.to_string()))?;
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(body)).into_response())
}

/// A body may omit an id the route already carries, but must not contradict it
pub(crate) fn bind_id(field: &str, route: i32, body: &mut i32) -> AppResult<()> {
    if *body != 0 && *body != route {
        return Err(AppError::bad_request(format!(
            "{} {} in the body does not match {} in the route",
            field, body, route
        )));
    }
    *body = route;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_id() {
        let mut id = 0;
        bind_id("id", 7, &mut id).unwrap();
        assert_eq!(id, 7);

        let mut id = 7;
        assert!(bind_id("id", 7, &mut id).is_ok());

        let mut id = 8;
        let err = bind_id("id", 7, &mut id).unwrap_err();
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(id, 8);
    }
}
