//! Request extractors: the caller's [`RequestContext`] and JSON bodies that fail with 400

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use tracing::debug;

use super::app::AppState;
use crate::application::RequestContext;
use crate::auth::Actor;
use crate::errors::AppError;

/// Header carrying the caller's user id. Requests without it, or with an id the identity
/// directory does not know, are anonymous.
pub const USER_ID_HEADER: &str = "x-user-id";

#[axum::async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        let actor = match user_id {
            None => Actor::anonymous(),
            Some(user_id) => match state.identity.get_roles(user_id).await {
                Ok(roles) => Actor::user(user_id).with_roles(roles),
                Err(err) => {
                    debug!("Treating unknown user {} as anonymous: {}", user_id, err);
                    Actor::anonymous()
                }
            },
        };

        Ok(RequestContext::new(actor))
    }
}

/// `Json<T>` whose rejections are reported as 400 Bad Request
pub struct Body<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for Body<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        Ok(Body(value))
    }
}
