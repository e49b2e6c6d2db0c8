use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::created;
use crate::application::models::TagDto;
use crate::application::tags::{CreateTag, DeleteTag, GetTagList};
use crate::application::RequestContext;
use crate::errors::AppResult;
use crate::server::app::AppState;
use crate::server::extract::Body;

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    responses((status = 200, description = "Tags ordered by name", body = [TagDto]))
)]
pub async fn list_tags(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<Vec<TagDto>>> {
    Ok(Json(state.mediator.send(&ctx, GetTagList).await?))
}

#[utoipa::path(
    post,
    path = "/api/tags",
    tag = "tags",
    request_body = CreateTag,
    responses(
        (status = 201, description = "Tag created", body = TagDto),
        (status = 401, description = "No user"),
        (status = 422, description = "Empty, too long or duplicate name")
    )
)]
pub async fn create_tag(
    State(state): State<AppState>,
    ctx: RequestContext,
    Body(request): Body<CreateTag>,
) -> AppResult<Response> {
    let tag = state.mediator.send(&ctx, request).await?;
    created(format!("/api/tags/{}", tag.id), tag)
}

#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    tag = "tags",
    params(("id" = i32, Path, description = "Tag id")),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.mediator.send(&ctx, DeleteTag { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}
