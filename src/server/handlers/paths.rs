use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{bind_id, created, paged};
use crate::application::models::{DeletedPathDto, PathDetails, PathDto};
use crate::application::paths::{
    CreatePath, DeletePath, GetDeletedPathList, GetPath, GetPathDetails, GetPathList,
    GetPathListPaging, PatchPath, RestorePath, UpdatePath,
};
use crate::application::{RequestContext, RequestParams};
use crate::errors::AppResult;
use crate::server::app::AppState;
use crate::server::extract::Body;

#[utoipa::path(
    get,
    path = "/api/paths",
    tag = "paths",
    params(RequestParams),
    responses(
        (status = 200, description = "Visible paths ordered by title", body = [PathDto]),
        (status = 400, description = "Unparsable paging parameters")
    )
)]
pub async fn list_paths(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<RequestParams>,
) -> AppResult<Response> {
    if params.use_paging() {
        let page = state
            .mediator
            .send(
                &ctx,
                GetPathListPaging {
                    pagination: params.pagination(),
                },
            )
            .await?;
        return paged(page);
    }

    let paths = state.mediator.send(&ctx, GetPathList).await?;
    Ok(Json(paths).into_response())
}

#[utoipa::path(
    get,
    path = "/api/paths/{id}",
    tag = "paths",
    params(("id" = i32, Path, description = "Path id")),
    responses(
        (status = 200, description = "Path found", body = PathDto),
        (status = 404, description = "Path not found")
    )
)]
pub async fn get_path(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
) -> AppResult<Json<PathDto>> {
    Ok(Json(state.mediator.send(&ctx, GetPath { id }).await?))
}

#[utoipa::path(
    get,
    path = "/api/paths/{id}/details",
    tag = "paths",
    params(("id" = i32, Path, description = "Path id")),
    responses(
        (status = 200, description = "Path with its modules", body = PathDetails),
        (status = 404, description = "Path not found")
    )
)]
pub async fn get_path_details(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
) -> AppResult<Json<PathDetails>> {
    Ok(Json(state.mediator.send(&ctx, GetPathDetails { id }).await?))
}

#[utoipa::path(
    post,
    path = "/api/paths",
    tag = "paths",
    request_body = CreatePath,
    responses(
        (status = 201, description = "Path created", body = PathDto),
        (status = 401, description = "No user"),
        (status = 403, description = "User is not an administrator"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_path(
    State(state): State<AppState>,
    ctx: RequestContext,
    Body(request): Body<CreatePath>,
) -> AppResult<Response> {
    let path = state.mediator.send(&ctx, request).await?;
    created(format!("/api/paths/{}", path.id), path)
}

#[utoipa::path(
    put,
    path = "/api/paths/{id}",
    tag = "paths",
    params(("id" = i32, Path, description = "Path id")),
    request_body = UpdatePath,
    responses(
        (status = 200, description = "Path updated", body = PathDto),
        (status = 400, description = "Body id differs from the route"),
        (status = 404, description = "Path not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_path(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
    Body(mut request): Body<UpdatePath>,
) -> AppResult<Json<PathDto>> {
    bind_id("id", id, &mut request.id)?;
    Ok(Json(state.mediator.send(&ctx, request).await?))
}

/// Body is an RFC 6902 JSON Patch document applied to the path's editable fields
#[utoipa::path(
    patch,
    path = "/api/paths/{id}",
    tag = "paths",
    params(("id" = i32, Path, description = "Path id")),
    responses(
        (status = 200, description = "Patch applied", body = PathDto),
        (status = 400, description = "Patch cannot be applied"),
        (status = 404, description = "Path not found"),
        (status = 422, description = "Patched path is invalid")
    )
)]
pub async fn patch_path(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
    Body(patch): Body<json_patch::Patch>,
) -> AppResult<Json<PathDto>> {
    Ok(Json(
        state.mediator.send(&ctx, PatchPath { id, patch }).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/paths/{id}",
    tag = "paths",
    params(("id" = i32, Path, description = "Path id")),
    responses(
        (status = 204, description = "Path moved to the deleted list"),
        (status = 404, description = "Path not found")
    )
)]
pub async fn delete_path(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.mediator.send(&ctx, DeletePath { id }).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/paths/deleted",
    tag = "paths",
    responses(
        (status = 200, description = "Soft-deleted paths, most recent first", body = [DeletedPathDto]),
        (status = 401, description = "No user"),
        (status = 403, description = "User is not an administrator")
    )
)]
pub async fn list_deleted_paths(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Json<Vec<DeletedPathDto>>> {
    Ok(Json(state.mediator.send(&ctx, GetDeletedPathList).await?))
}

/// Restores a deleted path with a patch that replaces `/deleted` with `null`
#[utoipa::path(
    patch,
    path = "/api/paths/deleted/{id}",
    tag = "paths",
    params(("id" = i32, Path, description = "Path id")),
    responses(
        (status = 200, description = "Path restored", body = PathDto),
        (status = 400, description = "Patch does not restore the path"),
        (status = 404, description = "No deleted path with this id")
    )
)]
pub async fn restore_path(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
    Body(patch): Body<json_patch::Patch>,
) -> AppResult<Json<PathDto>> {
    Ok(Json(
        state.mediator.send(&ctx, RestorePath { id, patch }).await?,
    ))
}
