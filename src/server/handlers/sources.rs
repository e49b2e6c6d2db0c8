use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{bind_id, created, paged};
use crate::application::models::SourceDto;
use crate::application::sources::{
    CreateSource, DeleteSource, GetSource, GetSourceList, GetSourceListPaging, UpdateSource,
};
use crate::application::{RequestContext, RequestParams};
use crate::errors::AppResult;
use crate::server::app::AppState;
use crate::server::extract::Body;

#[utoipa::path(
    get,
    path = "/api/paths/{path_id}/modules/{module_id}/themes/{theme_id}/sources",
    tag = "sources",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("theme_id" = i32, Path, description = "Theme id"),
        RequestParams
    ),
    responses(
        (status = 200, description = "Sources of the theme", body = [SourceDto]),
        (status = 404, description = "Path, module or theme not found")
    )
)]
pub async fn list_sources(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, theme_id)): Path<(i32, i32, i32)>,
    Query(params): Query<RequestParams>,
) -> AppResult<Response> {
    if params.use_paging() {
        let page = state
            .mediator
            .send(
                &ctx,
                GetSourceListPaging {
                    path_id,
                    module_id,
                    theme_id,
                    pagination: params.pagination(),
                },
            )
            .await?;
        return paged(page);
    }

    let sources = state
        .mediator
        .send(
            &ctx,
            GetSourceList {
                path_id,
                module_id,
                theme_id,
            },
        )
        .await?;
    Ok(Json(sources).into_response())
}

#[utoipa::path(
    get,
    path = "/api/paths/{path_id}/modules/{module_id}/themes/{theme_id}/sources/{id}",
    tag = "sources",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("theme_id" = i32, Path, description = "Theme id"),
        ("id" = i32, Path, description = "Source id")
    ),
    responses(
        (status = 200, description = "Source found", body = SourceDto),
        (status = 404, description = "Path, module, theme or source not found")
    )
)]
pub async fn get_source(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, theme_id, id)): Path<(i32, i32, i32, i32)>,
) -> AppResult<Json<SourceDto>> {
    Ok(Json(
        state
            .mediator
            .send(
                &ctx,
                GetSource {
                    path_id,
                    module_id,
                    theme_id,
                    id,
                },
            )
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/paths/{path_id}/modules/{module_id}/themes/{theme_id}/sources",
    tag = "sources",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("theme_id" = i32, Path, description = "Theme id")
    ),
    request_body = CreateSource,
    responses(
        (status = 201, description = "Source created", body = SourceDto),
        (status = 400, description = "Body ids differ from the route"),
        (status = 404, description = "Path, module or theme not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_source(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, theme_id)): Path<(i32, i32, i32)>,
    Body(mut request): Body<CreateSource>,
) -> AppResult<Response> {
    bind_id("pathId", path_id, &mut request.path_id)?;
    bind_id("moduleId", module_id, &mut request.module_id)?;
    bind_id("themeId", theme_id, &mut request.theme_id)?;
    let source = state.mediator.send(&ctx, request).await?;
    created(
        format!(
            "/api/paths/{}/modules/{}/themes/{}/sources/{}",
            path_id, module_id, theme_id, source.id
        ),
        source,
    )
}

#[utoipa::path(
    put,
    path = "/api/paths/{path_id}/modules/{module_id}/themes/{theme_id}/sources/{id}",
    tag = "sources",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("theme_id" = i32, Path, description = "Theme id"),
        ("id" = i32, Path, description = "Source id")
    ),
    request_body = UpdateSource,
    responses(
        (status = 200, description = "Source updated", body = SourceDto),
        (status = 400, description = "Body ids differ from the route"),
        (status = 404, description = "Path, module, theme or source not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_source(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, theme_id, id)): Path<(i32, i32, i32, i32)>,
    Body(mut request): Body<UpdateSource>,
) -> AppResult<Json<SourceDto>> {
    bind_id("pathId", path_id, &mut request.path_id)?;
    bind_id("moduleId", module_id, &mut request.module_id)?;
    bind_id("themeId", theme_id, &mut request.theme_id)?;
    bind_id("id", id, &mut request.id)?;
    Ok(Json(state.mediator.send(&ctx, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/paths/{path_id}/modules/{module_id}/themes/{theme_id}/sources/{id}",
    tag = "sources",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("theme_id" = i32, Path, description = "Theme id"),
        ("id" = i32, Path, description = "Source id")
    ),
    responses(
        (status = 204, description = "Source deleted"),
        (status = 404, description = "Path, module, theme or source not found")
    )
)]
pub async fn delete_source(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, theme_id, id)): Path<(i32, i32, i32, i32)>,
) -> AppResult<StatusCode> {
    state
        .mediator
        .send(
            &ctx,
            DeleteSource {
                path_id,
                module_id,
                theme_id,
                id,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
