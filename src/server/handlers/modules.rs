use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{bind_id, created, paged};
use crate::application::models::{ModuleDetails, ModuleDto};
use crate::application::modules::{
    CreateModule, DeleteModule, GetModule, GetModuleDetails, GetModuleList, GetModuleListPaging,
    UpdateModule,
};
use crate::application::{RequestContext, RequestParams};
use crate::errors::AppResult;
use crate::server::app::AppState;
use crate::server::extract::Body;

#[utoipa::path(
    get,
    path = "/api/paths/{path_id}/modules",
    tag = "modules",
    params(("path_id" = i32, Path, description = "Path id"), RequestParams),
    responses(
        (status = 200, description = "Modules in path order", body = [ModuleDto]),
        (status = 404, description = "Path not found")
    )
)]
pub async fn list_modules(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(path_id): Path<i32>,
    Query(params): Query<RequestParams>,
) -> AppResult<Response> {
    if params.use_paging() {
        let page = state
            .mediator
            .send(
                &ctx,
                GetModuleListPaging {
                    path_id,
                    pagination: params.pagination(),
                },
            )
            .await?;
        return paged(page);
    }

    let modules = state.mediator.send(&ctx, GetModuleList { path_id }).await?;
    Ok(Json(modules).into_response())
}

#[utoipa::path(
    get,
    path = "/api/paths/{path_id}/modules/{id}",
    tag = "modules",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("id" = i32, Path, description = "Module id")
    ),
    responses(
        (status = 200, description = "Module found", body = ModuleDto),
        (status = 404, description = "Path or module not found")
    )
)]
pub async fn get_module(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, id)): Path<(i32, i32)>,
) -> AppResult<Json<ModuleDto>> {
    Ok(Json(
        state.mediator.send(&ctx, GetModule { path_id, id }).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/paths/{path_id}/modules/{id}/details",
    tag = "modules",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("id" = i32, Path, description = "Module id")
    ),
    responses(
        (status = 200, description = "Module with paths, prerequisites, sections and themes", body = ModuleDetails),
        (status = 404, description = "Path or module not found")
    )
)]
pub async fn get_module_details(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, id)): Path<(i32, i32)>,
) -> AppResult<Json<ModuleDetails>> {
    Ok(Json(
        state
            .mediator
            .send(&ctx, GetModuleDetails { path_id, id })
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/paths/{path_id}/modules",
    tag = "modules",
    params(("path_id" = i32, Path, description = "Path id")),
    request_body = CreateModule,
    responses(
        (status = 201, description = "Module created in the path", body = ModuleDto),
        (status = 400, description = "Body path id differs from the route"),
        (status = 401, description = "No user"),
        (status = 404, description = "Path or prerequisite not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_module(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(path_id): Path<i32>,
    Body(mut request): Body<CreateModule>,
) -> AppResult<Response> {
    bind_id("pathId", path_id, &mut request.path_id)?;
    let module = state.mediator.send(&ctx, request).await?;
    created(
        format!("/api/paths/{}/modules/{}", path_id, module.id),
        module,
    )
}

#[utoipa::path(
    put,
    path = "/api/paths/{path_id}/modules/{id}",
    tag = "modules",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("id" = i32, Path, description = "Module id")
    ),
    request_body = UpdateModule,
    responses(
        (status = 200, description = "Module updated", body = ModuleDto),
        (status = 400, description = "Body ids differ from the route"),
        (status = 404, description = "Path or module not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_module(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, id)): Path<(i32, i32)>,
    Body(mut request): Body<UpdateModule>,
) -> AppResult<Json<ModuleDto>> {
    bind_id("pathId", path_id, &mut request.path_id)?;
    bind_id("id", id, &mut request.id)?;
    Ok(Json(state.mediator.send(&ctx, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/paths/{path_id}/modules/{id}",
    tag = "modules",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("id" = i32, Path, description = "Module id")
    ),
    responses(
        (status = 204, description = "Module and its sections, themes and sources deleted"),
        (status = 404, description = "Path or module not found")
    )
)]
pub async fn delete_module(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    state
        .mediator
        .send(&ctx, DeleteModule { path_id, id })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
