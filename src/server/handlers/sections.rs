use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{bind_id, created, paged};
use crate::application::models::SectionDto;
use crate::application::sections::{
    CreateSection, DeleteSection, GetSection, GetSectionList, GetSectionListPaging, UpdateSection,
};
use crate::application::{RequestContext, RequestParams};
use crate::errors::AppResult;
use crate::server::app::AppState;
use crate::server::extract::Body;

#[utoipa::path(
    get,
    path = "/api/paths/{path_id}/modules/{module_id}/sections",
    tag = "sections",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        RequestParams
    ),
    responses(
        (status = 200, description = "Sections of the module", body = [SectionDto]),
        (status = 404, description = "Path or module not found")
    )
)]
pub async fn list_sections(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id)): Path<(i32, i32)>,
    Query(params): Query<RequestParams>,
) -> AppResult<Response> {
    if params.use_paging() {
        let page = state
            .mediator
            .send(
                &ctx,
                GetSectionListPaging {
                    path_id,
                    module_id,
                    pagination: params.pagination(),
                },
            )
            .await?;
        return paged(page);
    }

    let sections = state
        .mediator
        .send(&ctx, GetSectionList { path_id, module_id })
        .await?;
    Ok(Json(sections).into_response())
}

#[utoipa::path(
    get,
    path = "/api/paths/{path_id}/modules/{module_id}/sections/{id}",
    tag = "sections",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("id" = i32, Path, description = "Section id")
    ),
    responses(
        (status = 200, description = "Section found", body = SectionDto),
        (status = 404, description = "Path, module or section not found")
    )
)]
pub async fn get_section(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, id)): Path<(i32, i32, i32)>,
) -> AppResult<Json<SectionDto>> {
    Ok(Json(
        state
            .mediator
            .send(
                &ctx,
                GetSection {
                    path_id,
                    module_id,
                    id,
                },
            )
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/paths/{path_id}/modules/{module_id}/sections",
    tag = "sections",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id")
    ),
    request_body = CreateSection,
    responses(
        (status = 201, description = "Section created", body = SectionDto),
        (status = 400, description = "Body ids differ from the route"),
        (status = 404, description = "Path or module not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_section(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id)): Path<(i32, i32)>,
    Body(mut request): Body<CreateSection>,
) -> AppResult<Response> {
    bind_id("pathId", path_id, &mut request.path_id)?;
    bind_id("moduleId", module_id, &mut request.module_id)?;
    let section = state.mediator.send(&ctx, request).await?;
    created(
        format!(
            "/api/paths/{}/modules/{}/sections/{}",
            path_id, module_id, section.id
        ),
        section,
    )
}

#[utoipa::path(
    put,
    path = "/api/paths/{path_id}/modules/{module_id}/sections/{id}",
    tag = "sections",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("id" = i32, Path, description = "Section id")
    ),
    request_body = UpdateSection,
    responses(
        (status = 200, description = "Section updated", body = SectionDto),
        (status = 400, description = "Body ids differ from the route"),
        (status = 404, description = "Path, module or section not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_section(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, id)): Path<(i32, i32, i32)>,
    Body(mut request): Body<UpdateSection>,
) -> AppResult<Json<SectionDto>> {
    bind_id("pathId", path_id, &mut request.path_id)?;
    bind_id("moduleId", module_id, &mut request.module_id)?;
    bind_id("id", id, &mut request.id)?;
    Ok(Json(state.mediator.send(&ctx, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/paths/{path_id}/modules/{module_id}/sections/{id}",
    tag = "sections",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("id" = i32, Path, description = "Section id")
    ),
    responses(
        (status = 204, description = "Section deleted, its themes stay in the module"),
        (status = 404, description = "Path, module or section not found")
    )
)]
pub async fn delete_section(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, id)): Path<(i32, i32, i32)>,
) -> AppResult<StatusCode> {
    state
        .mediator
        .send(
            &ctx,
            DeleteSection {
                path_id,
                module_id,
                id,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
