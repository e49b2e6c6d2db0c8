use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{bind_id, created, paged};
use crate::application::models::{ThemeDetails, ThemeDto};
use crate::application::themes::{
    CreateTheme, DeleteTheme, GetTheme, GetThemeDetails, GetThemeList, GetThemeListPaging,
    UpdateTheme,
};
use crate::application::{RequestContext, RequestParams};
use crate::errors::AppResult;
use crate::server::app::AppState;
use crate::server::extract::Body;

#[utoipa::path(
    get,
    path = "/api/paths/{path_id}/modules/{module_id}/themes",
    tag = "themes",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        RequestParams
    ),
    responses(
        (status = 200, description = "Themes of the module", body = [ThemeDto]),
        (status = 404, description = "Path or module not found")
    )
)]
pub async fn list_themes(
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
                GetThemeListPaging {
                    path_id,
                    module_id,
                    pagination: params.pagination(),
                },
            )
            .await?;
        return paged(page);
    }

    let themes = state
        .mediator
        .send(&ctx, GetThemeList { path_id, module_id })
        .await?;
    Ok(Json(themes).into_response())
}

#[utoipa::path(
    get,
    path = "/api/paths/{path_id}/modules/{module_id}/themes/{id}",
    tag = "themes",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("id" = i32, Path, description = "Theme id")
    ),
    responses(
        (status = 200, description = "Theme found", body = ThemeDto),
        (status = 404, description = "Path, module or theme not found")
    )
)]
pub async fn get_theme(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, id)): Path<(i32, i32, i32)>,
) -> AppResult<Json<ThemeDto>> {
    Ok(Json(
        state
            .mediator
            .send(
                &ctx,
                GetTheme {
                    path_id,
                    module_id,
                    id,
                },
            )
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/paths/{path_id}/modules/{module_id}/themes/{id}/details",
    tag = "themes",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("id" = i32, Path, description = "Theme id")
    ),
    responses(
        (status = 200, description = "Theme with section, sources and related themes", body = ThemeDetails),
        (status = 404, description = "Path, module or theme not found")
    )
)]
pub async fn get_theme_details(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, id)): Path<(i32, i32, i32)>,
) -> AppResult<Json<ThemeDetails>> {
    Ok(Json(
        state
            .mediator
            .send(
                &ctx,
                GetThemeDetails {
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
    path = "/api/paths/{path_id}/modules/{module_id}/themes",
    tag = "themes",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id")
    ),
    request_body = CreateTheme,
    responses(
        (status = 201, description = "Theme created", body = ThemeDto),
        (status = 400, description = "Body ids differ from the route"),
        (status = 404, description = "Path, module, section or related theme not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_theme(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id)): Path<(i32, i32)>,
    Body(mut request): Body<CreateTheme>,
) -> AppResult<Response> {
    bind_id("pathId", path_id, &mut request.path_id)?;
    bind_id("moduleId", module_id, &mut request.module_id)?;
    let theme = state.mediator.send(&ctx, request).await?;
    created(
        format!(
            "/api/paths/{}/modules/{}/themes/{}",
            path_id, module_id, theme.id
        ),
        theme,
    )
}

#[utoipa::path(
    put,
    path = "/api/paths/{path_id}/modules/{module_id}/themes/{id}",
    tag = "themes",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("id" = i32, Path, description = "Theme id")
    ),
    request_body = UpdateTheme,
    responses(
        (status = 200, description = "Theme updated", body = ThemeDto),
        (status = 400, description = "Body ids differ from the route"),
        (status = 404, description = "Path, module, theme or section not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_theme(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, id)): Path<(i32, i32, i32)>,
    Body(mut request): Body<UpdateTheme>,
) -> AppResult<Json<ThemeDto>> {
    bind_id("pathId", path_id, &mut request.path_id)?;
    bind_id("moduleId", module_id, &mut request.module_id)?;
    bind_id("id", id, &mut request.id)?;
    Ok(Json(state.mediator.send(&ctx, request).await?))
}

#[utoipa::path(
    delete,
    path = "/api/paths/{path_id}/modules/{module_id}/themes/{id}",
    tag = "themes",
    params(
        ("path_id" = i32, Path, description = "Path id"),
        ("module_id" = i32, Path, description = "Module id"),
        ("id" = i32, Path, description = "Theme id")
    ),
    responses(
        (status = 204, description = "Theme and its sources deleted"),
        (status = 404, description = "Path, module or theme not found")
    )
)]
pub async fn delete_theme(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((path_id, module_id, id)): Path<(i32, i32, i32)>,
) -> AppResult<StatusCode> {
    state
        .mediator
        .send(
            &ctx,
            DeleteTheme {
                path_id,
                module_id,
                id,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
