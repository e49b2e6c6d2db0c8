//! Ancestor resolution shared by every handler
//!
//! Each lookup is scoped to its parent, so an id that exists under another parent is
//! reported as missing exactly like an id that does not exist at all.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use super::context::RequestContext;
use crate::database::entities::{modules, path_modules, paths, sections, sources, themes};
use crate::errors::{AppError, AppResult};

/// Live (not soft-deleted) path
pub async fn find_path<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    path_id: i32,
) -> AppResult<paths::Model> {
    ctx.run(
        paths::Entity::find_by_id(path_id)
            .filter(paths::Column::Deleted.is_null())
            .one(conn),
    )
    .await?
    .ok_or_else(|| AppError::not_found("Path", path_id))
}

/// Module together with its position in the path
pub async fn find_module_in_path<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    path_id: i32,
    module_id: i32,
) -> AppResult<(modules::Model, path_modules::Model)> {
    let link = ctx
        .run(path_modules::Entity::find_by_id((path_id, module_id)).one(conn))
        .await?
        .ok_or_else(|| AppError::not_found("Module", module_id))?;

    let module = ctx
        .run(modules::Entity::find_by_id(module_id).one(conn))
        .await?
        .ok_or_else(|| AppError::not_found("Module", module_id))?;

    Ok((module, link))
}

/// Resolves the path, then the module inside it
pub async fn resolve_module<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    path_id: i32,
    module_id: i32,
) -> AppResult<(modules::Model, path_modules::Model)> {
    find_path(conn, ctx, path_id).await?;
    find_module_in_path(conn, ctx, path_id, module_id).await
}

pub async fn find_section_in_module<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    module_id: i32,
    section_id: i32,
) -> AppResult<sections::Model> {
    ctx.run(
        sections::Entity::find_by_id(section_id)
            .filter(sections::Column::ModuleId.eq(module_id))
            .one(conn),
    )
    .await?
    .ok_or_else(|| AppError::not_found("Section", section_id))
}

pub async fn find_theme_in_module<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    module_id: i32,
    theme_id: i32,
) -> AppResult<themes::Model> {
    ctx.run(
        themes::Entity::find_by_id(theme_id)
            .filter(themes::Column::ModuleId.eq(module_id))
            .one(conn),
    )
    .await?
    .ok_or_else(|| AppError::not_found("Theme", theme_id))
}

/// Resolves path, module and theme in route order
pub async fn resolve_theme<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    path_id: i32,
    module_id: i32,
    theme_id: i32,
) -> AppResult<themes::Model> {
    resolve_module(conn, ctx, path_id, module_id).await?;
    find_theme_in_module(conn, ctx, module_id, theme_id).await
}

pub async fn find_source_in_theme<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    theme_id: i32,
    source_id: i32,
) -> AppResult<sources::Model> {
    ctx.run(
        sources::Entity::find_by_id(source_id)
            .filter(sources::Column::ThemeId.eq(theme_id))
            .one(conn),
    )
    .await?
    .ok_or_else(|| AppError::not_found("Source", source_id))
}

/// Fails with NotFound on the first id that does not exist
pub async fn ensure_modules_exist<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    ids: &[i32],
) -> AppResult<()> {
    for id in ids {
        ctx.run(modules::Entity::find_by_id(*id).one(conn))
            .await?
            .ok_or_else(|| AppError::not_found("Module", *id))?;
    }
    Ok(())
}

pub async fn ensure_themes_exist<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    ids: &[i32],
) -> AppResult<()> {
    for id in ids {
        ctx.run(themes::Entity::find_by_id(*id).one(conn))
            .await?
            .ok_or_else(|| AppError::not_found("Theme", *id))?;
    }
    Ok(())
}
