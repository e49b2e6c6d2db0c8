//! Themes: the topics a module teaches, optionally grouped into a section

mod commands;
mod queries;

pub use commands::*;
pub use queries::*;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Select, Set};

use super::context::RequestContext;
use super::lookup::{ensure_themes_exist, find_section_in_module};
use super::validation::Rules;
use crate::database::entities::{theme_relations, themes};
use crate::errors::{AppError, AppResult};

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 3000;
pub const TAG_MAX: usize = 50;

fn theme_rules(title: &str, description: &str, order: i32, tags: &[String]) -> Rules {
    Rules::new()
        .required("title", title)
        .max_length("title", title, TITLE_MAX)
        .required("description", description)
        .max_length("description", description, DESCRIPTION_MAX)
        .non_negative("order", order)
        .tags("tags", tags, TAG_MAX)
}

fn themes_in_module(module_id: i32) -> Select<themes::Entity> {
    themes::Entity::find()
        .filter(themes::Column::ModuleId.eq(module_id))
        .order_by_asc(themes::Column::Order)
        .order_by_asc(themes::Column::Id)
}

/// A section given for a theme has to belong to the theme's module
async fn check_section<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    module_id: i32,
    section_id: Option<i32>,
) -> AppResult<()> {
    if let Some(section_id) = section_id {
        find_section_in_module(conn, ctx, module_id, section_id).await?;
    }
    Ok(())
}

/// Replaces the themes listed as related to `theme_id`
async fn replace_related<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    theme_id: i32,
    related_ids: &[i32],
) -> AppResult<()> {
    if related_ids.contains(&theme_id) {
        return Err(AppError::invalid_field(
            "relatedThemeIds",
            "A theme cannot be related to itself.",
        ));
    }
    ensure_themes_exist(conn, ctx, related_ids).await?;

    ctx.run(
        theme_relations::Entity::delete_many()
            .filter(theme_relations::Column::PrerequisiteId.eq(theme_id))
            .exec(conn),
    )
    .await?;

    let mut ids = related_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(());
    }

    let rows = ids.into_iter().map(|related_id| theme_relations::ActiveModel {
        prerequisite_id: Set(theme_id),
        related_id: Set(related_id),
    });
    ctx.run(theme_relations::Entity::insert_many(rows).exec_without_returning(conn))
        .await?;
    Ok(())
}
