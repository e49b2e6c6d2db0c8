//! Modules: skill areas shared between paths
//!
//! A module reaches the API through one of the paths it belongs to; its position in that path
//! lives on the `path_modules` link, not on the module.

mod commands;
mod queries;

pub use commands::*;
pub use queries::*;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};

use super::context::RequestContext;
use super::lookup::ensure_modules_exist;
use super::validation::Rules;
use crate::database::entities::{module_prerequisites, modules, path_modules};
use crate::errors::{AppError, AppResult};

pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 3000;
pub const TAG_MAX: usize = 50;

fn module_rules(title: &str, description: &str, order: i32, tags: &[String]) -> Rules {
    Rules::new()
        .required("title", title)
        .max_length("title", title, TITLE_MAX)
        .required("description", description)
        .max_length("description", description, DESCRIPTION_MAX)
        .non_negative("order", order)
        .tags("tags", tags, TAG_MAX)
}

/// Modules of one path in path order, then by id
fn modules_in_path(path_id: i32) -> Select<modules::Entity> {
    modules::Entity::find()
        .join(JoinType::InnerJoin, modules::Relation::PathModules.def())
        .filter(path_modules::Column::PathId.eq(path_id))
        .order_by_asc(path_modules::Column::Order)
        .order_by_asc(modules::Column::Id)
}

/// Replaces the prerequisite set of a module
async fn replace_prerequisites<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    module_id: i32,
    prerequisite_ids: &[i32],
) -> AppResult<()> {
    if prerequisite_ids.contains(&module_id) {
        return Err(AppError::invalid_field(
            "prerequisiteIds",
            "A module cannot be its own prerequisite.",
        ));
    }
    ensure_modules_exist(conn, ctx, prerequisite_ids).await?;

    ctx.run(
        module_prerequisites::Entity::delete_many()
            .filter(module_prerequisites::Column::ModuleId.eq(module_id))
            .exec(conn),
    )
    .await?;

    let mut ids = prerequisite_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(());
    }

    let rows = ids
        .into_iter()
        .map(|prerequisite_id| module_prerequisites::ActiveModel {
            module_id: sea_orm::Set(module_id),
            prerequisite_id: sea_orm::Set(prerequisite_id),
        });
    ctx.run(
        module_prerequisites::Entity::insert_many(rows).exec_without_returning(conn),
    )
    .await?;
    Ok(())
}
