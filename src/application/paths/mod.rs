//! Paths: top-level learning tracks
//!
//! Paths are soft-deleted. A deleted path disappears from every read and from the routes
//! below it, stays listed under the deleted-paths query and comes back through
//! [`RestorePath`].

mod commands;
mod queries;

pub use commands::*;
pub use queries::*;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

use super::context::RequestContext;
use super::validation::Rules;
use crate::database::entities::paths;
use crate::errors::{AppError, AppResult};

pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 3000;
pub const KEY_MAX: usize = 100;
pub const TAG_MAX: usize = 50;

/// Lower-case, dash-separated key derived from a title
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug.truncate(KEY_MAX);
    if slug.is_empty() {
        slug.push_str("path");
    }
    slug
}

fn path_rules(
    title: &str,
    description: &str,
    key: Option<&str>,
    tags: &[String],
) -> Rules {
    let rules = Rules::new()
        .required("title", title)
        .max_length("title", title, TITLE_MAX)
        .required("description", description)
        .max_length("description", description, DESCRIPTION_MAX)
        .key("key", key)
        .tags("tags", tags, TAG_MAX);
    match key {
        Some(key) => rules.max_length("key", key, KEY_MAX),
        None => rules,
    }
}

/// Keys are unique across live and deleted paths
async fn ensure_key_available<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    key: &str,
    except: Option<i32>,
) -> AppResult<()> {
    let mut query = paths::Entity::find().filter(paths::Column::Key.eq(key));
    if let Some(id) = except {
        query = query.filter(paths::Column::Id.ne(id));
    }
    if ctx.run(query.count(conn)).await? > 0 {
        return Err(AppError::invalid_field(
            "key",
            format!("Key '{}' is already used by another path.", key),
        ));
    }
    Ok(())
}

async fn unique_key_from_title<C: ConnectionTrait>(
    conn: &C,
    ctx: &RequestContext,
    title: &str,
) -> AppResult<String> {
    let base = slugify(title);
    let mut candidate = base.clone();
    for suffix in 2..1000 {
        let taken = ctx
            .run(
                paths::Entity::find()
                    .filter(paths::Column::Key.eq(candidate.as_str()))
                    .count(conn),
            )
            .await?;
        if taken == 0 {
            return Ok(candidate);
        }
        candidate = format!("{}-{}", base, suffix);
    }
    Err(AppError::internal(format!(
        "could not derive a free key from '{}'",
        title
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Some Path"), "some-path");
        assert_eq!(slugify("  C# / .NET developer!  "), "c-net-developer");
        assert_eq!(slugify("???"), "path");
        assert_eq!(slugify(&"a".repeat(150)).len(), KEY_MAX);
    }
}
