//! Entity to DTO correspondence
//!
//! Single loaded entities map through `From<Model>` impls next to each DTO. List queries go
//! through [`Projection`]: the row type names the columns it needs, so filtering and paging
//! run in SQL before anything is materialized.

use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, FromQueryResult, QuerySelect, Select, SelectModel,
    Selector,
};

/// A DTO-shaped row selected straight from an entity query
pub trait Projection: FromQueryResult + Sized + Send + Sync {
    type Entity: EntityTrait;

    fn columns() -> Vec<<Self::Entity as EntityTrait>::Column>;

    /// Narrows the select to the row's columns. Rows whose field names differ from column
    /// names override this with aliases.
    fn select(query: Select<Self::Entity>) -> Select<Self::Entity> {
        query.select_only().columns(Self::columns())
    }

    fn project(query: Select<Self::Entity>) -> Selector<SelectModel<Self>> {
        Self::select(query).into_model::<Self>()
    }
}

/// Runs a projected list query and maps every row into its DTO
pub async fn project_all<R, D, C>(
    query: Select<R::Entity>,
    conn: &C,
) -> Result<Vec<D>, DbErr>
where
    R: Projection,
    D: From<R>,
    C: ConnectionTrait,
{
    let rows = R::project(query).all(conn).await?;
    Ok(rows.into_iter().map(D::from).collect())
}

/// Tags are persisted as a JSON array string
pub fn encode_tags(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

/// Reads the stored tag column. Values written by older clients as comma separated text are
/// still accepted.
pub fn decode_tags(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|_| {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::models::TagDto;
    use crate::database::entities::tags;
    use crate::database::test_utils::setup_test_db;
    use sea_orm::{ActiveModelTrait, QueryOrder, Set};

    #[test]
    fn test_tags_codec() {
        let tags = vec!["rust".to_string(), "async".to_string()];
        let encoded = encode_tags(&tags);
        assert_eq!(encoded, r#"["rust","async"]"#);
        assert_eq!(decode_tags(&encoded), tags);
        assert!(decode_tags("[]").is_empty());
        assert!(decode_tags("").is_empty());
    }

    #[test]
    fn test_decode_delimited_tags() {
        assert_eq!(decode_tags("C#, .NET ,"), vec!["C#", ".NET"]);
    }

    #[tokio::test]
    async fn test_project_all_selects_rows_in_query_order() {
        let db = setup_test_db().await;
        for name in ["tokio", "axum"] {
            tags::ActiveModel {
                name: Set(name.to_string()),
                created: Set(chrono::Utc::now()),
                ..Default::default()
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let names: Vec<String> = project_all::<TagDto, TagDto, _>(
            tags::Entity::find().order_by_asc(tags::Column::Name),
            &db,
        )
        .await
        .unwrap()
        .into_iter()
        .map(|tag| tag.name)
        .collect();
        assert_eq!(names, vec!["axum", "tokio"]);
    }
}
