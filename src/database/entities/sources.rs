use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{AvailabilityLevel, RelevanceLevel, SourceType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub theme_id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub order: i32,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub availability: AvailabilityLevel,
    pub relevance: RelevanceLevel,
    pub tags: String,
    pub created: ChronoDateTimeUtc,
    pub created_by: Option<String>,
    pub last_modified: Option<ChronoDateTimeUtc>,
    pub last_modified_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::themes::Entity",
        from = "Column::ThemeId",
        to = "super::themes::Column::Id",
        on_delete = "Cascade"
    )]
    Theme,
}

impl Related<super::themes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Theme.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
