use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{ComplexityLevel, NecessityLevel};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "themes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub module_id: i32,
    pub section_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub complexity: ComplexityLevel,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: String,
    pub created: ChronoDateTimeUtc,
    pub created_by: Option<String>,
    pub last_modified: Option<ChronoDateTimeUtc>,
    pub last_modified_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::modules::Entity",
        from = "Column::ModuleId",
        to = "super::modules::Column::Id",
        on_delete = "Cascade"
    )]
    Module,
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id",
        on_delete = "SetNull"
    )]
    Section,
    #[sea_orm(has_many = "super::sources::Entity")]
    Sources,
}

impl Related<super::modules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::sources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Themes listed as related to this one (this theme is their prerequisite)
#[derive(Debug)]
pub struct ThemeToRelated;

impl Linked for ThemeToRelated {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::theme_relations::Relation::Prerequisite.def().rev(),
            super::theme_relations::Relation::Related.def(),
        ]
    }
}
