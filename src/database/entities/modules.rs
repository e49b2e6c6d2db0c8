use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::NecessityLevel;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub necessity: NecessityLevel,
    pub tags: String,
    pub created: ChronoDateTimeUtc,
    pub created_by: Option<String>,
    pub last_modified: Option<ChronoDateTimeUtc>,
    pub last_modified_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::path_modules::Entity")]
    PathModules,
    #[sea_orm(has_many = "super::sections::Entity")]
    Sections,
    #[sea_orm(has_many = "super::themes::Entity")]
    Themes,
}

impl Related<super::path_modules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PathModules.def()
    }
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sections.def()
    }
}

impl Related<super::themes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Themes.def()
    }
}

impl Related<super::paths::Entity> for Entity {
    fn to() -> RelationDef {
        super::path_modules::Relation::Path.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::path_modules::Relation::Module.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Modules a module requires, walked through `module_prerequisites`
#[derive(Debug)]
pub struct ModuleToPrerequisites;

impl Linked for ModuleToPrerequisites {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::module_prerequisites::Relation::Module.def().rev(),
            super::module_prerequisites::Relation::Prerequisite.def(),
        ]
    }
}
