use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "paths")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_visible: bool,
    #[sea_orm(unique)]
    pub key: String,
    pub tags: String,
    pub deleted: Option<ChronoDateTimeUtc>,
    pub created: ChronoDateTimeUtc,
    pub created_by: Option<String>,
    pub last_modified: Option<ChronoDateTimeUtc>,
    pub last_modified_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::path_modules::Entity")]
    PathModules,
}

impl Related<super::path_modules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PathModules.def()
    }
}

impl Related<super::modules::Entity> for Entity {
    fn to() -> RelationDef {
        super::path_modules::Relation::Module.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::path_modules::Relation::Path.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }
}
