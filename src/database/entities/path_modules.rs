use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ordered membership of a module in a path
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "path_modules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub path_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub module_id: i32,
    pub order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::paths::Entity",
        from = "Column::PathId",
        to = "super::paths::Column::Id",
        on_delete = "Cascade"
    )]
    Path,
    #[sea_orm(
        belongs_to = "super::modules::Entity",
        from = "Column::ModuleId",
        to = "super::modules::Column::Id",
        on_delete = "Cascade"
    )]
    Module,
}

impl Related<super::paths::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Path.def()
    }
}

impl Related<super::modules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
