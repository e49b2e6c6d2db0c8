use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `module_id` requires `prerequisite_id`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "module_prerequisites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub module_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub prerequisite_id: i32,
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
        belongs_to = "super::modules::Entity",
        from = "Column::PrerequisiteId",
        to = "super::modules::Column::Id",
        on_delete = "Cascade"
    )]
    Prerequisite,
}

impl ActiveModelBehavior for ActiveModel {}
