use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Self join between themes: `prerequisite_id` leads to `related_id`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "theme_relations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub prerequisite_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub related_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::themes::Entity",
        from = "Column::PrerequisiteId",
        to = "super::themes::Column::Id",
        on_delete = "Cascade"
    )]
    Prerequisite,
    #[sea_orm(
        belongs_to = "super::themes::Entity",
        from = "Column::RelatedId",
        to = "super::themes::Column::Id",
        on_delete = "Cascade"
    )]
    Related,
}

impl ActiveModelBehavior for ActiveModel {}
