//! Fixed classifications stored as integer columns

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

/// How important a module, section or theme is for the path
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum NecessityLevel {
    #[default]
    #[sea_orm(num_value = 0)]
    Other,
    #[sea_orm(num_value = 1)]
    Possibilities,
    #[sea_orm(num_value = 2)]
    Interesting,
    #[sea_orm(num_value = 3)]
    GoodToKnow,
    #[sea_orm(num_value = 4)]
    MustKnow,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ComplexityLevel {
    #[default]
    #[sea_orm(num_value = 0)]
    Beginner,
    #[sea_orm(num_value = 1)]
    Intermediate,
    #[sea_orm(num_value = 2)]
    Advanced,
}

/// Kind of learning resource behind a source URL
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum SourceType {
    #[default]
    #[sea_orm(num_value = 0)]
    None,
    #[sea_orm(num_value = 1)]
    Book,
    #[sea_orm(num_value = 2)]
    Blog,
    #[sea_orm(num_value = 3)]
    Course,
    #[sea_orm(num_value = 4)]
    Documentation,
    #[sea_orm(num_value = 5)]
    QandA,
    #[sea_orm(num_value = 6)]
    Video,
}

/// Access cost of a source
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum AvailabilityLevel {
    #[default]
    #[sea_orm(num_value = 0)]
    Free,
    #[sea_orm(num_value = 1)]
    RequiresRegistration,
    #[sea_orm(num_value = 2)]
    Paid,
}

/// Whether the information in a source is still current
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum RelevanceLevel {
    #[default]
    #[sea_orm(num_value = 0)]
    NotApplicable,
    #[sea_orm(num_value = 1)]
    UpToDate,
    #[sea_orm(num_value = 2)]
    SomewhatUpToDate,
    #[sea_orm(num_value = 3)]
    Outdated,
}
