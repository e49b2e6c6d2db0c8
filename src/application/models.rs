//! DTOs returned by queries and commands, with their mapping from entities

use chrono::{DateTime, Utc};
use sea_orm::{FromQueryResult, QuerySelect, Select};
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

use super::mapping::{decode_tags, Projection};
use crate::database::entities::{
    modules, path_modules, paths, sections, sources, tags, themes, AvailabilityLevel,
    ComplexityLevel, NecessityLevel, RelevanceLevel, SourceType,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PathDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_visible: bool,
    pub key: String,
    pub tags: Vec<String>,
}

impl From<paths::Model> for PathDto {
    fn from(model: paths::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            is_visible: model.is_visible,
            key: model.key,
            tags: decode_tags(&model.tags),
        }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct PathRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_visible: bool,
    pub key: String,
    pub tags: String,
}

impl Projection for PathRow {
    type Entity = paths::Entity;

    fn columns() -> Vec<paths::Column> {
        vec![
            paths::Column::Id,
            paths::Column::Title,
            paths::Column::Description,
            paths::Column::IsVisible,
            paths::Column::Key,
            paths::Column::Tags,
        ]
    }
}

impl From<PathRow> for PathDto {
    fn from(row: PathRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            is_visible: row.is_visible,
            key: row.key,
            tags: decode_tags(&row.tags),
        }
    }
}

/// Path with its modules in path order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PathDetails {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_visible: bool,
    pub key: String,
    pub tags: Vec<String>,
    pub modules: Vec<PathModuleDto>,
    pub created: DateTime<Utc>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl PathDetails {
    pub fn new(model: paths::Model, modules: Vec<PathModuleDto>) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            is_visible: model.is_visible,
            key: model.key,
            tags: decode_tags(&model.tags),
            modules,
            created: model.created,
            last_modified: model.last_modified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PathModuleDto {
    pub id: i32,
    pub title: String,
    pub necessity: NecessityLevel,
    pub order: i32,
}

/// Soft-deleted path as listed under `/api/paths/deleted`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DeletedPathDto {
    pub id: i32,
    pub title: String,
    pub key: String,
    pub deleted: Option<DateTime<Utc>>,
}

impl From<paths::Model> for DeletedPathDto {
    fn from(model: paths::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            key: model.key,
            deleted: model.deleted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PathTitleDto {
    pub id: i32,
    pub title: String,
    pub key: String,
}

impl From<paths::Model> for PathTitleDto {
    fn from(model: paths::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            key: model.key,
        }
    }
}

/// Module as seen from one path; `order` is its position in that path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ModuleDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: Vec<String>,
}

impl ModuleDto {
    pub fn from_model(model: modules::Model, order: i32) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            necessity: model.necessity,
            order,
            tags: decode_tags(&model.tags),
        }
    }
}

/// Expects the query to be joined with `path_modules`
#[derive(Debug, Clone, FromQueryResult)]
pub struct ModuleRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub necessity: NecessityLevel,
    pub tags: String,
    pub order: i32,
}

impl Projection for ModuleRow {
    type Entity = modules::Entity;

    fn columns() -> Vec<modules::Column> {
        vec![
            modules::Column::Id,
            modules::Column::Title,
            modules::Column::Description,
            modules::Column::Necessity,
            modules::Column::Tags,
        ]
    }

    fn select(query: Select<modules::Entity>) -> Select<modules::Entity> {
        query
            .select_only()
            .columns(Self::columns())
            .column_as(path_modules::Column::Order, "order")
    }
}

impl From<ModuleRow> for ModuleDto {
    fn from(row: ModuleRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            necessity: row.necessity,
            order: row.order,
            tags: decode_tags(&row.tags),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ModuleTitleDto {
    pub id: i32,
    pub title: String,
    pub necessity: NecessityLevel,
}

impl From<modules::Model> for ModuleTitleDto {
    fn from(model: modules::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            necessity: model.necessity,
        }
    }
}

/// Module with everything hanging off it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ModuleDetails {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: Vec<String>,
    pub paths: Vec<PathTitleDto>,
    pub prerequisites: Vec<ModuleTitleDto>,
    pub sections: Vec<SectionDto>,
    pub themes: Vec<ThemeTitleDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SectionDto {
    pub id: i32,
    pub module_id: i32,
    pub title: String,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: Vec<String>,
}

impl From<sections::Model> for SectionDto {
    fn from(model: sections::Model) -> Self {
        Self {
            id: model.id,
            module_id: model.module_id,
            title: model.title,
            necessity: model.necessity,
            order: model.order,
            tags: decode_tags(&model.tags),
        }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct SectionRow {
    pub id: i32,
    pub module_id: i32,
    pub title: String,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: String,
}

impl Projection for SectionRow {
    type Entity = sections::Entity;

    fn columns() -> Vec<sections::Column> {
        vec![
            sections::Column::Id,
            sections::Column::ModuleId,
            sections::Column::Title,
            sections::Column::Necessity,
            sections::Column::Order,
            sections::Column::Tags,
        ]
    }
}

impl From<SectionRow> for SectionDto {
    fn from(row: SectionRow) -> Self {
        Self {
            id: row.id,
            module_id: row.module_id,
            title: row.title,
            necessity: row.necessity,
            order: row.order,
            tags: decode_tags(&row.tags),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ThemeDto {
    pub id: i32,
    pub module_id: i32,
    pub section_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub complexity: ComplexityLevel,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: Vec<String>,
}

impl From<themes::Model> for ThemeDto {
    fn from(model: themes::Model) -> Self {
        Self {
            id: model.id,
            module_id: model.module_id,
            section_id: model.section_id,
            title: model.title,
            description: model.description,
            complexity: model.complexity,
            necessity: model.necessity,
            order: model.order,
            tags: decode_tags(&model.tags),
        }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct ThemeRow {
    pub id: i32,
    pub module_id: i32,
    pub section_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub complexity: ComplexityLevel,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: String,
}

impl Projection for ThemeRow {
    type Entity = themes::Entity;

    fn columns() -> Vec<themes::Column> {
        vec![
            themes::Column::Id,
            themes::Column::ModuleId,
            themes::Column::SectionId,
            themes::Column::Title,
            themes::Column::Description,
            themes::Column::Complexity,
            themes::Column::Necessity,
            themes::Column::Order,
            themes::Column::Tags,
        ]
    }
}

impl From<ThemeRow> for ThemeDto {
    fn from(row: ThemeRow) -> Self {
        Self {
            id: row.id,
            module_id: row.module_id,
            section_id: row.section_id,
            title: row.title,
            description: row.description,
            complexity: row.complexity,
            necessity: row.necessity,
            order: row.order,
            tags: decode_tags(&row.tags),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ThemeTitleDto {
    pub id: i32,
    pub title: String,
    pub section_id: Option<i32>,
    pub order: i32,
}

impl From<themes::Model> for ThemeTitleDto {
    fn from(model: themes::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            section_id: model.section_id,
            order: model.order,
        }
    }
}

/// Theme with its sources and related themes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ThemeDetails {
    pub id: i32,
    pub module_id: i32,
    pub section: Option<SectionDto>,
    pub title: String,
    pub description: String,
    pub complexity: ComplexityLevel,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: Vec<String>,
    pub sources: Vec<SourceDto>,
    pub related_themes: Vec<ThemeTitleDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SourceDto {
    pub id: i32,
    pub theme_id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub order: i32,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub availability: AvailabilityLevel,
    pub relevance: RelevanceLevel,
    pub tags: Vec<String>,
}

impl From<sources::Model> for SourceDto {
    fn from(model: sources::Model) -> Self {
        Self {
            id: model.id,
            theme_id: model.theme_id,
            title: model.title,
            description: model.description,
            url: model.url,
            order: model.order,
            source_type: model.source_type,
            availability: model.availability,
            relevance: model.relevance,
            tags: decode_tags(&model.tags),
        }
    }
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct SourceRow {
    pub id: i32,
    pub theme_id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub order: i32,
    pub source_type: SourceType,
    pub availability: AvailabilityLevel,
    pub relevance: RelevanceLevel,
    pub tags: String,
}

impl Projection for SourceRow {
    type Entity = sources::Entity;

    fn columns() -> Vec<sources::Column> {
        vec![
            sources::Column::Id,
            sources::Column::ThemeId,
            sources::Column::Title,
            sources::Column::Description,
            sources::Column::Url,
            sources::Column::Order,
            sources::Column::Availability,
            sources::Column::Relevance,
            sources::Column::Tags,
        ]
    }

    // the `type` column is aliased to the row's field name
    fn select(query: Select<sources::Entity>) -> Select<sources::Entity> {
        query
            .select_only()
            .columns(Self::columns())
            .column_as(sources::Column::SourceType, "source_type")
    }
}

impl From<SourceRow> for SourceDto {
    fn from(row: SourceRow) -> Self {
        Self {
            id: row.id,
            theme_id: row.theme_id,
            title: row.title,
            description: row.description,
            url: row.url,
            order: row.order,
            source_type: row.source_type,
            availability: row.availability,
            relevance: row.relevance,
            tags: decode_tags(&row.tags),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct TagDto {
    pub id: i32,
    pub name: String,
}

impl From<tags::Model> for TagDto {
    fn from(model: tags::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl Projection for TagDto {
    type Entity = tags::Entity;

    fn columns() -> Vec<tags::Column> {
        vec![tags::Column::Id, tags::Column::Name]
    }
}
