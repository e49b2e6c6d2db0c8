//! Sources: links to the material that covers a theme

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[cfg(feature = "server")]
use utoipa::ToSchema;

use super::context::RequestContext;
use super::lookup::{find_source_in_theme, resolve_theme};
use super::mapping::{encode_tags, project_all};
use super::mediator::{Request, RequestHandler};
use super::models::{SourceDto, SourceRow};
use super::paging::{Paged, PaginationData};
use super::validation::Rules;
use crate::auth::Permission;
use crate::database::entities::{sources, AvailabilityLevel, RelevanceLevel, SourceType};
use crate::errors::AppResult;

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 10000;
pub const URL_MAX: usize = 500;
pub const TAG_MAX: usize = 50;

/// Fields shared by create and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct SourceFields {
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

impl SourceFields {
    fn rules(&self) -> Rules {
        Rules::new()
            .required("title", &self.title)
            .max_length("title", &self.title, TITLE_MAX)
            .max_length("description", &self.description, DESCRIPTION_MAX)
            .required("url", &self.url)
            .max_length("url", &self.url, URL_MAX)
            .url("url", &self.url)
            .non_negative("order", self.order)
            .tags("tags", &self.tags, TAG_MAX)
    }

    fn write_to(self, source: &mut sources::ActiveModel) {
        source.title = Set(self.title);
        source.description = Set(self.description);
        source.url = Set(self.url);
        source.order = Set(self.order);
        source.source_type = Set(self.source_type);
        source.availability = Set(self.availability);
        source.relevance = Set(self.relevance);
        source.tags = Set(encode_tags(&self.tags));
    }
}

fn sources_in_theme(theme_id: i32) -> Select<sources::Entity> {
    sources::Entity::find()
        .filter(sources::Column::ThemeId.eq(theme_id))
        .order_by_asc(sources::Column::Order)
        .order_by_asc(sources::Column::Id)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSource {
    pub path_id: i32,
    pub module_id: i32,
    pub theme_id: i32,
    #[serde(flatten)]
    pub fields: SourceFields,
}

impl Request for CreateSource {
    const NAME: &'static str = "CreateSource";
    const PERMISSION: Permission = Permission::Write;
    type Response = SourceDto;
    type Handler = CreateSourceHandler;

    fn validate(&self) -> AppResult<()> {
        self.fields.rules().finish()
    }
}

#[derive(Default)]
pub struct CreateSourceHandler;

#[async_trait]
impl RequestHandler<CreateSource> for CreateSourceHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: CreateSource,
    ) -> AppResult<SourceDto> {
        let txn = ctx.run(db.begin()).await?;
        resolve_theme(&txn, ctx, request.path_id, request.module_id, request.theme_id).await?;

        let mut source = sources::ActiveModel {
            theme_id: Set(request.theme_id),
            ..Default::default()
        };
        request.fields.write_to(&mut source);
        ctx.stamp_created(&mut source);

        let source = ctx.run(source.insert(&txn)).await?;
        ctx.run(txn.commit()).await?;

        info!("Created source {} in theme {}", source.id, source.theme_id);
        Ok(source.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSource {
    pub id: i32,
    pub path_id: i32,
    pub module_id: i32,
    pub theme_id: i32,
    #[serde(flatten)]
    pub fields: SourceFields,
}

impl Request for UpdateSource {
    const NAME: &'static str = "UpdateSource";
    const PERMISSION: Permission = Permission::Write;
    type Response = SourceDto;
    type Handler = UpdateSourceHandler;

    fn validate(&self) -> AppResult<()> {
        self.fields.rules().finish()
    }
}

#[derive(Default)]
pub struct UpdateSourceHandler;

#[async_trait]
impl RequestHandler<UpdateSource> for UpdateSourceHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: UpdateSource,
    ) -> AppResult<SourceDto> {
        let txn = ctx.run(db.begin()).await?;
        resolve_theme(&txn, ctx, request.path_id, request.module_id, request.theme_id).await?;
        let existing = find_source_in_theme(&txn, ctx, request.theme_id, request.id).await?;

        let mut source = existing.into_active_model();
        request.fields.write_to(&mut source);
        ctx.stamp_modified(&mut source);

        let source = ctx.run(source.update(&txn)).await?;
        ctx.run(txn.commit()).await?;

        Ok(source.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSource {
    pub path_id: i32,
    pub module_id: i32,
    pub theme_id: i32,
    pub id: i32,
}

impl Request for DeleteSource {
    const NAME: &'static str = "DeleteSource";
    const PERMISSION: Permission = Permission::Write;
    type Response = ();
    type Handler = DeleteSourceHandler;
}

#[derive(Default)]
pub struct DeleteSourceHandler;

#[async_trait]
impl RequestHandler<DeleteSource> for DeleteSourceHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: DeleteSource,
    ) -> AppResult<()> {
        let txn = ctx.run(db.begin()).await?;
        resolve_theme(&txn, ctx, request.path_id, request.module_id, request.theme_id).await?;
        find_source_in_theme(&txn, ctx, request.theme_id, request.id).await?;

        ctx.run(sources::Entity::delete_by_id(request.id).exec(&txn))
            .await?;
        ctx.run(txn.commit()).await?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSource {
    pub path_id: i32,
    pub module_id: i32,
    pub theme_id: i32,
    pub id: i32,
}

impl Request for GetSource {
    const NAME: &'static str = "GetSource";
    type Response = SourceDto;
    type Handler = GetSourceHandler;
}

#[derive(Default)]
pub struct GetSourceHandler;

#[async_trait]
impl RequestHandler<GetSource> for GetSourceHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetSource,
    ) -> AppResult<SourceDto> {
        resolve_theme(db, ctx, request.path_id, request.module_id, request.theme_id).await?;
        Ok(find_source_in_theme(db, ctx, request.theme_id, request.id)
            .await?
            .into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSourceList {
    pub path_id: i32,
    pub module_id: i32,
    pub theme_id: i32,
}

impl Request for GetSourceList {
    const NAME: &'static str = "GetSourceList";
    type Response = Vec<SourceDto>;
    type Handler = GetSourceListHandler;
}

#[derive(Default)]
pub struct GetSourceListHandler;

#[async_trait]
impl RequestHandler<GetSourceList> for GetSourceListHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetSourceList,
    ) -> AppResult<Vec<SourceDto>> {
        resolve_theme(db, ctx, request.path_id, request.module_id, request.theme_id).await?;
        ctx.run(project_all::<SourceRow, SourceDto, _>(
            sources_in_theme(request.theme_id),
            db,
        ))
        .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSourceListPaging {
    pub path_id: i32,
    pub module_id: i32,
    pub theme_id: i32,
    pub pagination: PaginationData,
}

impl Request for GetSourceListPaging {
    const NAME: &'static str = "GetSourceListPaging";
    type Response = Paged<SourceDto>;
    type Handler = GetSourceListPagingHandler;
}

#[derive(Default)]
pub struct GetSourceListPagingHandler;

#[async_trait]
impl RequestHandler<GetSourceListPaging> for GetSourceListPagingHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetSourceListPaging,
    ) -> AppResult<Paged<SourceDto>> {
        resolve_theme(db, ctx, request.path_id, request.module_id, request.theme_id).await?;
        let query = request.pagination.apply(sources_in_theme(request.theme_id));
        let items = ctx
            .run(project_all::<SourceRow, SourceDto, _>(query, db))
            .await?;

        Ok(Paged {
            items,
            pagination: request.pagination,
        })
    }
}
