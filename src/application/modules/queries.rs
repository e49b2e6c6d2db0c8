use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, ModelTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use super::modules_in_path;
use crate::application::context::RequestContext;
use crate::application::lookup::{find_path, resolve_module};
use crate::application::mapping::{decode_tags, project_all};
use crate::application::mediator::{Request, RequestHandler};
use crate::application::models::{
    ModuleDetails, ModuleDto, ModuleRow, ModuleTitleDto, PathTitleDto, SectionDto, ThemeTitleDto,
};
use crate::application::paging::{Paged, PaginationData};
use crate::database::entities::{modules, paths, sections, themes};
use crate::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetModule {
    pub path_id: i32,
    pub id: i32,
}

impl Request for GetModule {
    const NAME: &'static str = "GetModule";
    type Response = ModuleDto;
    type Handler = GetModuleHandler;
}

#[derive(Default)]
pub struct GetModuleHandler;

#[async_trait]
impl RequestHandler<GetModule> for GetModuleHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetModule,
    ) -> AppResult<ModuleDto> {
        let (module, link) = resolve_module(db, ctx, request.path_id, request.id).await?;
        Ok(ModuleDto::from_model(module, link.order))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetModuleList {
    pub path_id: i32,
}

impl Request for GetModuleList {
    const NAME: &'static str = "GetModuleList";
    type Response = Vec<ModuleDto>;
    type Handler = GetModuleListHandler;
}

#[derive(Default)]
pub struct GetModuleListHandler;

#[async_trait]
impl RequestHandler<GetModuleList> for GetModuleListHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetModuleList,
    ) -> AppResult<Vec<ModuleDto>> {
        find_path(db, ctx, request.path_id).await?;
        ctx.run(project_all::<ModuleRow, ModuleDto, _>(
            modules_in_path(request.path_id),
            db,
        ))
        .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetModuleListPaging {
    pub path_id: i32,
    pub pagination: PaginationData,
}

impl Request for GetModuleListPaging {
    const NAME: &'static str = "GetModuleListPaging";
    type Response = Paged<ModuleDto>;
    type Handler = GetModuleListPagingHandler;
}

#[derive(Default)]
pub struct GetModuleListPagingHandler;

#[async_trait]
impl RequestHandler<GetModuleListPaging> for GetModuleListPagingHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetModuleListPaging,
    ) -> AppResult<Paged<ModuleDto>> {
        find_path(db, ctx, request.path_id).await?;
        let query = request.pagination.apply(modules_in_path(request.path_id));
        let items = ctx
            .run(project_all::<ModuleRow, ModuleDto, _>(query, db))
            .await?;

        Ok(Paged {
            items,
            pagination: request.pagination,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetModuleDetails {
    pub path_id: i32,
    pub id: i32,
}

impl Request for GetModuleDetails {
    const NAME: &'static str = "GetModuleDetails";
    type Response = ModuleDetails;
    type Handler = GetModuleDetailsHandler;
}

#[derive(Default)]
pub struct GetModuleDetailsHandler;

#[async_trait]
impl RequestHandler<GetModuleDetails> for GetModuleDetailsHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetModuleDetails,
    ) -> AppResult<ModuleDetails> {
        let (module, link) = resolve_module(db, ctx, request.path_id, request.id).await?;

        let paths = ctx
            .run(
                module
                    .find_related(paths::Entity)
                    .filter(paths::Column::Deleted.is_null())
                    .order_by_asc(paths::Column::Title)
                    .all(db),
            )
            .await?;

        let prerequisites = ctx
            .run(
                module
                    .find_linked(modules::ModuleToPrerequisites)
                    .order_by_asc(modules::Column::Id)
                    .all(db),
            )
            .await?;

        let sections = ctx
            .run(
                module
                    .find_related(sections::Entity)
                    .order_by_asc(sections::Column::Order)
                    .order_by_asc(sections::Column::Id)
                    .all(db),
            )
            .await?;

        let themes = ctx
            .run(
                module
                    .find_related(themes::Entity)
                    .order_by_asc(themes::Column::Order)
                    .order_by_asc(themes::Column::Id)
                    .all(db),
            )
            .await?;

        Ok(ModuleDetails {
            id: module.id,
            title: module.title,
            description: module.description,
            necessity: module.necessity,
            order: link.order,
            tags: decode_tags(&module.tags),
            paths: paths.into_iter().map(PathTitleDto::from).collect(),
            prerequisites: prerequisites.into_iter().map(ModuleTitleDto::from).collect(),
            sections: sections.into_iter().map(SectionDto::from).collect(),
            themes: themes.into_iter().map(ThemeTitleDto::from).collect(),
        })
    }
}
