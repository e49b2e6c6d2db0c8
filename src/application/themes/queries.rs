use async_trait::async_trait;
use sea_orm::{DatabaseConnection, ModelTrait, QueryOrder};
use serde::{Deserialize, Serialize};

use super::themes_in_module;
use crate::application::context::RequestContext;
use crate::application::lookup::{resolve_module, resolve_theme};
use crate::application::mapping::{decode_tags, project_all};
use crate::application::mediator::{Request, RequestHandler};
use crate::application::models::{
    SectionDto, SourceDto, ThemeDetails, ThemeDto, ThemeRow, ThemeTitleDto,
};
use crate::application::paging::{Paged, PaginationData};
use crate::database::entities::{sections, sources, themes};
use crate::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTheme {
    pub path_id: i32,
    pub module_id: i32,
    pub id: i32,
}

impl Request for GetTheme {
    const NAME: &'static str = "GetTheme";
    type Response = ThemeDto;
    type Handler = GetThemeHandler;
}

#[derive(Default)]
pub struct GetThemeHandler;

#[async_trait]
impl RequestHandler<GetTheme> for GetThemeHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetTheme,
    ) -> AppResult<ThemeDto> {
        Ok(
            resolve_theme(db, ctx, request.path_id, request.module_id, request.id)
                .await?
                .into(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetThemeList {
    pub path_id: i32,
    pub module_id: i32,
}

impl Request for GetThemeList {
    const NAME: &'static str = "GetThemeList";
    type Response = Vec<ThemeDto>;
    type Handler = GetThemeListHandler;
}

#[derive(Default)]
pub struct GetThemeListHandler;

#[async_trait]
impl RequestHandler<GetThemeList> for GetThemeListHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetThemeList,
    ) -> AppResult<Vec<ThemeDto>> {
        resolve_module(db, ctx, request.path_id, request.module_id).await?;
        ctx.run(project_all::<ThemeRow, ThemeDto, _>(
            themes_in_module(request.module_id),
            db,
        ))
        .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetThemeListPaging {
    pub path_id: i32,
    pub module_id: i32,
    pub pagination: PaginationData,
}

impl Request for GetThemeListPaging {
    const NAME: &'static str = "GetThemeListPaging";
    type Response = Paged<ThemeDto>;
    type Handler = GetThemeListPagingHandler;
}

#[derive(Default)]
pub struct GetThemeListPagingHandler;

#[async_trait]
impl RequestHandler<GetThemeListPaging> for GetThemeListPagingHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetThemeListPaging,
    ) -> AppResult<Paged<ThemeDto>> {
        resolve_module(db, ctx, request.path_id, request.module_id).await?;
        let query = request.pagination.apply(themes_in_module(request.module_id));
        let items = ctx
            .run(project_all::<ThemeRow, ThemeDto, _>(query, db))
            .await?;

        Ok(Paged {
            items,
            pagination: request.pagination,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetThemeDetails {
    pub path_id: i32,
    pub module_id: i32,
    pub id: i32,
}

impl Request for GetThemeDetails {
    const NAME: &'static str = "GetThemeDetails";
    type Response = ThemeDetails;
    type Handler = GetThemeDetailsHandler;
}

#[derive(Default)]
pub struct GetThemeDetailsHandler;

#[async_trait]
impl RequestHandler<GetThemeDetails> for GetThemeDetailsHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetThemeDetails,
    ) -> AppResult<ThemeDetails> {
        let theme = resolve_theme(db, ctx, request.path_id, request.module_id, request.id).await?;

        let section = ctx
            .run(theme.find_related(sections::Entity).one(db))
            .await?;

        let sources = ctx
            .run(
                theme
                    .find_related(sources::Entity)
                    .order_by_asc(sources::Column::Order)
                    .order_by_asc(sources::Column::Id)
                    .all(db),
            )
            .await?;

        let related = ctx
            .run(
                theme
                    .find_linked(themes::ThemeToRelated)
                    .order_by_asc(themes::Column::Order)
                    .order_by_asc(themes::Column::Id)
                    .all(db),
            )
            .await?;

        Ok(ThemeDetails {
            id: theme.id,
            module_id: theme.module_id,
            section: section.map(SectionDto::from),
            title: theme.title,
            description: theme.description,
            complexity: theme.complexity,
            necessity: theme.necessity,
            order: theme.order,
            tags: decode_tags(&theme.tags),
            sources: sources.into_iter().map(SourceDto::from).collect(),
            related_themes: related.into_iter().map(ThemeTitleDto::from).collect(),
        })
    }
}
