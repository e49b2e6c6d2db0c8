use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};
use serde::{Deserialize, Serialize};

use crate::application::context::RequestContext;
use crate::application::lookup::find_path;
use crate::application::mapping::project_all;
use crate::application::mediator::{Request, RequestHandler};
use crate::application::models::{DeletedPathDto, PathDetails, PathDto, PathModuleDto, PathRow};
use crate::application::paging::{Paged, PaginationData};
use crate::auth::Permission;
use crate::database::entities::{modules, path_modules, paths};
use crate::errors::AppResult;

/// Live paths ordered by title
fn live_paths() -> Select<paths::Entity> {
    paths::Entity::find()
        .filter(paths::Column::Deleted.is_null())
        .order_by_asc(paths::Column::Title)
        .order_by_asc(paths::Column::Id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPath {
    pub id: i32,
}

impl Request for GetPath {
    const NAME: &'static str = "GetPath";
    type Response = PathDto;
    type Handler = GetPathHandler;
}

#[derive(Default)]
pub struct GetPathHandler;

#[async_trait]
impl RequestHandler<GetPath> for GetPathHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetPath,
    ) -> AppResult<PathDto> {
        Ok(find_path(db, ctx, request.id).await?.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPathList;

impl Request for GetPathList {
    const NAME: &'static str = "GetPathList";
    type Response = Vec<PathDto>;
    type Handler = GetPathListHandler;
}

#[derive(Default)]
pub struct GetPathListHandler;

#[async_trait]
impl RequestHandler<GetPathList> for GetPathListHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        _request: GetPathList,
    ) -> AppResult<Vec<PathDto>> {
        ctx.run(project_all::<PathRow, PathDto, _>(live_paths(), db))
            .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPathListPaging {
    pub pagination: PaginationData,
}

impl Request for GetPathListPaging {
    const NAME: &'static str = "GetPathListPaging";
    type Response = Paged<PathDto>;
    type Handler = GetPathListPagingHandler;
}

#[derive(Default)]
pub struct GetPathListPagingHandler;

#[async_trait]
impl RequestHandler<GetPathListPaging> for GetPathListPagingHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetPathListPaging,
    ) -> AppResult<Paged<PathDto>> {
        let query = request.pagination.apply(live_paths());
        let items = ctx
            .run(project_all::<PathRow, PathDto, _>(query, db))
            .await?;

        Ok(Paged {
            items,
            pagination: request.pagination,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPathDetails {
    pub id: i32,
}

impl Request for GetPathDetails {
    const NAME: &'static str = "GetPathDetails";
    type Response = PathDetails;
    type Handler = GetPathDetailsHandler;
}

#[derive(Default)]
pub struct GetPathDetailsHandler;

#[async_trait]
impl RequestHandler<GetPathDetails> for GetPathDetailsHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetPathDetails,
    ) -> AppResult<PathDetails> {
        let path = find_path(db, ctx, request.id).await?;

        let links = ctx
            .run(
                path_modules::Entity::find()
                    .filter(path_modules::Column::PathId.eq(path.id))
                    .find_also_related(modules::Entity)
                    .order_by_asc(path_modules::Column::Order)
                    .order_by_asc(path_modules::Column::ModuleId)
                    .all(db),
            )
            .await?;

        let modules = links
            .into_iter()
            .filter_map(|(link, module)| {
                module.map(|module| PathModuleDto {
                    id: module.id,
                    title: module.title,
                    necessity: module.necessity,
                    order: link.order,
                })
            })
            .collect();

        Ok(PathDetails::new(path, modules))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetDeletedPathList;

impl Request for GetDeletedPathList {
    const NAME: &'static str = "GetDeletedPathList";
    const PERMISSION: Permission = Permission::Administer;
    type Response = Vec<DeletedPathDto>;
    type Handler = GetDeletedPathListHandler;
}

#[derive(Default)]
pub struct GetDeletedPathListHandler;

#[async_trait]
impl RequestHandler<GetDeletedPathList> for GetDeletedPathListHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        _request: GetDeletedPathList,
    ) -> AppResult<Vec<DeletedPathDto>> {
        let paths = ctx
            .run(
                paths::Entity::find()
                    .filter(paths::Column::Deleted.is_not_null())
                    .order_by_desc(paths::Column::Deleted)
                    .all(db),
            )
            .await?;

        Ok(paths.into_iter().map(DeletedPathDto::from).collect())
    }
}
