//! Sections: named groups of themes inside a module

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
use super::lookup::{find_section_in_module, resolve_module};
use super::mapping::{encode_tags, project_all};
use super::mediator::{Request, RequestHandler};
use super::models::{SectionDto, SectionRow};
use super::paging::{Paged, PaginationData};
use super::validation::Rules;
use crate::auth::Permission;
use crate::database::entities::{sections, NecessityLevel};
use crate::errors::AppResult;

pub const TITLE_MAX: usize = 100;
pub const TAG_MAX: usize = 50;

fn section_rules(title: &str, order: i32, tags: &[String]) -> Rules {
    Rules::new()
        .required("title", title)
        .max_length("title", title, TITLE_MAX)
        .non_negative("order", order)
        .tags("tags", tags, TAG_MAX)
}

fn sections_in_module(module_id: i32) -> Select<sections::Entity> {
    sections::Entity::find()
        .filter(sections::Column::ModuleId.eq(module_id))
        .order_by_asc(sections::Column::Order)
        .order_by_asc(sections::Column::Id)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSection {
    pub path_id: i32,
    pub module_id: i32,
    pub title: String,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: Vec<String>,
}

impl Request for CreateSection {
    const NAME: &'static str = "CreateSection";
    const PERMISSION: Permission = Permission::Write;
    type Response = SectionDto;
    type Handler = CreateSectionHandler;

    fn validate(&self) -> AppResult<()> {
        section_rules(&self.title, self.order, &self.tags).finish()
    }
}

#[derive(Default)]
pub struct CreateSectionHandler;

#[async_trait]
impl RequestHandler<CreateSection> for CreateSectionHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: CreateSection,
    ) -> AppResult<SectionDto> {
        let txn = ctx.run(db.begin()).await?;
        resolve_module(&txn, ctx, request.path_id, request.module_id).await?;

        let mut section = sections::ActiveModel {
            module_id: Set(request.module_id),
            title: Set(request.title),
            necessity: Set(request.necessity),
            order: Set(request.order),
            tags: Set(encode_tags(&request.tags)),
            ..Default::default()
        };
        ctx.stamp_created(&mut section);

        let section = ctx.run(section.insert(&txn)).await?;
        ctx.run(txn.commit()).await?;

        info!("Created section {} in module {}", section.id, section.module_id);
        Ok(section.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSection {
    pub id: i32,
    pub path_id: i32,
    pub module_id: i32,
    pub title: String,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: Vec<String>,
}

impl Request for UpdateSection {
    const NAME: &'static str = "UpdateSection";
    const PERMISSION: Permission = Permission::Write;
    type Response = SectionDto;
    type Handler = UpdateSectionHandler;

    fn validate(&self) -> AppResult<()> {
        section_rules(&self.title, self.order, &self.tags).finish()
    }
}

#[derive(Default)]
pub struct UpdateSectionHandler;

#[async_trait]
impl RequestHandler<UpdateSection> for UpdateSectionHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: UpdateSection,
    ) -> AppResult<SectionDto> {
        let txn = ctx.run(db.begin()).await?;
        resolve_module(&txn, ctx, request.path_id, request.module_id).await?;
        let existing = find_section_in_module(&txn, ctx, request.module_id, request.id).await?;

        let mut section = existing.into_active_model();
        section.title = Set(request.title);
        section.necessity = Set(request.necessity);
        section.order = Set(request.order);
        section.tags = Set(encode_tags(&request.tags));
        ctx.stamp_modified(&mut section);

        let section = ctx.run(section.update(&txn)).await?;
        ctx.run(txn.commit()).await?;

        Ok(section.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSection {
    pub path_id: i32,
    pub module_id: i32,
    pub id: i32,
}

impl Request for DeleteSection {
    const NAME: &'static str = "DeleteSection";
    const PERMISSION: Permission = Permission::Write;
    type Response = ();
    type Handler = DeleteSectionHandler;
}

/// Themes of the section stay in the module without a section
#[derive(Default)]
pub struct DeleteSectionHandler;

#[async_trait]
impl RequestHandler<DeleteSection> for DeleteSectionHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: DeleteSection,
    ) -> AppResult<()> {
        let txn = ctx.run(db.begin()).await?;
        resolve_module(&txn, ctx, request.path_id, request.module_id).await?;
        find_section_in_module(&txn, ctx, request.module_id, request.id).await?;

        ctx.run(sections::Entity::delete_by_id(request.id).exec(&txn))
            .await?;
        ctx.run(txn.commit()).await?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSection {
    pub path_id: i32,
    pub module_id: i32,
    pub id: i32,
}

impl Request for GetSection {
    const NAME: &'static str = "GetSection";
    type Response = SectionDto;
    type Handler = GetSectionHandler;
}

#[derive(Default)]
pub struct GetSectionHandler;

#[async_trait]
impl RequestHandler<GetSection> for GetSectionHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetSection,
    ) -> AppResult<SectionDto> {
        resolve_module(db, ctx, request.path_id, request.module_id).await?;
        Ok(find_section_in_module(db, ctx, request.module_id, request.id)
            .await?
            .into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSectionList {
    pub path_id: i32,
    pub module_id: i32,
}

impl Request for GetSectionList {
    const NAME: &'static str = "GetSectionList";
    type Response = Vec<SectionDto>;
    type Handler = GetSectionListHandler;
}

#[derive(Default)]
pub struct GetSectionListHandler;

#[async_trait]
impl RequestHandler<GetSectionList> for GetSectionListHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetSectionList,
    ) -> AppResult<Vec<SectionDto>> {
        resolve_module(db, ctx, request.path_id, request.module_id).await?;
        ctx.run(project_all::<SectionRow, SectionDto, _>(
            sections_in_module(request.module_id),
            db,
        ))
        .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSectionListPaging {
    pub path_id: i32,
    pub module_id: i32,
    pub pagination: PaginationData,
}

impl Request for GetSectionListPaging {
    const NAME: &'static str = "GetSectionListPaging";
    type Response = Paged<SectionDto>;
    type Handler = GetSectionListPagingHandler;
}

#[derive(Default)]
pub struct GetSectionListPagingHandler;

#[async_trait]
impl RequestHandler<GetSectionListPaging> for GetSectionListPagingHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: GetSectionListPaging,
    ) -> AppResult<Paged<SectionDto>> {
        resolve_module(db, ctx, request.path_id, request.module_id).await?;
        let query = request
            .pagination
            .apply(sections_in_module(request.module_id));
        let items = ctx
            .run(project_all::<SectionRow, SectionDto, _>(query, db))
            .await?;

        Ok(Paged {
            items,
            pagination: request.pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{editor, mediator};
    use crate::database::entities::themes;
    use crate::database::test_utils::{insert_module, insert_path, insert_theme};

    async fn fixture(mediator: &crate::application::Mediator) -> (i32, i32) {
        let path = insert_path(mediator.db(), "Some Path").await;
        let module = insert_module(mediator.db(), path.id, "Some Module", 0).await;
        (path.id, module.id)
    }

    fn create(path_id: i32, module_id: i32, title: &str, order: i32) -> CreateSection {
        CreateSection {
            path_id,
            module_id,
            title: title.to_string(),
            necessity: NecessityLevel::Interesting,
            order,
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_and_list_in_order() {
        let mediator = mediator().await;
        let (path_id, module_id) = fixture(&mediator).await;
        let ctx = editor();

        mediator
            .send(&ctx, create(path_id, module_id, "Second", 1))
            .await
            .unwrap();
        let first = mediator
            .send(&ctx, create(path_id, module_id, "First", 0))
            .await
            .unwrap();
        assert_eq!(first.module_id, module_id);

        let titles: Vec<String> = mediator
            .send(&ctx, GetSectionList { path_id, module_id })
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);

        let page = mediator
            .send(
                &ctx,
                GetSectionListPaging {
                    path_id,
                    module_id,
                    pagination: PaginationData::new(2, 1),
                },
            )
            .await
            .unwrap();
        assert_eq!(page.items[0].title, "Second");
    }

    #[tokio::test]
    async fn test_update_section() {
        let mediator = mediator().await;
        let (path_id, module_id) = fixture(&mediator).await;
        let ctx = editor();
        let section = mediator
            .send(&ctx, create(path_id, module_id, "Draft", 0))
            .await
            .unwrap();

        let updated = mediator
            .send(
                &ctx,
                UpdateSection {
                    id: section.id,
                    path_id,
                    module_id,
                    title: "Final".to_string(),
                    necessity: NecessityLevel::MustKnow,
                    order: 2,
                    tags: vec!["core".to_string()],
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.order, 2);

        let fetched = mediator
            .send(
                &ctx,
                GetSection {
                    path_id,
                    module_id,
                    id: section.id,
                },
            )
            .await
            .unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_delete_section_detaches_themes() {
        let mediator = mediator().await;
        let (path_id, module_id) = fixture(&mediator).await;
        let ctx = editor();
        let section = mediator
            .send(&ctx, create(path_id, module_id, "Chapter", 0))
            .await
            .unwrap();

        let theme = insert_theme(mediator.db(), module_id, "Theme").await;
        let mut active = theme.into_active_model();
        active.section_id = Set(Some(section.id));
        let theme = active.update(mediator.db()).await.unwrap();

        mediator
            .send(
                &ctx,
                DeleteSection {
                    path_id,
                    module_id,
                    id: section.id,
                },
            )
            .await
            .unwrap();

        let theme = themes::Entity::find_by_id(theme.id)
            .one(mediator.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(theme.section_id, None);
    }

    #[tokio::test]
    async fn test_section_in_missing_module() {
        let mediator = mediator().await;
        let (path_id, _) = fixture(&mediator).await;

        let err = mediator
            .send(&editor(), create(path_id, 99999, "Nowhere", 0))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Entity \"Module\" (99999) was not found");
    }
}
