use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[cfg(feature = "server")]
use utoipa::ToSchema;

use super::{check_section, replace_related, theme_rules};
use crate::application::context::RequestContext;
use crate::application::lookup::{resolve_module, resolve_theme};
use crate::application::mapping::encode_tags;
use crate::application::mediator::{Request, RequestHandler};
use crate::application::models::ThemeDto;
use crate::auth::Permission;
use crate::database::entities::{themes, ComplexityLevel, NecessityLevel};
use crate::errors::AppResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTheme {
    pub path_id: i32,
    pub module_id: i32,
    pub section_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub complexity: ComplexityLevel,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: Vec<String>,
    pub related_theme_ids: Vec<i32>,
}

impl Request for CreateTheme {
    const NAME: &'static str = "CreateTheme";
    const PERMISSION: Permission = Permission::Write;
    type Response = ThemeDto;
    type Handler = CreateThemeHandler;

    fn validate(&self) -> AppResult<()> {
        theme_rules(&self.title, &self.description, self.order, &self.tags).finish()
    }
}

#[derive(Default)]
pub struct CreateThemeHandler;

#[async_trait]
impl RequestHandler<CreateTheme> for CreateThemeHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: CreateTheme,
    ) -> AppResult<ThemeDto> {
        let txn = ctx.run(db.begin()).await?;
        resolve_module(&txn, ctx, request.path_id, request.module_id).await?;
        check_section(&txn, ctx, request.module_id, request.section_id).await?;

        let mut theme = themes::ActiveModel {
            module_id: Set(request.module_id),
            section_id: Set(request.section_id),
            title: Set(request.title),
            description: Set(request.description),
            complexity: Set(request.complexity),
            necessity: Set(request.necessity),
            order: Set(request.order),
            tags: Set(encode_tags(&request.tags)),
            ..Default::default()
        };
        ctx.stamp_created(&mut theme);
        let theme = ctx.run(theme.insert(&txn)).await?;

        replace_related(&txn, ctx, theme.id, &request.related_theme_ids).await?;
        ctx.run(txn.commit()).await?;

        info!("Created theme {} in module {}", theme.id, theme.module_id);
        Ok(theme.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateTheme {
    pub id: i32,
    pub path_id: i32,
    pub module_id: i32,
    pub section_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub complexity: ComplexityLevel,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: Vec<String>,
    /// Replaces the related themes when present
    pub related_theme_ids: Option<Vec<i32>>,
}

impl Request for UpdateTheme {
    const NAME: &'static str = "UpdateTheme";
    const PERMISSION: Permission = Permission::Write;
    type Response = ThemeDto;
    type Handler = UpdateThemeHandler;

    fn validate(&self) -> AppResult<()> {
        theme_rules(&self.title, &self.description, self.order, &self.tags).finish()
    }
}

#[derive(Default)]
pub struct UpdateThemeHandler;

#[async_trait]
impl RequestHandler<UpdateTheme> for UpdateThemeHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: UpdateTheme,
    ) -> AppResult<ThemeDto> {
        let txn = ctx.run(db.begin()).await?;
        let existing =
            resolve_theme(&txn, ctx, request.path_id, request.module_id, request.id).await?;
        check_section(&txn, ctx, request.module_id, request.section_id).await?;

        let mut theme = existing.into_active_model();
        theme.section_id = Set(request.section_id);
        theme.title = Set(request.title);
        theme.description = Set(request.description);
        theme.complexity = Set(request.complexity);
        theme.necessity = Set(request.necessity);
        theme.order = Set(request.order);
        theme.tags = Set(encode_tags(&request.tags));
        ctx.stamp_modified(&mut theme);
        let theme = ctx.run(theme.update(&txn)).await?;

        if let Some(related_ids) = &request.related_theme_ids {
            replace_related(&txn, ctx, theme.id, related_ids).await?;
        }
        ctx.run(txn.commit()).await?;

        Ok(theme.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTheme {
    pub path_id: i32,
    pub module_id: i32,
    pub id: i32,
}

impl Request for DeleteTheme {
    const NAME: &'static str = "DeleteTheme";
    const PERMISSION: Permission = Permission::Write;
    type Response = ();
    type Handler = DeleteThemeHandler;
}

#[derive(Default)]
pub struct DeleteThemeHandler;

#[async_trait]
impl RequestHandler<DeleteTheme> for DeleteThemeHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: DeleteTheme,
    ) -> AppResult<()> {
        let txn = ctx.run(db.begin()).await?;
        resolve_theme(&txn, ctx, request.path_id, request.module_id, request.id).await?;

        ctx.run(themes::Entity::delete_by_id(request.id).exec(&txn))
            .await?;
        ctx.run(txn.commit()).await?;

        info!("Deleted theme {} from module {}", request.id, request.module_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sections::CreateSection;
    use crate::application::sources::{CreateSource, SourceFields};
    use crate::application::test_support::{editor, mediator};
    use crate::application::themes::{GetTheme, GetThemeDetails};
    use crate::database::entities::{sources, theme_relations};
    use crate::database::test_utils::{insert_module, insert_path, insert_theme};
    use crate::errors::AppError;
    use sea_orm::PaginatorTrait;

    fn create(path_id: i32, module_id: i32, title: &str) -> CreateTheme {
        CreateTheme {
            path_id,
            module_id,
            title: title.to_string(),
            description: format!("{} explained", title),
            complexity: ComplexityLevel::Intermediate,
            necessity: NecessityLevel::Possibilities,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_theme_with_section_and_related() {
        let mediator = mediator().await;
        let db = mediator.db();
        let path = insert_path(db, "Backend").await;
        let module = insert_module(db, path.id, "Databases", 0).await;
        let indexes = insert_theme(db, module.id, "Indexes").await;
        let ctx = editor();

        let section = mediator
            .send(
                &ctx,
                CreateSection {
                    path_id: path.id,
                    module_id: module.id,
                    title: "Performance".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let theme = mediator
            .send(
                &ctx,
                CreateTheme {
                    section_id: Some(section.id),
                    related_theme_ids: vec![indexes.id],
                    ..create(path.id, module.id, "Query plans")
                },
            )
            .await
            .unwrap();
        assert_eq!(theme.section_id, Some(section.id));

        let details = mediator
            .send(
                &RequestContext::anonymous(),
                GetThemeDetails {
                    path_id: path.id,
                    module_id: module.id,
                    id: theme.id,
                },
            )
            .await
            .unwrap();
        assert_eq!(details.section.map(|s| s.title), Some("Performance".to_string()));
        assert_eq!(details.related_themes.len(), 1);
        assert_eq!(details.related_themes[0].title, "Indexes");
    }

    #[tokio::test]
    async fn test_section_from_other_module_is_rejected() {
        let mediator = mediator().await;
        let db = mediator.db();
        let path = insert_path(db, "Backend").await;
        let module = insert_module(db, path.id, "Databases", 0).await;
        let other = insert_module(db, path.id, "Networking", 1).await;
        let ctx = editor();

        let foreign = mediator
            .send(
                &ctx,
                CreateSection {
                    path_id: path.id,
                    module_id: other.id,
                    title: "Sockets".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = mediator
            .send(
                &ctx,
                CreateTheme {
                    section_id: Some(foreign.id),
                    ..create(path.id, module.id, "Transactions")
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "Section", .. }));
    }

    #[tokio::test]
    async fn test_theme_cannot_relate_to_itself() {
        let mediator = mediator().await;
        let db = mediator.db();
        let path = insert_path(db, "Backend").await;
        let module = insert_module(db, path.id, "Databases", 0).await;
        let theme = insert_theme(db, module.id, "Joins").await;

        let err = mediator
            .send(
                &editor(),
                UpdateTheme {
                    id: theme.id,
                    path_id: path.id,
                    module_id: module.id,
                    title: "Joins".to_string(),
                    description: "Inner and outer".to_string(),
                    related_theme_ids: Some(vec![theme.id]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), 422);
        assert_eq!(
            theme_relations::Entity::find().count(db).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_update_keeps_relations_when_omitted() {
        let mediator = mediator().await;
        let db = mediator.db();
        let path = insert_path(db, "Backend").await;
        let module = insert_module(db, path.id, "Databases", 0).await;
        let other = insert_theme(db, module.id, "Normal forms").await;
        let ctx = editor();

        let theme = mediator
            .send(
                &ctx,
                CreateTheme {
                    related_theme_ids: vec![other.id],
                    ..create(path.id, module.id, "Schema design")
                },
            )
            .await
            .unwrap();

        let updated = mediator
            .send(
                &ctx,
                UpdateTheme {
                    id: theme.id,
                    path_id: path.id,
                    module_id: module.id,
                    title: "Schema design".to_string(),
                    description: "Tables and keys".to_string(),
                    order: 3,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, "Tables and keys");
        assert_eq!(updated.order, 3);
        assert_eq!(
            theme_relations::Entity::find().count(db).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_theme_removes_sources() {
        let mediator = mediator().await;
        let db = mediator.db();
        let path = insert_path(db, "Backend").await;
        let module = insert_module(db, path.id, "Databases", 0).await;
        let theme = insert_theme(db, module.id, "Replication").await;
        let ctx = editor();

        mediator
            .send(
                &ctx,
                CreateSource {
                    path_id: path.id,
                    module_id: module.id,
                    theme_id: theme.id,
                    fields: SourceFields {
                        title: "Designing Data-Intensive Applications".to_string(),
                        url: "https://dataintensive.net/".to_string(),
                        ..Default::default()
                    },
                },
            )
            .await
            .unwrap();

        mediator
            .send(
                &ctx,
                DeleteTheme {
                    path_id: path.id,
                    module_id: module.id,
                    id: theme.id,
                },
            )
            .await
            .unwrap();

        assert_eq!(sources::Entity::find().count(db).await.unwrap(), 0);
        let err = mediator
            .send(
                &ctx,
                GetTheme {
                    path_id: path.id,
                    module_id: module.id,
                    id: theme.id,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
