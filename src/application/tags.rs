//! Tag vocabulary offered to editors

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use utoipa::ToSchema;

use super::context::RequestContext;
use super::mapping::project_all;
use super::mediator::{Request, RequestHandler};
use super::models::TagDto;
use super::validation::Rules;
use crate::auth::Permission;
use crate::database::entities::tags;
use crate::errors::{AppError, AppResult};

pub const NAME_MAX: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTagList;

impl Request for GetTagList {
    const NAME: &'static str = "GetTagList";
    type Response = Vec<TagDto>;
    type Handler = GetTagListHandler;
}

#[derive(Default)]
pub struct GetTagListHandler;

#[async_trait]
impl RequestHandler<GetTagList> for GetTagListHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        _request: GetTagList,
    ) -> AppResult<Vec<TagDto>> {
        let query = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .order_by_asc(tags::Column::Id);
        ctx.run(project_all::<TagDto, TagDto, _>(query, db)).await
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default)]
pub struct CreateTag {
    pub name: String,
}

impl Request for CreateTag {
    const NAME: &'static str = "CreateTag";
    const PERMISSION: Permission = Permission::Write;
    type Response = TagDto;
    type Handler = CreateTagHandler;

    fn validate(&self) -> AppResult<()> {
        Rules::new()
            .required("name", &self.name)
            .max_length("name", &self.name, NAME_MAX)
            .finish()
    }
}

#[derive(Default)]
pub struct CreateTagHandler;

#[async_trait]
impl RequestHandler<CreateTag> for CreateTagHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: CreateTag,
    ) -> AppResult<TagDto> {
        let name = request.name.trim().to_string();
        let txn = ctx.run(db.begin()).await?;

        let existing = ctx
            .run(
                tags::Entity::find()
                    .filter(tags::Column::Name.eq(name.as_str()))
                    .one(&txn),
            )
            .await?;
        if existing.is_some() {
            return Err(AppError::invalid_field(
                "name",
                format!("The tag '{}' already exists.", name),
            ));
        }

        let mut tag = tags::ActiveModel {
            name: Set(name),
            ..Default::default()
        };
        ctx.stamp_created(&mut tag);

        let tag = ctx.run(tag.insert(&txn)).await?;
        ctx.run(txn.commit()).await?;

        Ok(tag.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTag {
    pub id: i32,
}

impl Request for DeleteTag {
    const NAME: &'static str = "DeleteTag";
    const PERMISSION: Permission = Permission::Write;
    type Response = ();
    type Handler = DeleteTagHandler;
}

/// Entities keep their tag strings; only the vocabulary entry goes
#[derive(Default)]
pub struct DeleteTagHandler;

#[async_trait]
impl RequestHandler<DeleteTag> for DeleteTagHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: DeleteTag,
    ) -> AppResult<()> {
        let result = ctx
            .run(tags::Entity::delete_by_id(request.id).exec(db))
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::not_found("Tag", request.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{editor, mediator};

    fn create(name: &str) -> CreateTag {
        CreateTag {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_tags_listed_by_name() {
        let mediator = mediator().await;
        let ctx = editor();
        for name in ["tokio", "async", "serde"] {
            mediator.send(&ctx, create(name)).await.unwrap();
        }

        let names: Vec<String> = mediator
            .send(&RequestContext::anonymous(), GetTagList)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["async", "serde", "tokio"]);
    }

    #[tokio::test]
    async fn test_duplicate_tag_is_rejected() {
        let mediator = mediator().await;
        let ctx = editor();
        mediator.send(&ctx, create("rust")).await.unwrap();

        let err = mediator.send(&ctx, create("rust")).await.unwrap_err();
        match err {
            AppError::Validation(errors) => assert!(errors.contains("name")),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_and_long_names() {
        let mediator = mediator().await;
        let ctx = editor();

        let err = mediator.send(&ctx, create("")).await.unwrap_err();
        assert_eq!(err.http_status_code(), 422);
        let err = mediator
            .send(&ctx, create(&"t".repeat(NAME_MAX + 1)))
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), 422);
    }

    #[tokio::test]
    async fn test_delete_tag() {
        let mediator = mediator().await;
        let ctx = editor();
        let tag = mediator.send(&ctx, create("wasm")).await.unwrap();

        mediator.send(&ctx, DeleteTag { id: tag.id }).await.unwrap();
        let err = mediator
            .send(&ctx, DeleteTag { id: tag.id })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
