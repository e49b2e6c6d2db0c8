use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[cfg(feature = "server")]
use utoipa::ToSchema;

use super::{ensure_key_available, path_rules, unique_key_from_title};
use crate::application::context::RequestContext;
use crate::application::lookup::find_path;
use crate::application::mapping::{decode_tags, encode_tags};
use crate::application::mediator::{Request, RequestHandler};
use crate::application::models::PathDto;
use crate::auth::Permission;
use crate::database::entities::paths;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePath {
    pub title: String,
    pub description: String,
    pub is_visible: bool,
    /// Derived from the title when omitted
    pub key: Option<String>,
    pub tags: Vec<String>,
}

impl Request for CreatePath {
    const NAME: &'static str = "CreatePath";
    const PERMISSION: Permission = Permission::Administer;
    type Response = PathDto;
    type Handler = CreatePathHandler;

    fn validate(&self) -> AppResult<()> {
        path_rules(&self.title, &self.description, self.key.as_deref(), &self.tags).finish()
    }
}

#[derive(Default)]
pub struct CreatePathHandler;

#[async_trait]
impl RequestHandler<CreatePath> for CreatePathHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: CreatePath,
    ) -> AppResult<PathDto> {
        let txn = ctx.run(db.begin()).await?;

        let key = match request.key {
            Some(key) => {
                ensure_key_available(&txn, ctx, &key, None).await?;
                key
            }
            None => unique_key_from_title(&txn, ctx, &request.title).await?,
        };

        let mut path = paths::ActiveModel {
            title: Set(request.title),
            description: Set(request.description),
            is_visible: Set(request.is_visible),
            key: Set(key),
            tags: Set(encode_tags(&request.tags)),
            deleted: Set(None),
            ..Default::default()
        };
        ctx.stamp_created(&mut path);

        let path = ctx.run(path.insert(&txn)).await?;
        ctx.run(txn.commit()).await?;

        info!("Created path {} ({})", path.id, path.key);
        Ok(path.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePath {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub is_visible: bool,
    /// Kept unchanged when omitted
    pub key: Option<String>,
    pub tags: Vec<String>,
}

impl Request for UpdatePath {
    const NAME: &'static str = "UpdatePath";
    const PERMISSION: Permission = Permission::Administer;
    type Response = PathDto;
    type Handler = UpdatePathHandler;

    fn validate(&self) -> AppResult<()> {
        path_rules(&self.title, &self.description, self.key.as_deref(), &self.tags).finish()
    }
}

#[derive(Default)]
pub struct UpdatePathHandler;

#[async_trait]
impl RequestHandler<UpdatePath> for UpdatePathHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: UpdatePath,
    ) -> AppResult<PathDto> {
        let txn = ctx.run(db.begin()).await?;
        let existing = find_path(&txn, ctx, request.id).await?;

        if let Some(key) = &request.key {
            if key != &existing.key {
                ensure_key_available(&txn, ctx, key, Some(existing.id)).await?;
            }
        }

        let mut path = existing.into_active_model();
        path.title = Set(request.title);
        path.description = Set(request.description);
        path.is_visible = Set(request.is_visible);
        if let Some(key) = request.key {
            path.key = Set(key);
        }
        path.tags = Set(encode_tags(&request.tags));
        ctx.stamp_modified(&mut path);

        let path = ctx.run(path.update(&txn)).await?;
        ctx.run(txn.commit()).await?;

        Ok(path.into())
    }
}

/// Fields a JSON Patch document may touch on a live path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PathPatchDocument {
    pub title: String,
    pub description: String,
    pub is_visible: bool,
    pub key: String,
    pub tags: Vec<String>,
}

impl From<&paths::Model> for PathPatchDocument {
    fn from(model: &paths::Model) -> Self {
        Self {
            title: model.title.clone(),
            description: model.description.clone(),
            is_visible: model.is_visible,
            key: model.key.clone(),
            tags: decode_tags(&model.tags),
        }
    }
}

/// Applies an RFC 6902 patch to a path document
fn apply_patch<T>(document: &T, patch: &json_patch::Patch) -> AppResult<T>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut value = serde_json::to_value(document)
        .map_err(|err| AppError::internal(format!("could not serialize document: {}", err)))?;
    json_patch::patch(&mut value, patch)
        .map_err(|err| AppError::bad_request(format!("Invalid patch: {}", err)))?;
    serde_json::from_value(value)
        .map_err(|err| AppError::bad_request(format!("Patched document is invalid: {}", err)))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchPath {
    pub id: i32,
    pub patch: json_patch::Patch,
}

impl Request for PatchPath {
    const NAME: &'static str = "PatchPath";
    const PERMISSION: Permission = Permission::Administer;
    type Response = PathDto;
    type Handler = PatchPathHandler;
}

#[derive(Default)]
pub struct PatchPathHandler;

#[async_trait]
impl RequestHandler<PatchPath> for PatchPathHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: PatchPath,
    ) -> AppResult<PathDto> {
        let txn = ctx.run(db.begin()).await?;
        let existing = find_path(&txn, ctx, request.id).await?;

        let patched = apply_patch(&PathPatchDocument::from(&existing), &request.patch)?;
        path_rules(
            &patched.title,
            &patched.description,
            Some(&patched.key),
            &patched.tags,
        )
        .finish()?;
        if patched.key != existing.key {
            ensure_key_available(&txn, ctx, &patched.key, Some(existing.id)).await?;
        }

        let mut path = existing.into_active_model();
        path.title = Set(patched.title);
        path.description = Set(patched.description);
        path.is_visible = Set(patched.is_visible);
        path.key = Set(patched.key);
        path.tags = Set(encode_tags(&patched.tags));
        ctx.stamp_modified(&mut path);

        let path = ctx.run(path.update(&txn)).await?;
        ctx.run(txn.commit()).await?;

        Ok(path.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePath {
    pub id: i32,
}

impl Request for DeletePath {
    const NAME: &'static str = "DeletePath";
    const PERMISSION: Permission = Permission::Administer;
    type Response = ();
    type Handler = DeletePathHandler;
}

/// Soft delete: the row and its module links stay in place
#[derive(Default)]
pub struct DeletePathHandler;

#[async_trait]
impl RequestHandler<DeletePath> for DeletePathHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: DeletePath,
    ) -> AppResult<()> {
        let txn = ctx.run(db.begin()).await?;
        let existing = find_path(&txn, ctx, request.id).await?;

        let mut path = existing.into_active_model();
        path.deleted = Set(Some(Utc::now()));
        ctx.stamp_modified(&mut path);

        ctx.run(path.update(&txn)).await?;
        ctx.run(txn.commit()).await?;

        info!("Soft-deleted path {}", request.id);
        Ok(())
    }
}

/// Document exposed to the restore patch; only `/deleted` is honoured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletedPathDocument {
    id: i32,
    title: String,
    key: String,
    deleted: Option<chrono::DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestorePath {
    pub id: i32,
    pub patch: json_patch::Patch,
}

impl Request for RestorePath {
    const NAME: &'static str = "RestorePath";
    const PERMISSION: Permission = Permission::Administer;
    type Response = PathDto;
    type Handler = RestorePathHandler;
}

#[derive(Default)]
pub struct RestorePathHandler;

#[async_trait]
impl RequestHandler<RestorePath> for RestorePathHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: RestorePath,
    ) -> AppResult<PathDto> {
        let txn = ctx.run(db.begin()).await?;
        let existing = ctx
            .run(
                paths::Entity::find_by_id(request.id)
                    .filter(paths::Column::Deleted.is_not_null())
                    .one(&txn),
            )
            .await?
            .ok_or_else(|| AppError::not_found("Path", request.id))?;

        let document = DeletedPathDocument {
            id: existing.id,
            title: existing.title.clone(),
            key: existing.key.clone(),
            deleted: existing.deleted,
        };
        let patched = apply_patch(&document, &request.patch)?;
        if patched.deleted.is_some() {
            return Err(AppError::bad_request(
                "A deleted path is restored by replacing /deleted with null",
            ));
        }

        let mut path = existing.into_active_model();
        path.deleted = Set(None);
        ctx.stamp_modified(&mut path);

        let path = ctx.run(path.update(&txn)).await?;
        ctx.run(txn.commit()).await?;

        info!("Restored path {}", path.id);
        Ok(path.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::paths::{GetDeletedPathList, GetPath, GetPathList};
    use crate::application::test_support::{admin, editor, mediator};
    use serde_json::json;

    fn create(title: &str) -> CreatePath {
        CreatePath {
            title: title.to_string(),
            description: "Path description".to_string(),
            is_visible: true,
            key: None,
            tags: vec!["rust".to_string()],
        }
    }

    fn patch(value: serde_json::Value) -> json_patch::Patch {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_path_round_trip() {
        let mediator = mediator().await;
        let ctx = admin();

        let created = mediator.send(&ctx, create("Some Path")).await.unwrap();
        assert_eq!(created.title, "Some Path");
        assert_eq!(created.key, "some-path");
        assert_eq!(created.tags, vec!["rust"]);

        let fetched = mediator.send(&ctx, GetPath { id: created.id }).await.unwrap();
        assert_eq!(fetched, created);

        let stored = paths::Entity::find_by_id(created.id)
            .one(mediator.db())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.created_by.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_derived_keys_are_made_unique() {
        let mediator = mediator().await;
        let ctx = admin();

        mediator.send(&ctx, create("Backend")).await.unwrap();
        let second = mediator.send(&ctx, create("Backend")).await.unwrap();
        assert_eq!(second.key, "backend-2");
    }

    #[tokio::test]
    async fn test_explicit_duplicate_key_is_validation_error() {
        let mediator = mediator().await;
        let ctx = admin();

        mediator.send(&ctx, create("Backend")).await.unwrap();
        let mut request = create("Other");
        request.key = Some("backend".to_string());

        match mediator.send(&ctx, request).await.unwrap_err() {
            AppError::Validation(errors) => assert!(errors.contains("key")),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_requires_title_and_administrator() {
        let mediator = mediator().await;

        let err = mediator.send(&admin(), create("")).await.unwrap_err();
        assert_eq!(err.http_status_code(), 422);

        let err = mediator.send(&editor(), create("Valid")).await.unwrap_err();
        assert_eq!(err.http_status_code(), 403);
    }

    #[tokio::test]
    async fn test_update_path() {
        let mediator = mediator().await;
        let ctx = admin();
        let created = mediator.send(&ctx, create("Old title")).await.unwrap();

        let updated = mediator
            .send(
                &ctx,
                UpdatePath {
                    id: created.id,
                    title: "New title".to_string(),
                    description: "New description".to_string(),
                    is_visible: false,
                    key: None,
                    tags: vec![],
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.key, created.key);
        assert!(!updated.is_visible);
        assert!(updated.tags.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_path() {
        let mediator = mediator().await;
        let err = mediator
            .send(
                &admin(),
                UpdatePath {
                    id: 99999,
                    title: "Title".to_string(),
                    description: "Description".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_patch_path() {
        let mediator = mediator().await;
        let ctx = admin();
        let created = mediator.send(&ctx, create("Patch me")).await.unwrap();

        let patched = mediator
            .send(
                &ctx,
                PatchPath {
                    id: created.id,
                    patch: patch(json!([
                        { "op": "replace", "path": "/title", "value": "Patched" },
                        { "op": "add", "path": "/tags/-", "value": "web" }
                    ])),
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.title, "Patched");
        assert_eq!(patched.tags, vec!["rust", "web"]);
    }

    #[tokio::test]
    async fn test_patch_rejects_invalid_results() {
        let mediator = mediator().await;
        let ctx = admin();
        let created = mediator.send(&ctx, create("Patch me")).await.unwrap();

        let err = mediator
            .send(
                &ctx,
                PatchPath {
                    id: created.id,
                    patch: patch(json!([{ "op": "replace", "path": "/title", "value": "" }])),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), 422);

        let err = mediator
            .send(
                &ctx,
                PatchPath {
                    id: created.id,
                    patch: patch(json!([{ "op": "remove", "path": "/missing" }])),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), 400);
    }

    #[tokio::test]
    async fn test_soft_delete_and_restore() {
        let mediator = mediator().await;
        let ctx = admin();
        let created = mediator.send(&ctx, create("Temporary")).await.unwrap();

        mediator
            .send(&ctx, DeletePath { id: created.id })
            .await
            .unwrap();

        assert!(mediator
            .send(&ctx, GetPath { id: created.id })
            .await
            .unwrap_err()
            .is_not_found());
        assert!(mediator.send(&ctx, GetPathList).await.unwrap().is_empty());

        let deleted = mediator.send(&ctx, GetDeletedPathList).await.unwrap();
        assert_eq!(deleted.len(), 1);
        assert!(deleted[0].deleted.is_some());

        let restored = mediator
            .send(
                &ctx,
                RestorePath {
                    id: created.id,
                    patch: patch(json!([{ "op": "replace", "path": "/deleted", "value": null }])),
                },
            )
            .await
            .unwrap();
        assert_eq!(restored, created);
        assert!(mediator.send(&ctx, GetDeletedPathList).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_restore_requires_clearing_deleted() {
        let mediator = mediator().await;
        let ctx = admin();
        let created = mediator.send(&ctx, create("Temporary")).await.unwrap();
        mediator
            .send(&ctx, DeletePath { id: created.id })
            .await
            .unwrap();

        let err = mediator
            .send(
                &ctx,
                RestorePath {
                    id: created.id,
                    patch: patch(json!([{ "op": "replace", "path": "/title", "value": "x" }])),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), 400);

        let err = mediator
            .send(
                &ctx,
                RestorePath {
                    id: 99999,
                    patch: patch(json!([{ "op": "replace", "path": "/deleted", "value": null }])),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
