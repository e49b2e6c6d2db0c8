use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[cfg(feature = "server")]
use utoipa::ToSchema;

use super::{module_rules, replace_prerequisites};
use crate::application::context::RequestContext;
use crate::application::lookup::{find_path, resolve_module};
use crate::application::mapping::encode_tags;
use crate::application::mediator::{Request, RequestHandler};
use crate::application::models::ModuleDto;
use crate::auth::Permission;
use crate::database::entities::{modules, path_modules, NecessityLevel};
use crate::errors::AppResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct CreateModule {
    pub path_id: i32,
    pub title: String,
    pub description: String,
    pub necessity: NecessityLevel,
    /// Position in the path
    pub order: i32,
    pub tags: Vec<String>,
    pub prerequisite_ids: Vec<i32>,
}

impl Request for CreateModule {
    const NAME: &'static str = "CreateModule";
    const PERMISSION: Permission = Permission::Write;
    type Response = ModuleDto;
    type Handler = CreateModuleHandler;

    fn validate(&self) -> AppResult<()> {
        module_rules(&self.title, &self.description, self.order, &self.tags).finish()
    }
}

#[derive(Default)]
pub struct CreateModuleHandler;

#[async_trait]
impl RequestHandler<CreateModule> for CreateModuleHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: CreateModule,
    ) -> AppResult<ModuleDto> {
        let txn = ctx.run(db.begin()).await?;
        find_path(&txn, ctx, request.path_id).await?;

        let mut module = modules::ActiveModel {
            title: Set(request.title),
            description: Set(request.description),
            necessity: Set(request.necessity),
            tags: Set(encode_tags(&request.tags)),
            ..Default::default()
        };
        ctx.stamp_created(&mut module);
        let module = ctx.run(module.insert(&txn)).await?;

        let link = path_modules::ActiveModel {
            path_id: Set(request.path_id),
            module_id: Set(module.id),
            order: Set(request.order),
        };
        ctx.run(path_modules::Entity::insert(link).exec_without_returning(&txn))
            .await?;

        replace_prerequisites(&txn, ctx, module.id, &request.prerequisite_ids).await?;
        ctx.run(txn.commit()).await?;

        info!("Created module {} in path {}", module.id, request.path_id);
        Ok(ModuleDto::from_model(module, request.order))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(ToSchema))]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateModule {
    pub id: i32,
    pub path_id: i32,
    pub title: String,
    pub description: String,
    pub necessity: NecessityLevel,
    pub order: i32,
    pub tags: Vec<String>,
    /// Replaces the prerequisite set when present
    pub prerequisite_ids: Option<Vec<i32>>,
}

impl Request for UpdateModule {
    const NAME: &'static str = "UpdateModule";
    const PERMISSION: Permission = Permission::Write;
    type Response = ModuleDto;
    type Handler = UpdateModuleHandler;

    fn validate(&self) -> AppResult<()> {
        module_rules(&self.title, &self.description, self.order, &self.tags).finish()
    }
}

#[derive(Default)]
pub struct UpdateModuleHandler;

#[async_trait]
impl RequestHandler<UpdateModule> for UpdateModuleHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: UpdateModule,
    ) -> AppResult<ModuleDto> {
        let txn = ctx.run(db.begin()).await?;
        let (existing, link) = resolve_module(&txn, ctx, request.path_id, request.id).await?;

        let mut module = existing.into_active_model();
        module.title = Set(request.title);
        module.description = Set(request.description);
        module.necessity = Set(request.necessity);
        module.tags = Set(encode_tags(&request.tags));
        ctx.stamp_modified(&mut module);
        let module = ctx.run(module.update(&txn)).await?;

        if link.order != request.order {
            let mut link = link.into_active_model();
            link.order = Set(request.order);
            ctx.run(link.update(&txn)).await?;
        }

        if let Some(prerequisite_ids) = &request.prerequisite_ids {
            replace_prerequisites(&txn, ctx, module.id, prerequisite_ids).await?;
        }
        ctx.run(txn.commit()).await?;

        Ok(ModuleDto::from_model(module, request.order))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteModule {
    pub path_id: i32,
    pub id: i32,
}

impl Request for DeleteModule {
    const NAME: &'static str = "DeleteModule";
    const PERMISSION: Permission = Permission::Write;
    type Response = ();
    type Handler = DeleteModuleHandler;
}

/// Removes the module everywhere; sections, themes and sources go with it
#[derive(Default)]
pub struct DeleteModuleHandler;

#[async_trait]
impl RequestHandler<DeleteModule> for DeleteModuleHandler {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: DeleteModule,
    ) -> AppResult<()> {
        let txn = ctx.run(db.begin()).await?;
        resolve_module(&txn, ctx, request.path_id, request.id).await?;

        ctx.run(modules::Entity::delete_by_id(request.id).exec(&txn))
            .await?;
        ctx.run(txn.commit()).await?;

        info!("Deleted module {} from path {}", request.id, request.path_id);
        Ok(())
    }
}
