//! In-process dispatch of requests to their handlers
//!
//! Every request type names its handler through [`Request::Handler`], so routing is resolved
//! at compile time. [`Mediator::send`] runs the logging pre-processor, checks the permission
//! the request declares, validates the request and then calls the handler. Commands hold the
//! writer lock for their whole transaction, so SQLite only ever sees one writer.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tokio::sync::Mutex;

use super::context::RequestContext;
use super::identity::IdentityService;
use super::logging::LoggingPreProcessor;
use crate::auth::{Authorizer, Permission, RoleAuthorizer};
use crate::errors::{AppError, AppResult};

/// A command or query
pub trait Request: Serialize + Send + Sync + Sized + 'static {
    /// Stable name used in logs
    const NAME: &'static str;

    const PERMISSION: Permission = Permission::Read;

    type Response: Send;

    type Handler: RequestHandler<Self>;

    /// Field rules; requests without input rules keep the default
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
pub trait RequestHandler<R: Request>: Default + Send + Sync {
    async fn handle(
        &self,
        db: &DatabaseConnection,
        ctx: &RequestContext,
        request: R,
    ) -> AppResult<R::Response>;
}

#[derive(Clone)]
pub struct Mediator {
    db: DatabaseConnection,
    pre_processor: LoggingPreProcessor,
    authorizer: Arc<dyn Authorizer>,
    writer: Arc<Mutex<()>>,
}

impl Mediator {
    pub fn new(
        db: DatabaseConnection,
        identity: Arc<dyn IdentityService>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            db,
            pre_processor: LoggingPreProcessor::new(identity),
            authorizer,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Role-based authorization with the default administrator role
    pub fn with_defaults(db: DatabaseConnection, identity: Arc<dyn IdentityService>) -> Self {
        Self::new(db, identity, Arc::new(RoleAuthorizer::default()))
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn send<R: Request>(&self, ctx: &RequestContext, request: R) -> AppResult<R::Response> {
        self.pre_processor.process(ctx, R::NAME, &request).await;
        self.authorizer.authorize(&ctx.actor, R::PERMISSION)?;
        request.validate()?;
        ctx.check_cancelled()?;

        let handler = R::Handler::default();
        if R::PERMISSION == Permission::Read {
            return handler.handle(&self.db, ctx, request).await;
        }

        let _writer = ctx
            .run(async { Ok::<_, AppError>(self.writer.lock().await) })
            .await?;
        handler.handle(&self.db, ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::identity::ConfiguredIdentityService;
    use crate::auth::Actor;
    use crate::database::test_utils::setup_test_db;
    use crate::errors::AppError;
    use tokio_util::sync::CancellationToken;

    #[derive(Serialize)]
    struct Echo {
        value: i32,
    }

    #[derive(Default)]
    struct EchoHandler;

    impl Request for Echo {
        const NAME: &'static str = "Echo";
        type Response = i32;
        type Handler = EchoHandler;

        fn validate(&self) -> AppResult<()> {
            if self.value < 0 {
                return Err(AppError::invalid_field("value", "must not be negative"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RequestHandler<Echo> for EchoHandler {
        async fn handle(
            &self,
            _db: &DatabaseConnection,
            _ctx: &RequestContext,
            request: Echo,
        ) -> AppResult<i32> {
            Ok(request.value)
        }
    }

    #[derive(Serialize)]
    struct Purge;

    impl Request for Purge {
        const NAME: &'static str = "Purge";
        const PERMISSION: Permission = Permission::Administer;
        type Response = ();
        type Handler = PurgeHandler;
    }

    #[derive(Default)]
    struct PurgeHandler;

    #[async_trait]
    impl RequestHandler<Purge> for PurgeHandler {
        async fn handle(
            &self,
            _db: &DatabaseConnection,
            _ctx: &RequestContext,
            _request: Purge,
        ) -> AppResult<()> {
            Ok(())
        }
    }

    async fn mediator() -> Mediator {
        Mediator::with_defaults(
            setup_test_db().await,
            Arc::new(ConfiguredIdentityService::default()),
        )
    }

    #[tokio::test]
    async fn test_routes_to_bound_handler() {
        let mediator = mediator().await;
        let result = mediator
            .send(&RequestContext::anonymous(), Echo { value: 5 })
            .await
            .unwrap();
        assert_eq!(result, 5);
    }

    #[tokio::test]
    async fn test_rejects_invalid_request() {
        let mediator = mediator().await;
        let err = mediator
            .send(&RequestContext::anonymous(), Echo { value: -1 })
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), 422);
    }

    #[tokio::test]
    async fn test_checks_declared_permission() {
        let mediator = mediator().await;

        let err = mediator
            .send(&RequestContext::anonymous(), Purge)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let err = mediator
            .send(&RequestContext::new(Actor::user("u")), Purge)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let admin = RequestContext::new(Actor::user("u").with_role("Administrator"));
        assert!(mediator.send(&admin, Purge).await.is_ok());
    }

    #[tokio::test]
    async fn test_pre_cancelled_request_never_reaches_handler() {
        let mediator = mediator().await;
        let token = CancellationToken::new();
        token.cancel();
        let ctx = RequestContext::with_cancellation(Actor::anonymous(), token);

        let err = mediator.send(&ctx, Echo { value: 1 }).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
