use std::future::Future;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::auth::Actor;
use crate::database::entities::Auditable;
use crate::errors::{AppError, AppResult};

/// Per-request state threaded through the mediator, the pre-processor and every handler
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    pub actor: Actor,
    cancellation: CancellationToken,
}

impl RequestContext {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(actor: Actor, cancellation: CancellationToken) -> Self {
        Self {
            actor,
            cancellation,
        }
    }

    pub fn anonymous() -> Self {
        Self::new(Actor::anonymous())
    }

    pub fn system() -> Self {
        Self::new(Actor::system())
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Empty for anonymous callers
    pub fn user_id(&self) -> &str {
        self.actor.user_id.as_deref().unwrap_or_default()
    }

    pub fn check_cancelled(&self) -> AppResult<()> {
        if self.cancellation.is_cancelled() {
            Err(AppError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Runs one persistence call, abandoning it as soon as the token fires.
    pub async fn run<F, T, E>(&self, operation: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<AppError>,
    {
        self.check_cancelled()?;
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(AppError::Cancelled),
            result = operation => result.map_err(Into::into),
        }
    }

    pub fn stamp_created<A: Auditable>(&self, model: &mut A) {
        model.stamp_created(self.actor.user_id.clone(), Utc::now());
    }

    pub fn stamp_modified<A: Auditable>(&self, model: &mut A) {
        model.stamp_modified(self.actor.user_id.clone(), Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[tokio::test]
    async fn test_run_passes_results_through() {
        let ctx = RequestContext::anonymous();
        let value = ctx.run(async { Ok::<_, DbErr>(7) }).await.unwrap();
        assert_eq!(value, 7);

        let err = ctx
            .run(async { Err::<i32, _>(DbErr::Custom("broken".into())) })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_fails_without_polling() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = RequestContext::with_cancellation(Actor::anonymous(), token);

        let err = ctx
            .run(async { Ok::<_, DbErr>(1) })
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancel_while_in_flight() {
        let ctx = RequestContext::anonymous();
        let token = ctx.cancellation_token().clone();

        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            token.cancel();
        });

        let err = ctx
            .run(async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Ok::<_, DbErr>(())
            })
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_user_id_is_empty_for_anonymous() {
        assert_eq!(RequestContext::anonymous().user_id(), "");
        assert_eq!(RequestContext::new(Actor::user("42")).user_id(), "42");
    }
}
