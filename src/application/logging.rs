use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::context::RequestContext;
use super::identity::IdentityService;

/// Runs ahead of every handler and records who asked for what
#[derive(Clone)]
pub struct LoggingPreProcessor {
    identity: Arc<dyn IdentityService>,
}

impl LoggingPreProcessor {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self { identity }
    }

    /// Never fails: a missing user name or an unserializable payload is logged and replaced by
    /// an empty value.
    pub async fn process<R: Serialize>(&self, ctx: &RequestContext, name: &str, request: &R) {
        let user_id = ctx.user_id();
        let user_name = self.user_name(user_id).await;

        let payload = serde_json::to_string(request).unwrap_or_else(|err| {
            warn!("Could not serialize request {}: {}", name, err);
            String::new()
        });

        info!(
            request = name,
            user_id = user_id,
            user_name = user_name.as_str(),
            payload = payload.as_str(),
            "DeveloperPath Request: {} {} {} {}",
            name,
            user_id,
            user_name,
            payload
        );
    }

    async fn user_name(&self, user_id: &str) -> String {
        if user_id.is_empty() {
            return String::new();
        }
        match self.identity.get_user_name(user_id).await {
            Ok(name) => name,
            Err(err) => {
                warn!("Could not resolve user name for {}: {}", user_id, err);
                String::new()
            }
        }
    }
}
