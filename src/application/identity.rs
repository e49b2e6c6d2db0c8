use std::collections::HashMap;

use async_trait::async_trait;

use crate::config::IdentityUser;
use crate::errors::{AppError, AppResult};

/// Resolves display names and roles for user ids
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn get_user_name(&self, user_id: &str) -> AppResult<String>;

    async fn get_roles(&self, user_id: &str) -> AppResult<Vec<String>>;
}

/// Directory backed by the `identity.users` configuration section
#[derive(Debug, Clone, Default)]
pub struct ConfiguredIdentityService {
    users: HashMap<String, IdentityUser>,
}

impl ConfiguredIdentityService {
    pub fn new(users: impl IntoIterator<Item = IdentityUser>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.id.clone(), user))
                .collect(),
        }
    }

    fn find(&self, user_id: &str) -> AppResult<&IdentityUser> {
        self.users
            .get(user_id)
            .ok_or_else(|| AppError::not_found("User", user_id))
    }
}

#[async_trait]
impl IdentityService for ConfiguredIdentityService {
    async fn get_user_name(&self, user_id: &str) -> AppResult<String> {
        Ok(self.find(user_id)?.name.clone())
    }

    async fn get_roles(&self, user_id: &str) -> AppResult<Vec<String>> {
        Ok(self.find(user_id)?.roles.clone())
    }
}
