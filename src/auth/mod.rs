use std::collections::BTreeSet;

use serde::Serialize;

use crate::errors::AppError;

/// Role that gates every Path mutation unless configured otherwise
pub const ADMINISTRATOR_ROLE: &str = "Administrator";

/// Identity attached to one request
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Actor {
    pub user_id: Option<String>,
    roles: BTreeSet<String>,
    is_system: bool,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            roles: BTreeSet::new(),
            is_system: false,
        }
    }

    /// Internal callers such as the seeder
    pub fn system() -> Self {
        Self {
            user_id: None,
            roles: BTreeSet::new(),
            is_system: true,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn is_system(&self) -> bool {
        self.is_system
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_system || self.user_id.is_some()
    }
}

/// What a request needs from its actor
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Permission {
    /// Open to anonymous callers
    Read,
    /// Any authenticated caller
    Write,
    /// Authenticated caller holding the administrator role
    Administer,
}

pub trait Authorizer: Send + Sync {
    fn authorize(&self, actor: &Actor, permission: Permission) -> Result<(), AppError>;
}

/// Used when authentication is switched off in the configuration
pub struct AllowAllAuthorizer;

impl Authorizer for AllowAllAuthorizer {
    fn authorize(&self, _actor: &Actor, _permission: Permission) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct RoleAuthorizer {
    admin_role: String,
}

impl RoleAuthorizer {
    pub fn new(admin_role: impl Into<String>) -> Self {
        Self {
            admin_role: admin_role.into(),
        }
    }
}

impl Default for RoleAuthorizer {
    fn default() -> Self {
        Self::new(ADMINISTRATOR_ROLE)
    }
}

impl Authorizer for RoleAuthorizer {
    fn authorize(&self, actor: &Actor, permission: Permission) -> Result<(), AppError> {
        if permission == Permission::Read || actor.is_system() {
            return Ok(());
        }
        if !actor.is_authenticated() {
            return Err(AppError::Unauthorized);
        }
        if permission == Permission::Administer && !actor.has_role(&self.admin_role) {
            return Err(AppError::forbidden(format!(
                "role '{}' is required",
                self.admin_role
            )));
        }
        Ok(())
    }
}
