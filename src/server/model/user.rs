//! User domain model and parameters.

use std::str::FromStr;

use crate::server::{
    error::{internal::InternalError, AppError},
    model::auth::AuthSourceKind,
};

pub const ROLE_ADMINISTRATOR: &str = "Administrator";
pub const ROLE_USER: &str = "User";

/// Catalog user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub active: bool,
    pub role: String,
    pub auth_source: AuthSourceKind,
    pub login_attempts: i32,
    pub locked: bool,
    pub fs_uniquifier: String,
}

impl User {
    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Err(InternalError::UnknownAuthSource)` - The stored auth source is not recognised
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let auth_source = AuthSourceKind::from_str(&entity.auth_source)
            .map_err(InternalError::UnknownAuthSource)?;

        Ok(Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password,
            active: entity.active,
            role: entity.role,
            auth_source,
            login_attempts: entity.login_attempts,
            locked: entity.locked,
            fs_uniquifier: entity.fs_uniquifier,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMINISTRATOR
    }

    /// Identity shown to the user: the email when known, otherwise the username.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.username)
    }
}

/// Parameters for creating a catalog user.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub username: String,
    pub email: Option<String>,
    /// Argon2 PHC string; `None` for external sources.
    pub password_hash: Option<String>,
    pub role: String,
    pub auth_source: AuthSourceKind,
    pub fs_uniquifier: String,
}
