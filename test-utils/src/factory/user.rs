//! User factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Builder for user records.
///
/// Defaults:
/// - username and email: `user{n}@example.com`
/// - password: none (set a pre-computed PHC hash with `password_hash`)
/// - role: `User`, auth source: `internal`, active, not locked, no failed attempts
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    username: String,
    email: Option<String>,
    password_hash: Option<String>,
    active: bool,
    role: String,
    auth_source: String,
    login_attempts: i32,
    locked: bool,
    fs_uniquifier: String,
}

impl<'a> UserFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        let username = format!("user{}@example.com", id);
        Self {
            db,
            email: Some(username.clone()),
            username,
            password_hash: None,
            active: true,
            role: "User".to_string(),
            auth_source: "internal".to_string(),
            login_attempts: 0,
            locked: false,
            fs_uniquifier: format!("uniquifier-{}", id),
        }
    }

    /// Sets the username; the email follows unless set explicitly afterwards.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        self.email = Some(username.clone());
        self.username = username;
        self
    }

    pub fn email(mut self, email: Option<&str>) -> Self {
        self.email = email.map(str::to_string);
        self
    }

    /// Sets the stored password hash (argon2 PHC string).
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn auth_source(mut self, auth_source: impl Into<String>) -> Self {
        self.auth_source = auth_source.into();
        self
    }

    pub fn login_attempts(mut self, attempts: i32) -> Self {
        self.login_attempts = attempts;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            username: ActiveValue::Set(self.username),
            email: ActiveValue::Set(self.email),
            password: ActiveValue::Set(self.password_hash),
            active: ActiveValue::Set(self.active),
            role: ActiveValue::Set(self.role),
            auth_source: ActiveValue::Set(self.auth_source),
            login_attempts: ActiveValue::Set(self.login_attempts),
            locked: ActiveValue::Set(self.locked),
            fs_uniquifier: ActiveValue::Set(self.fs_uniquifier),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an internal user with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates an internal user with the `Administrator` role.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).role("Administrator").build().await
}
