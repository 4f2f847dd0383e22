//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing catalog users. It handles user
//! creation, lookups by id or by name within an authentication source, the login-attempt
//! counter used for lockout, and password updates.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    EntityTrait, PaginatorTrait, QueryFilter,
};

use crate::server::{
    error::AppError,
    model::{
        auth::AuthSourceKind,
        user::{CreateUserParam, User},
    },
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new active, unlocked user.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateUserParam) -> Result<User, AppError> {
        let entity = entity::user::ActiveModel {
            username: ActiveValue::Set(param.username),
            email: ActiveValue::Set(param.email),
            password: ActiveValue::Set(param.password_hash),
            active: ActiveValue::Set(true),
            role: ActiveValue::Set(param.role),
            auth_source: ActiveValue::Set(param.auth_source.as_str().to_string()),
            login_attempts: ActiveValue::Set(0),
            locked: ActiveValue::Set(false),
            fs_uniquifier: ActiveValue::Set(param.fs_uniquifier),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(AppError)` - Database error or unreadable auth source
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        entity.map(User::from_entity).transpose()
    }

    /// Finds a user by username within one authentication source.
    ///
    /// The same username may exist once per source, e.g. an internal and an LDAP account.
    pub async fn find_by_username_and_source(
        &self,
        username: &str,
        source: AuthSourceKind,
    ) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .filter(entity::user::Column::AuthSource.eq(source.as_str()))
            .one(self.db)
            .await?;

        entity.map(User::from_entity).transpose()
    }

    /// Counts all users in the catalog.
    pub async fn count(&self) -> Result<u64, AppError> {
        let count = entity::prelude::User::find().count(self.db).await?;

        Ok(count)
    }

    /// Increments the failed login counter and returns the new value.
    ///
    /// # Returns
    /// - `Ok(attempts)` - Counter after the increment
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn increment_login_attempts(&self, id: i32) -> Result<i32, AppError> {
        let Some(entity) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        };

        let attempts = entity.login_attempts + 1;
        let mut active: entity::user::ActiveModel = entity.into();
        active.login_attempts = ActiveValue::Set(attempts);
        active.update(self.db).await?;

        Ok(attempts)
    }

    /// Resets the failed login counter and unlocks the account.
    pub async fn reset_login_attempts(&self, id: i32) -> Result<(), AppError> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::LoginAttempts, Expr::value(0))
            .col_expr(entity::user::Column::Locked, Expr::value(false))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Sets the locked flag of a user.
    pub async fn set_locked(&self, id: i32, locked: bool) -> Result<(), AppError> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::Locked, Expr::value(locked))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Replaces the stored password hash.
    pub async fn update_password(&self, id: i32, password_hash: String) -> Result<(), AppError> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::Password, Expr::value(password_hash))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
