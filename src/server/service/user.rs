//! User account management.
//!
//! Creates catalog users together with their default server group, creates the initial
//! administrator at startup, and changes internal passwords while keeping saved server
//! passwords readable under the new crypt key.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    config::Config,
    data::{server_group::ServerGroupRepository, user::UserRepository},
    error::{auth::AuthError, internal::InternalError, AppError},
    model::{
        auth::AuthSourceKind,
        user::{CreateUserParam, User, ROLE_ADMINISTRATOR},
    },
    service::server::ServerService,
    util::{
        crypto::{derive_key, CryptKey},
        password::{hash_password, verify_password},
        random::random_string,
    },
};

/// Name of the group every user owns from creation on.
pub const DEFAULT_SERVER_GROUP: &str = "Servers";

const MIN_PASSWORD_LENGTH: usize = 6;

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user and their default `Servers` group.
    ///
    /// Both rows are written in one transaction; if the group cannot be created the user
    /// is not created either.
    pub async fn create_user(&self, param: CreateUserParam) -> Result<User, AppError> {
        let txn = self.db.begin().await?;

        let user = UserRepository::new(&txn).create(param).await?;
        ServerGroupRepository::new(&txn)
            .create(user.id, DEFAULT_SERVER_GROUP)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Created {} user {} with role {}",
            user.auth_source,
            user.username,
            user.role
        );

        Ok(user)
    }

    /// Creates a user for an external source. Such users have no password.
    pub async fn create_external_user(
        &self,
        username: &str,
        email: Option<String>,
        source: AuthSourceKind,
        role: &str,
    ) -> Result<User, AppError> {
        self.create_user(CreateUserParam {
            username: username.to_string(),
            email,
            password_hash: None,
            role: role.to_string(),
            auth_source: source,
            fs_uniquifier: random_string(32),
        })
        .await
    }

    /// Creates the initial administrator when the catalog has no users yet.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Administrator created from `DEFAULT_EMAIL`/`DEFAULT_PASSWORD`
    /// - `Ok(None)` - Users already exist or no credentials are configured
    pub async fn create_default_admin(&self, config: &Config) -> Result<Option<User>, AppError> {
        let (Some(email), Some(password)) = (&config.default_email, &config.default_password)
        else {
            return Ok(None);
        };

        if UserRepository::new(self.db).count().await? > 0 {
            return Ok(None);
        }

        let password_hash =
            hash_password(password).map_err(|e| InternalError::PasswordHash(e.to_string()))?;

        let user = self
            .create_user(CreateUserParam {
                username: email.clone(),
                email: Some(email.clone()),
                password_hash: Some(password_hash),
                role: ROLE_ADMINISTRATOR.to_string(),
                auth_source: AuthSourceKind::Internal,
                fs_uniquifier: random_string(32),
            })
            .await?;

        Ok(Some(user))
    }

    /// Changes the password of an internal user.
    ///
    /// Saved server passwords are re-encrypted from `current_key` to the key derived from
    /// the new password, in the same transaction as the password update.
    ///
    /// # Returns
    /// - `Ok(CryptKey)` - Key derived from the new password, to be stored in the session
    /// - `Err(AuthError::NotInternalUser)` - User is managed by an external source
    /// - `Err(AuthError::InvalidPassword)` - Current password does not match
    /// - `Err(AppError::BadRequest)` - New password rejected
    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
        new_password_confirm: &str,
        current_key: &CryptKey,
    ) -> Result<CryptKey, AppError> {
        if user.auth_source != AuthSourceKind::Internal {
            return Err(AuthError::NotInternalUser(user.id).into());
        }

        let matches = user
            .password_hash
            .as_deref()
            .map(|hash| verify_password(current_password, hash))
            .unwrap_or(false);
        if !matches {
            return Err(AuthError::InvalidPassword.into());
        }

        if new_password != new_password_confirm {
            return Err(AppError::BadRequest("Passwords do not match".to_string()));
        }
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let password_hash =
            hash_password(new_password).map_err(|e| InternalError::PasswordHash(e.to_string()))?;

        let new_key = derive_key(new_password);
        let txn = self.db.begin().await?;

        ServerService::new(&txn)
            .reencrypt_server_passwords(user.id, current_key, &new_key)
            .await?;
        UserRepository::new(&txn)
            .update_password(user.id, password_hash)
            .await?;

        txn.commit().await?;

        tracing::info!("Password changed for user {}", user.username);

        Ok(new_key)
    }
}
