use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    middleware::session::{AuthSession, MfaSession},
    model::user::User,
};

pub enum Permission {
    Admin,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the fully logged-in user and checks `permissions`.
    ///
    /// # Returns
    /// - `Ok(User)` - Logged in, second factor passed, all permissions granted
    /// - `Err(AuthError::UserNotInSession)` - No login in the session
    /// - `Err(AuthError::UserNotInDatabase)` - The session user was deleted
    /// - `Err(AuthError::UserInactive)` - The account is inactive or locked
    /// - `Err(AuthError::MfaPending)` - The second factor has not been validated
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let user = self.require_session_user().await?;

        if MfaSession::new(self.session).is_pending().await? {
            return Err(AuthError::MfaPending(user.id).into());
        }

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin() {
                        return Err(AuthError::AccessDenied(
                            user.id,
                            "User attempted an administrator operation without the Administrator role".to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(user)
    }

    /// Resolves the session user without checking the second factor.
    ///
    /// Only the MFA validation endpoints use this directly.
    pub async fn require_session_user(&self) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = user_repo.find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if !user.active || user.locked {
            return Err(AuthError::UserInactive(user_id).into());
        }

        Ok(user)
    }
}
