//! Typed access to the session.
//!
//! All session keys are owned here. Callers go through one wrapper per concern:
//! - `AuthSession` - Logged-in user, crypt key and authentication source state
//! - `CsrfSession` - OAuth2 `state` parameter
//! - `OAuthFlowSession` - Source state carried across the OAuth2 redirect
//! - `MfaSession` - Pending second factor and the secret of an ongoing registration
//! - `FlashSession` - One-shot messages shown by the login view

use tower_sessions::Session;

use crate::server::{
    error::{internal::InternalError, AppError},
    model::auth::{AuthSourceState, FlashCategory, FlashMessage},
    util::crypto::{decode_key, encode_key, CryptKey},
};

const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_CRYPT_KEY: &str = "auth:crypt_key";
const SESSION_AUTH_SOURCE_MANAGER: &str = "auth_source_manager";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_OAUTH_PENDING_STATE: &str = "oauth:pending_state";
const SESSION_MFA_PENDING: &str = "mfa:pending";
const SESSION_MFA_AUTHENTICATOR_SECRET: &str = "mfa_authenticator_opt";
const SESSION_FLASHES: &str = "_flashes";

/// Login data of the session.
///
/// Holds the authenticated user's id, the key their saved server passwords are encrypted
/// with, and the state of the authentication source manager that logged them in.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Marks the session as logged in as `user_id`.
    pub async fn set_user_id(&self, user_id: i32) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_USER_ID, user_id).await?;
        Ok(())
    }

    /// Id of the logged-in user, `None` before login.
    pub async fn get_user_id(&self) -> Result<Option<i32>, AppError> {
        Ok(self.session.get::<i32>(SESSION_AUTH_USER_ID).await?)
    }

    pub async fn is_authenticated(&self) -> Result<bool, AppError> {
        Ok(self.get_user_id().await?.is_some())
    }

    /// Stores the derived crypt key, never the password it came from.
    pub async fn set_crypt_key(&self, key: &CryptKey) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_CRYPT_KEY, encode_key(key))
            .await?;
        Ok(())
    }

    /// Retrieves the crypt key of the logged-in user.
    ///
    /// # Returns
    /// - `Ok(Some(key))` - Key available
    /// - `Ok(None)` - No key stored (not logged in)
    /// - `Err(AppError::InternalErr(_))` - Stored key is not a valid 256-bit key
    pub async fn get_crypt_key(&self) -> Result<Option<CryptKey>, AppError> {
        let Some(encoded) = self.session.get::<String>(SESSION_AUTH_CRYPT_KEY).await? else {
            return Ok(None);
        };

        let key = decode_key(&encoded).ok_or(InternalError::MalformedCryptKey)?;

        Ok(Some(key))
    }

    /// Stores the authentication source manager state.
    pub async fn set_auth_state(&self, state: &AuthSourceState) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_SOURCE_MANAGER, state)
            .await?;
        Ok(())
    }

    /// Retrieves the authentication source manager state of the current login.
    pub async fn get_auth_state(&self) -> Result<Option<AuthSourceState>, AppError> {
        Ok(self
            .session
            .get::<AuthSourceState>(SESSION_AUTH_SOURCE_MANAGER)
            .await?)
    }

    /// Forgets the source state of a previous login attempt.
    pub async fn clear_auth_state(&self) -> Result<(), AppError> {
        self.session
            .remove::<AuthSourceState>(SESSION_AUTH_SOURCE_MANAGER)
            .await?;
        Ok(())
    }

    /// Issues a new session id while keeping the data, used right before storing a login.
    pub async fn cycle_id(&self) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        Ok(())
    }

    /// Drops everything, including flashes and pending flows. Used by logout and lockout.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// The OAuth2 `state` issued when redirecting to the provider.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Removes and returns the token; a token is checked at most once.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}

/// OAuth2 flow state session management.
///
/// Keeps the authentication source state computed from the login form while the
/// browser is away at the OAuth2 provider.
pub struct OAuthFlowSession<'a> {
    session: &'a Session,
}

impl<'a> OAuthFlowSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_pending_state(&self, state: &AuthSourceState) -> Result<(), AppError> {
        self.session
            .insert(SESSION_OAUTH_PENDING_STATE, state)
            .await?;
        Ok(())
    }

    /// Retrieves and removes the pending source state.
    pub async fn take_pending_state(&self) -> Result<Option<AuthSourceState>, AppError> {
        let state = self.session.remove(SESSION_OAUTH_PENDING_STATE).await?;
        Ok(state)
    }
}

/// Multi-factor authentication session management.
pub struct MfaSession<'a> {
    session: &'a Session,
}

impl<'a> MfaSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Marks whether the logged-in user still has to pass the second factor.
    pub async fn set_pending(&self, pending: bool) -> Result<(), AppError> {
        if pending {
            self.session.insert(SESSION_MFA_PENDING, true).await?;
        } else {
            self.session.remove::<bool>(SESSION_MFA_PENDING).await?;
        }
        Ok(())
    }

    pub async fn is_pending(&self) -> Result<bool, AppError> {
        Ok(self
            .session
            .get::<bool>(SESSION_MFA_PENDING)
            .await?
            .unwrap_or(false))
    }

    /// Stores the secret generated for an authenticator registration in progress.
    pub async fn set_authenticator_secret(&self, secret: &str) -> Result<(), AppError> {
        self.session
            .insert(SESSION_MFA_AUTHENTICATOR_SECRET, secret)
            .await?;
        Ok(())
    }

    pub async fn get_authenticator_secret(&self) -> Result<Option<String>, AppError> {
        Ok(self
            .session
            .get::<String>(SESSION_MFA_AUTHENTICATOR_SECRET)
            .await?)
    }

    pub async fn clear_authenticator_secret(&self) -> Result<(), AppError> {
        self.session
            .remove::<String>(SESSION_MFA_AUTHENTICATOR_SECRET)
            .await?;
        Ok(())
    }
}

/// Flash message storage.
///
/// Messages accumulate in order until the client drains them.
pub struct FlashSession<'a> {
    session: &'a Session,
}

impl<'a> FlashSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Appends a message to the queue.
    pub async fn push(
        &self,
        category: FlashCategory,
        message: impl Into<String>,
    ) -> Result<(), AppError> {
        let mut flashes = self
            .session
            .get::<Vec<FlashMessage>>(SESSION_FLASHES)
            .await?
            .unwrap_or_default();

        flashes.push(FlashMessage {
            category,
            message: message.into(),
        });

        self.session.insert(SESSION_FLASHES, flashes).await?;
        Ok(())
    }

    /// Removes and returns all queued messages.
    pub async fn take_all(&self) -> Result<Vec<FlashMessage>, AppError> {
        let flashes = self
            .session
            .remove::<Vec<FlashMessage>>(SESSION_FLASHES)
            .await?
            .unwrap_or_default();
        Ok(flashes)
    }
}
