//! The login handler flow: lockout, validation, authentication, session setup and the
//! optional second factor.

use tower_sessions::Session;

use crate::{
    model::auth::LoginForm,
    server::{
        data::{user::UserRepository, user_mfa::UserMfaRepository},
        error::{auth::AuthError, AppError},
        middleware::session::{AuthSession, CsrfSession, FlashSession, MfaSession, OAuthFlowSession},
        model::{
            auth::{AuthSourceKind, AuthSourceState, FlashCategory},
            user::User,
        },
        service::auth::{
            manager::AuthSourceManager, oauth2::OAuth2AuthSource, AuthContext, AuthOutcome,
            LoginOutcome,
        },
        util::crypto::derive_key,
    },
};

pub const POST_LOGIN_REDIRECT: &str = "/browser/";
pub const POST_LOGOUT_REDIRECT: &str = "/login";
pub const MFA_VALIDATE_URL: &str = "/mfa/validate";
pub const KERBEROS_LOGIN_URL: &str = "/kerberos/login";

const ACCOUNT_LOCKED: &str = "Your account is locked. Please contact the Administrator.";
const KERBEROS_DISABLED: &str = "Kerberos authentication is not enabled.";
const LOGIN_ATTEMPT_FIELDS: [&str; 2] = ["email", "password"];

/// What the login endpoint answers with.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginResponse {
    /// Redirect within the console.
    Redirect(String),
    /// Redirect to the external identity provider.
    ProviderRedirect(String),
    /// 401 asking the client to negotiate Kerberos credentials.
    Challenge,
}

/// Message appended to the first error of a login field after a failed attempt.
pub fn attempts_remaining_message(max_attempts: i32, login_attempts: i32) -> String {
    let left = max_attempts - login_attempts;
    if left > 1 {
        format!("{} more attempts remaining.", left)
    } else {
        format!("{} more attempt remaining.", left)
    }
}

/// Logout URL matching the source the user logged in with.
pub fn get_logout_url(state: Option<&AuthSourceState>, server_mode: bool) -> String {
    let logout = match state.map(|state| state.current_source) {
        Some(AuthSourceKind::Kerberos) if server_mode => "/kerberos/logout",
        Some(AuthSourceKind::OAuth2) if server_mode => "/oauth2/logout",
        _ => "/logout",
    };

    format!("{}?next={}", logout, POST_LOGIN_REDIRECT)
}

/// Target after logout: `next` when it is a path on this site, the login page otherwise.
pub fn logout_redirect(next: Option<&str>) -> String {
    match next {
        Some(next) if next.starts_with('/') && !next.starts_with("//") => next.to_string(),
        _ => POST_LOGOUT_REDIRECT.to_string(),
    }
}

pub struct LoginService<'a> {
    ctx: &'a AuthContext<'a>,
    session: &'a Session,
}

impl<'a> LoginService<'a> {
    pub fn new(ctx: &'a AuthContext<'a>, session: &'a Session) -> Self {
        Self { ctx, session }
    }

    /// Processes a posted login form.
    pub async fn login(&self, form: &LoginForm) -> Result<LoginResponse, AppError> {
        let config = self.ctx.config;
        let flash = FlashSession::new(self.session);
        let users = UserRepository::new(self.ctx.db);

        let mut manager = AuthSourceManager::new(self.ctx, form);
        AuthSession::new(self.session).clear_auth_state().await?;

        let username = form.email.as_deref().map(str::trim).unwrap_or_default();
        let mut internal_user = users
            .find_by_username_and_source(username, AuthSourceKind::Internal)
            .await?;

        if let Some(user) = &internal_user {
            let locked = config.lockout_enabled() && user.login_attempts >= config.max_login_attempts;
            users.set_locked(user.id, locked).await?;

            if locked {
                tracing::info!("Login refused for locked user {}", user.username);
                AuthSession::new(self.session).clear().await;
                flash.push(FlashCategory::Warning, ACCOUNT_LOCKED).await?;
                return Ok(LoginResponse::Redirect(POST_LOGOUT_REDIRECT.to_string()));
            }
        }

        if let Err(failure) = manager.validate(form).await? {
            if let Some(message) = failure.message {
                flash.push(FlashCategory::Warning, message).await?;
            }

            for (field, errors) in failure.field_errors.iter() {
                let mut attempts_message = None;
                if let Some(user) = internal_user.as_mut() {
                    if LOGIN_ATTEMPT_FIELDS.contains(&field) && config.lockout_enabled() {
                        user.login_attempts = users.increment_login_attempts(user.id).await?;
                        attempts_message = Some(attempts_remaining_message(
                            config.max_login_attempts,
                            user.login_attempts,
                        ));
                    }
                }

                for error in errors {
                    let message = match attempts_message.take() {
                        Some(suffix) => format!("{}{}", error, suffix),
                        None => error.clone(),
                    };
                    flash.push(FlashCategory::Warning, message).await?;
                }
            }

            return Ok(LoginResponse::Redirect(POST_LOGOUT_REDIRECT.to_string()));
        }

        match manager.authenticate(form).await? {
            AuthOutcome::Authenticated(_) => {}
            AuthOutcome::Redirect { url, csrf_state } => {
                CsrfSession::new(self.session).set_token(csrf_state).await?;
                OAuthFlowSession::new(self.session)
                    .set_pending_state(&manager.as_state())
                    .await?;
                return Ok(LoginResponse::ProviderRedirect(url));
            }
            AuthOutcome::Challenge => return Ok(LoginResponse::Challenge),
            AuthOutcome::Failed(message) => {
                flash.push(FlashCategory::Danger, message).await?;
                return Ok(LoginResponse::Redirect(POST_LOGOUT_REDIRECT.to_string()));
            }
        }

        match manager.login(form).await? {
            LoginOutcome::LoggedIn {
                user,
                crypt_material,
            } => {
                let target = self
                    .complete_login(&user, &crypt_material, &manager.as_state())
                    .await?;
                Ok(LoginResponse::Redirect(target))
            }
            LoginOutcome::Failed(_) if manager.current_source() == AuthSourceKind::Kerberos => {
                Ok(LoginResponse::Redirect(format!(
                    "{}?next={}",
                    KERBEROS_LOGIN_URL, POST_LOGIN_REDIRECT
                )))
            }
            LoginOutcome::Failed(message) => {
                flash.push(FlashCategory::Danger, message).await?;
                Ok(LoginResponse::Redirect(POST_LOGOUT_REDIRECT.to_string()))
            }
        }
    }

    /// Logs in with the principal negotiated by the fronting web server.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Kerberos is not a configured authentication source
    pub async fn kerberos_login(&self) -> Result<LoginResponse, AppError> {
        if !self
            .ctx
            .config
            .authentication_sources
            .contains(&AuthSourceKind::Kerberos)
        {
            tracing::warn!("Refused Kerberos login, the source is not enabled");
            return Err(AppError::NotFound(KERBEROS_DISABLED.to_string()));
        }

        let mut manager =
            AuthSourceManager::with_sources(self.ctx, vec![AuthSourceKind::Kerberos]);
        let form = LoginForm::default();

        match manager.authenticate(&form).await? {
            AuthOutcome::Authenticated(_) => {}
            AuthOutcome::Failed(message) => {
                FlashSession::new(self.session)
                    .push(FlashCategory::Danger, message)
                    .await?;
                return Ok(LoginResponse::Redirect(POST_LOGOUT_REDIRECT.to_string()));
            }
            _ => return Ok(LoginResponse::Challenge),
        }

        self.finish(&mut manager, &form).await
    }

    /// Completes an OAuth2 login when the provider redirects back.
    ///
    /// # Returns
    /// - `Err(AuthError::CsrfValidationFailed)` - `state` does not match the session
    pub async fn oauth2_callback(
        &self,
        state: &str,
        code: String,
    ) -> Result<LoginResponse, AppError> {
        let expected = CsrfSession::new(self.session).take_token().await?;
        if expected.as_deref() != Some(state) {
            return Err(AuthError::CsrfValidationFailed.into());
        }

        let pending = OAuthFlowSession::new(self.session)
            .take_pending_state()
            .await?
            .unwrap_or_else(|| AuthSourceState {
                source_friendly_name: AuthSourceKind::OAuth2.to_string(),
                auth_sources: vec![AuthSourceKind::OAuth2],
                current_source: AuthSourceKind::OAuth2,
            });

        let identity = match OAuth2AuthSource::new(self.ctx).exchange(code).await? {
            Ok(identity) => identity,
            Err(message) => {
                FlashSession::new(self.session)
                    .push(FlashCategory::Danger, message)
                    .await?;
                return Ok(LoginResponse::Redirect(POST_LOGOUT_REDIRECT.to_string()));
            }
        };

        let pending = AuthSourceState {
            current_source: AuthSourceKind::OAuth2,
            ..pending
        };
        let mut manager = AuthSourceManager::resume(self.ctx, pending, identity);

        self.finish(&mut manager, &LoginForm::default()).await
    }

    /// Clears the login from the session.
    pub async fn logout(&self, next: Option<&str>) -> Result<LoginResponse, AppError> {
        if let Some(user_id) = AuthSession::new(self.session).get_user_id().await? {
            tracing::info!("User {} logged out", user_id);
        }

        AuthSession::new(self.session).clear().await;

        Ok(LoginResponse::Redirect(logout_redirect(next)))
    }

    async fn finish(
        &self,
        manager: &mut AuthSourceManager<'_>,
        form: &LoginForm,
    ) -> Result<LoginResponse, AppError> {
        match manager.login(form).await? {
            LoginOutcome::LoggedIn {
                user,
                crypt_material,
            } => {
                let target = self
                    .complete_login(&user, &crypt_material, &manager.as_state())
                    .await?;
                Ok(LoginResponse::Redirect(target))
            }
            LoginOutcome::Failed(message) => {
                FlashSession::new(self.session)
                    .push(FlashCategory::Danger, message)
                    .await?;
                Ok(LoginResponse::Redirect(POST_LOGOUT_REDIRECT.to_string()))
            }
        }
    }

    /// Stores the login in the session and returns the redirect target.
    ///
    /// The session id is cycled first. When MFA is enabled and the user registered a
    /// method, the session stays MFA-pending and the target is the validation page.
    pub async fn complete_login(
        &self,
        user: &User,
        crypt_material: &str,
        state: &AuthSourceState,
    ) -> Result<String, AppError> {
        let auth_session = AuthSession::new(self.session);
        auth_session.cycle_id().await?;
        auth_session.set_user_id(user.id).await?;
        auth_session.set_crypt_key(&derive_key(crypt_material)).await?;
        auth_session.set_auth_state(state).await?;

        UserRepository::new(self.ctx.db)
            .reset_login_attempts(user.id)
            .await?;

        tracing::info!(
            "User {} logged in via {}",
            user.username,
            state.source_friendly_name
        );

        let mfa_required = self.ctx.config.mfa_enabled
            && UserMfaRepository::new(self.ctx.db)
                .has_any(user.id)
                .await?;
        MfaSession::new(self.session).set_pending(mfa_required).await?;

        if mfa_required {
            return Ok(MFA_VALIDATE_URL.to_string());
        }

        Ok(POST_LOGIN_REDIRECT.to_string())
    }
}
