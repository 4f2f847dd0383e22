//! Multi-factor authentication.
//!
//! The methods offered are the supported ones listed in `MFA_SUPPORTED_METHODS`. A user
//! with at least one registered method has to pass one of them after every login.

pub mod totp;

use tower_sessions::Session;

use sea_orm::DatabaseConnection;

use crate::{
    model::mfa::{MfaMethodDto, MfaRegisterForm, MfaRegistrationViewDto, MfaValidationViewDto},
    server::{
        config::Config,
        data::user_mfa::UserMfaRepository,
        error::AppError,
        middleware::session::MfaSession,
        model::user::User,
        service::mfa::totp::{
            TotpAuthenticator, TOTP_AUTH_ICON, TOTP_AUTH_LABEL, TOTP_AUTH_METHOD,
        },
    },
};

/// An MFA method this build can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MfaMethod {
    Authenticator,
}

impl MfaMethod {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            TOTP_AUTH_METHOD => Some(Self::Authenticator),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Authenticator => TOTP_AUTH_METHOD,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Authenticator => TOTP_AUTH_LABEL,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Authenticator => TOTP_AUTH_ICON,
        }
    }
}

/// Methods enabled by the configuration, unknown names skipped.
pub fn enabled_methods(config: &Config) -> Vec<MfaMethod> {
    let mut methods = Vec::new();

    for name in &config.mfa_supported_methods {
        match MfaMethod::from_name(name) {
            Some(method) if !methods.contains(&method) => methods.push(method),
            Some(_) => {}
            None => tracing::warn!("Ignoring unsupported MFA method '{}'", name),
        }
    }

    methods
}

/// Result of a registration step.
#[derive(Debug, Clone, PartialEq)]
pub enum MfaRegistration {
    /// The client has to show this view and submit a code.
    Pending(MfaRegistrationViewDto),
    Registered,
}

pub struct MfaService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    session: &'a Session,
}

impl<'a> MfaService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config, session: &'a Session) -> Self {
        Self {
            db,
            config,
            session,
        }
    }

    /// Enabled methods with the user's registration status.
    pub async fn list(&self, user_id: i32) -> Result<Vec<MfaMethodDto>, AppError> {
        let registered = UserMfaRepository::new(self.db)
            .list_methods(user_id)
            .await?;

        let methods = enabled_methods(self.config)
            .into_iter()
            .map(|method| MfaMethodDto {
                name: method.name().to_string(),
                label: method.label().to_string(),
                icon: method.icon().to_string(),
                registered: registered.iter().any(|name| name == method.name()),
            })
            .collect();

        Ok(methods)
    }

    /// Validation views of the methods the user registered.
    pub async fn validation_views(
        &self,
        user_id: i32,
    ) -> Result<Vec<MfaValidationViewDto>, AppError> {
        let registered = UserMfaRepository::new(self.db)
            .list_methods(user_id)
            .await?;

        let views = enabled_methods(self.config)
            .into_iter()
            .filter(|method| registered.iter().any(|name| name == method.name()))
            .map(|method| match method {
                MfaMethod::Authenticator => {
                    TotpAuthenticator::new(self.db, self.session).validation_view()
                }
            })
            .collect();

        Ok(views)
    }

    /// Checks the second factor and lifts the MFA-pending mark of the session.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Unknown method or rejected code
    pub async fn validate(&self, user_id: i32, method: &str, code: &str) -> Result<(), AppError> {
        let method = self.method(method)?;

        let result = match method {
            MfaMethod::Authenticator => {
                TotpAuthenticator::new(self.db, self.session)
                    .validate(user_id, code)
                    .await?
            }
        };

        if let Err(message) = result {
            tracing::info!("MFA validation failed for user {}: {}", user_id, message);
            return Err(AppError::BadRequest(message));
        }

        MfaSession::new(self.session).set_pending(false).await?;

        Ok(())
    }

    pub async fn register(
        &self,
        user: &User,
        method: &str,
        form: &MfaRegisterForm,
    ) -> Result<MfaRegistration, AppError> {
        let method = self.method(method)?;

        let view = match method {
            MfaMethod::Authenticator => {
                TotpAuthenticator::new(self.db, self.session)
                    .registration_view(user, &self.config.app_name, form)
                    .await?
            }
        };

        Ok(match view {
            Some(view) => MfaRegistration::Pending(view),
            None => MfaRegistration::Registered,
        })
    }

    /// Removes a registration.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - The user has not registered the method
    pub async fn unregister(&self, user_id: i32, method: &str) -> Result<(), AppError> {
        let method = self.method(method)?;

        let deleted = UserMfaRepository::new(self.db)
            .delete(user_id, method.name())
            .await?;
        if !deleted {
            return Err(AppError::NotFound(format!(
                "{} is not registered",
                method.label()
            )));
        }

        tracing::info!("User {} unregistered MFA method {}", user_id, method.name());

        Ok(())
    }

    fn method(&self, name: &str) -> Result<MfaMethod, AppError> {
        MfaMethod::from_name(name)
            .filter(|method| enabled_methods(self.config).contains(method))
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported MFA method '{}'", name)))
    }
}
