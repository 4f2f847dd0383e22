//! Authentication sources and the login flow built on top of them.
//!
//! Each source (`internal`, `ldap`, `kerberos`, `oauth2`) validates the login form,
//! authenticates the identity it carries and logs the matching catalog user in.
//! [`manager::AuthSourceManager`] tries the configured sources in order and
//! [`login::LoginService`] drives the full login handler around it.

pub mod internal;
pub mod kerberos;
pub mod ldap;
pub mod login;
pub mod manager;
pub mod oauth2;


use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::AppError,
    model::{
        auth::AuthSourceKind,
        user::{User, ROLE_USER},
    },
    service::user::UserService,
    state::OAuth2Client,
};

/// Everything a source needs to reach its backend.
pub struct AuthContext<'a> {
    pub db: &'a DatabaseConnection,
    pub config: &'a Config,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: Option<&'a OAuth2Client>,
    /// Principal negotiated by the fronting web server, if any.
    pub kerberos_principal: Option<&'a str>,
}

/// Errors attached to login form fields, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    fields: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    /// Records `message` for `field`, ignoring repeats.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();

        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, messages)) => {
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
            None => self.fields.push((field.to_string(), vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

/// Result of validating the login form against one source.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid,
    /// Optionally carries a message to show besides the field errors.
    Invalid(Option<String>),
}

/// Login form validation failure across all sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationFailure {
    pub field_errors: FieldErrors,
    /// Message of the last source tried.
    pub message: Option<String>,
}

/// Identity established by a source.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub username: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Authenticated(Identity),
    Failed(String),
    /// The browser must visit the identity provider first.
    Redirect { url: String, csrf_state: String },
    /// The client must negotiate Kerberos credentials first.
    Challenge,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// The user is logged in; `crypt_material` derives the saved-password key.
    LoggedIn { user: User, crypt_material: String },
    Failed(String),
}

const ACCOUNT_DISABLED: &str = "Account is disabled";

/// Finds the catalog user for an identity established by `source`, creating it when
/// `auto_create` is set.
///
/// # Arguments
/// - `crypt_material` - Key material for the saved-password key; the user's
///   `fs_uniquifier` when `None`
pub(crate) async fn resolve_user(
    ctx: &AuthContext<'_>,
    identity: &Identity,
    source: AuthSourceKind,
    auto_create: bool,
    crypt_material: Option<&str>,
) -> Result<LoginOutcome, AppError> {
    let existing = UserRepository::new(ctx.db)
        .find_by_username_and_source(&identity.username, source)
        .await?;

    let user = match existing {
        Some(user) => user,
        None if auto_create => {
            UserService::new(ctx.db)
                .create_external_user(
                    &identity.username,
                    identity.email.clone(),
                    source,
                    ROLE_USER,
                )
                .await?
        }
        None => {
            return Ok(LoginOutcome::Failed(format!(
                "The specified user ID ({}) could not be found.",
                identity.username
            )))
        }
    };

    if !user.active {
        return Ok(LoginOutcome::Failed(ACCOUNT_DISABLED.to_string()));
    }

    let crypt_material = crypt_material
        .map(str::to_string)
        .unwrap_or_else(|| user.fs_uniquifier.clone());

    Ok(LoginOutcome::LoggedIn {
        user,
        crypt_material,
    })
}

/// Returns the trimmed form value, `None` when missing or blank.
pub(crate) fn form_value(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
