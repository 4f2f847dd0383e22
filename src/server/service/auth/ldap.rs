//! Users authenticated against an LDAP directory.
//!
//! The source binds with the dedicated bind user (or anonymously), looks the user up
//! under the search base and finally binds as the found entry with the form password.
//! Without a bind user and anonymous bind disabled, the user binds directly as
//! `<username attribute>=<username>,<base dn>`.

use ldap3::{ldap_escape, Ldap, LdapConnAsync, LdapConnSettings, Scope, SearchEntry};

use crate::{
    model::auth::LoginForm,
    server::{
        config::LdapConfig,
        error::AppError,
        model::auth::AuthSourceKind,
        service::auth::{
            form_value, resolve_user, AuthContext, AuthOutcome, FieldErrors, Identity,
            LoginOutcome, Validation,
        },
    },
};

const USERNAME_NOT_PROVIDED: &str = "Email/Username not provided";
const PASSWORD_NOT_PROVIDED: &str = "Password not provided";
const NOT_CONFIGURED: &str = "LDAP authentication is not configured.";
const CONNECTION_FAILED: &str = "Error connecting to the LDAP server.";
const BIND_FAILED: &str = "Failed binding to the LDAP server.";
const INVALID_CREDENTIALS: &str = "Invalid username or password.";

pub struct LdapAuthSource<'a> {
    ctx: &'a AuthContext<'a>,
}

impl<'a> LdapAuthSource<'a> {
    pub fn new(ctx: &'a AuthContext<'a>) -> Self {
        Self { ctx }
    }

    /// Only checks that username and password are present.
    pub fn validate(&self, form: &LoginForm, errors: &mut FieldErrors) -> Validation {
        if form_value(&form.email).is_none() {
            errors.add("email", USERNAME_NOT_PROVIDED);
            return Validation::Invalid(None);
        }
        if form.password.as_deref().unwrap_or_default().is_empty() {
            errors.add("password", PASSWORD_NOT_PROVIDED);
            return Validation::Invalid(None);
        }

        Validation::Valid
    }

    pub async fn authenticate(&self, form: &LoginForm) -> Result<AuthOutcome, AppError> {
        let Some(config) = self.ctx.config.ldap.as_ref() else {
            return Ok(AuthOutcome::Failed(NOT_CONFIGURED.to_string()));
        };
        let (Some(username), Some(password)) = (form_value(&form.email), form.password.as_deref())
        else {
            return Ok(AuthOutcome::Failed(INVALID_CREDENTIALS.to_string()));
        };

        let settings = LdapConnSettings::new()
            .set_conn_timeout(config.connection_timeout)
            .set_starttls(config.use_starttls);
        let mut ldap = match LdapConnAsync::with_settings(settings, &config.server_uri).await {
            Ok((conn, ldap)) => {
                ldap3::drive!(conn);
                ldap
            }
            Err(err) => {
                tracing::error!("Failed to connect to LDAP server {}: {}", config.server_uri, err);
                return Ok(AuthOutcome::Failed(CONNECTION_FAILED.to_string()));
            }
        };

        let outcome = self
            .authenticate_with(&mut ldap, config, username, password)
            .await;
        let _ = ldap.unbind().await;

        outcome
    }

    pub async fn login(&self, identity: &Identity, form: &LoginForm) -> Result<LoginOutcome, AppError> {
        let auto_create = self
            .ctx
            .config
            .ldap
            .as_ref()
            .map(|config| config.auto_create_user)
            .unwrap_or(false);

        resolve_user(
            self.ctx,
            identity,
            AuthSourceKind::Ldap,
            auto_create,
            Some(form.password.as_deref().unwrap_or_default()),
        )
        .await
    }

    async fn authenticate_with(
        &self,
        ldap: &mut Ldap,
        config: &LdapConfig,
        username: &str,
        password: &str,
    ) -> Result<AuthOutcome, AppError> {
        let direct_bind = !config.anonymous_bind
            && (config.bind_user.is_none() || config.bind_password.is_none());

        let bound = match (&config.bind_user, &config.bind_password) {
            (Some(bind_user), Some(bind_password)) if !config.anonymous_bind => {
                ldap.simple_bind(bind_user, bind_password).await?.success()
            }
            _ if config.anonymous_bind => ldap.simple_bind("", "").await?.success(),
            _ => {
                ldap.simple_bind(&direct_bind_dn(config, username), password)
                    .await?
                    .success()
            }
        };
        if let Err(err) = bound {
            tracing::info!("LDAP bind failed for {}: {}", username, err);
            let message = if direct_bind {
                INVALID_CREDENTIALS
            } else {
                BIND_FAILED
            };
            return Ok(AuthOutcome::Failed(message.to_string()));
        }

        let base = config.search_base_dn.as_deref().unwrap_or(&config.base_dn);
        let (entries, _) = ldap
            .search(
                base,
                Scope::Subtree,
                &search_filter(config, username),
                vec![config.username_attribute.as_str(), config.email_attribute.as_str()],
            )
            .await?
            .success()?;

        let Some(entry) = entries.into_iter().next().map(SearchEntry::construct) else {
            tracing::info!("LDAP search found no entry for {}", username);
            return Ok(AuthOutcome::Failed(INVALID_CREDENTIALS.to_string()));
        };

        if !direct_bind {
            let user_bind = ldap.simple_bind(&entry.dn, password).await?.success();
            if user_bind.is_err() {
                return Ok(AuthOutcome::Failed(INVALID_CREDENTIALS.to_string()));
            }
        }

        let email = entry
            .attrs
            .get(&config.email_attribute)
            .and_then(|values| values.first())
            .cloned();

        Ok(AuthOutcome::Authenticated(Identity {
            username: username.to_string(),
            email,
        }))
    }
}

/// Filter finding `username` below the search base.
pub fn search_filter(config: &LdapConfig, username: &str) -> String {
    format!(
        "(&({}={}){})",
        config.username_attribute,
        ldap_escape(username),
        config.search_filter
    )
}

fn direct_bind_dn(config: &LdapConfig, username: &str) -> String {
    format!(
        "{}={},{}",
        config.username_attribute,
        ldap3::dn_escape(username),
        config.base_dn
    )
}
