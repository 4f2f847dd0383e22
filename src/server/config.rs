//! Environment-based application configuration.
//!
//! `Config::from_env()` starts from the defaults of `Config::default()` and overrides them
//! with environment variables (usually loaded from `.env` by `dotenvy`). Settings of an
//! authentication source are only required when that source is enabled.

use std::{str::FromStr, time::Duration};

use crate::server::{error::config::ConfigError, model::auth::AuthSourceKind};

/// Settings that are never shown in the about box.
const SECRET_SETTINGS: [&str; 3] = [
    "DEFAULT_PASSWORD",
    "LDAP_BIND_PASSWORD",
    "OAUTH2_CLIENT_SECRET",
];

#[derive(Debug, Clone)]
pub struct LdapConfig {
    pub server_uri: String,
    pub bind_user: Option<String>,
    pub bind_password: Option<String>,
    pub anonymous_bind: bool,
    pub base_dn: String,
    /// Search base; falls back to `base_dn`.
    pub search_base_dn: Option<String>,
    pub username_attribute: String,
    pub search_filter: String,
    pub email_attribute: String,
    pub use_starttls: bool,
    pub connection_timeout: Duration,
    pub auto_create_user: bool,
}

#[derive(Debug, Clone)]
pub struct KerberosConfig {
    /// Header set by the fronting web server once SPNEGO negotiation succeeded.
    pub principal_header: String,
    pub keep_realm: bool,
    pub auto_create_user: bool,
}

impl Default for KerberosConfig {
    fn default() -> Self {
        Self {
            principal_header: "X-Remote-User".to_string(),
            keep_realm: false,
            auto_create_user: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OAuth2Config {
    /// Provider name, used as the source friendly name.
    pub name: String,
    pub display_name: String,
    pub client_id: String,
    pub client_secret: String,
    pub authorization_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub redirect_url: String,
    pub scopes: Vec<String>,
    pub auto_create_user: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub app_name: String,
    pub app_url: String,
    pub server_mode: bool,
    pub log_file: Option<String>,
    /// Failed login attempts before an internal account locks; 0 disables the lockout.
    pub max_login_attempts: i32,
    pub authentication_sources: Vec<AuthSourceKind>,
    pub mfa_enabled: bool,
    pub mfa_supported_methods: Vec<String>,
    pub default_email: Option<String>,
    pub default_password: Option<String>,
    /// Default of the `browser.hide_shared_server` preference.
    pub hide_shared_server: bool,
    pub ldap: Option<LdapConfig>,
    pub kerberos: KerberosConfig,
    pub oauth2: Option<OAuth2Config>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://pgconsole.db?mode=rwc".to_string(),
            bind_address: "127.0.0.1:5050".to_string(),
            app_name: "pgconsole".to_string(),
            app_url: "http://127.0.0.1:5050".to_string(),
            server_mode: true,
            log_file: None,
            max_login_attempts: 3,
            authentication_sources: vec![AuthSourceKind::Internal],
            mfa_enabled: false,
            mfa_supported_methods: vec!["authenticator".to_string()],
            default_email: None,
            default_password: None,
            hide_shared_server: false,
            ldap: None,
            kerberos: KerberosConfig::default(),
            oauth2: None,
        }
    }
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn required(key: &str) -> Result<String, ConfigError> {
    optional(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Parses a boolean setting value (`true/false`, `1/0`, `yes/no`, `on/off`).
pub fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

/// Parses a comma separated list of authentication sources, keeping order and dropping
/// duplicates.
pub fn parse_auth_sources(key: &str, value: &str) -> Result<Vec<AuthSourceKind>, ConfigError> {
    let mut sources = Vec::new();
    for name in value.split(',').filter(|name| !name.trim().is_empty()) {
        let source = AuthSourceKind::from_str(name).map_err(|name| invalid(key, &name))?;
        if !sources.contains(&source) {
            sources.push(source);
        }
    }

    if sources.is_empty() {
        return Err(invalid(key, value));
    }

    Ok(sources)
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split([',', ' '])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn bool_or(key: &str, default: bool) -> Result<bool, ConfigError> {
    match optional(key) {
        Some(value) => parse_bool(key, &value),
        None => Ok(default),
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match optional(key) {
        Some(value) => value.trim().parse().map_err(|_| invalid(key, &value)),
        None => Ok(default),
    }
}

impl LdapConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server_uri: required("LDAP_SERVER_URI")?,
            bind_user: optional("LDAP_BIND_USER"),
            bind_password: optional("LDAP_BIND_PASSWORD"),
            anonymous_bind: bool_or("LDAP_ANONYMOUS_BIND", false)?,
            base_dn: required("LDAP_BASE_DN")?,
            search_base_dn: optional("LDAP_SEARCH_BASE_DN"),
            username_attribute: optional("LDAP_USERNAME_ATTRIBUTE")
                .unwrap_or_else(|| "uid".to_string()),
            search_filter: optional("LDAP_SEARCH_FILTER")
                .unwrap_or_else(|| "(objectclass=*)".to_string()),
            email_attribute: optional("LDAP_EMAIL_ATTRIBUTE")
                .unwrap_or_else(|| "mail".to_string()),
            use_starttls: bool_or("LDAP_USE_STARTTLS", false)?,
            connection_timeout: Duration::from_secs(parse_or("LDAP_CONNECTION_TIMEOUT", 10)?),
            auto_create_user: bool_or("LDAP_AUTO_CREATE_USER", true)?,
        })
    }
}

impl KerberosConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            principal_header: optional("KERBEROS_PRINCIPAL_HEADER")
                .unwrap_or(defaults.principal_header),
            keep_realm: bool_or("KERBEROS_KEEP_REALM", defaults.keep_realm)?,
            auto_create_user: bool_or("KERBEROS_AUTO_CREATE_USER", defaults.auto_create_user)?,
        })
    }
}

impl OAuth2Config {
    fn from_env(app_url: &str) -> Result<Self, ConfigError> {
        let name = optional("OAUTH2_NAME").unwrap_or_else(|| "oauth2".to_string());
        Ok(Self {
            display_name: optional("OAUTH2_DISPLAY_NAME").unwrap_or_else(|| name.clone()),
            name,
            client_id: required("OAUTH2_CLIENT_ID")?,
            client_secret: required("OAUTH2_CLIENT_SECRET")?,
            authorization_url: required("OAUTH2_AUTHORIZATION_URL")?,
            token_url: required("OAUTH2_TOKEN_URL")?,
            userinfo_url: required("OAUTH2_USERINFO_URL")?,
            redirect_url: optional("OAUTH2_REDIRECT_URL")
                .unwrap_or_else(|| format!("{}/oauth2/authorize", app_url.trim_end_matches('/'))),
            scopes: optional("OAUTH2_SCOPE")
                .map(|value| parse_list(&value))
                .unwrap_or_else(|| vec!["openid".to_string(), "email".to_string(), "profile".to_string()]),
            auto_create_user: bool_or("OAUTH2_AUTO_CREATE_USER", true)?,
        })
    }
}

impl Config {
    /// Reads the configuration from environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - Parsed configuration
    /// - `Err(ConfigError::MissingEnvVar)` - A setting required by an enabled source is missing
    /// - `Err(ConfigError::InvalidValue)` - A setting could not be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let app_url = optional("APP_URL").unwrap_or(defaults.app_url);
        let authentication_sources = match optional("AUTHENTICATION_SOURCES") {
            Some(value) => parse_auth_sources("AUTHENTICATION_SOURCES", &value)?,
            None => defaults.authentication_sources,
        };

        let ldap = if authentication_sources.contains(&AuthSourceKind::Ldap) {
            Some(LdapConfig::from_env()?)
        } else {
            None
        };
        let oauth2 = if authentication_sources.contains(&AuthSourceKind::OAuth2) {
            Some(OAuth2Config::from_env(&app_url)?)
        } else {
            None
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            app_name: optional("APP_NAME").unwrap_or(defaults.app_name),
            app_url,
            server_mode: bool_or("SERVER_MODE", defaults.server_mode)?,
            log_file: optional("LOG_FILE"),
            max_login_attempts: parse_or("MAX_LOGIN_ATTEMPTS", defaults.max_login_attempts)?,
            authentication_sources,
            mfa_enabled: bool_or("MFA_ENABLED", defaults.mfa_enabled)?,
            mfa_supported_methods: optional("MFA_SUPPORTED_METHODS")
                .map(|value| parse_list(&value))
                .unwrap_or(defaults.mfa_supported_methods),
            default_email: optional("DEFAULT_EMAIL"),
            default_password: optional("DEFAULT_PASSWORD"),
            hide_shared_server: bool_or("HIDE_SHARED_SERVER", defaults.hide_shared_server)?,
            ldap,
            kerberos: KerberosConfig::from_env()?,
            oauth2,
        })
    }

    /// Whether lockout after failed attempts is active.
    pub fn lockout_enabled(&self) -> bool {
        self.max_login_attempts > 0
    }

    /// Every setting with its value, secrets included, ordered by key.
    fn settings(&self) -> Vec<(&'static str, SettingValue)> {
        use SettingValue::{Bool, List, Number, Optional, Text};

        let mut settings = vec![
            ("APP_NAME", Text(self.app_name.clone())),
            ("APP_URL", Text(self.app_url.clone())),
            (
                "AUTHENTICATION_SOURCES",
                List(
                    self.authentication_sources
                        .iter()
                        .map(|source| source.as_str().to_string())
                        .collect(),
                ),
            ),
            ("BIND_ADDRESS", Text(self.bind_address.clone())),
            ("DATABASE_URL", Text(self.database_url.clone())),
            ("DEFAULT_EMAIL", Optional(self.default_email.clone())),
            ("DEFAULT_PASSWORD", Optional(self.default_password.clone())),
            ("HIDE_SHARED_SERVER", Bool(self.hide_shared_server)),
            (
                "KERBEROS_AUTO_CREATE_USER",
                Bool(self.kerberos.auto_create_user),
            ),
            ("KERBEROS_KEEP_REALM", Bool(self.kerberos.keep_realm)),
            (
                "KERBEROS_PRINCIPAL_HEADER",
                Text(self.kerberos.principal_header.clone()),
            ),
            ("LOG_FILE", Optional(self.log_file.clone())),
            ("MAX_LOGIN_ATTEMPTS", Number(self.max_login_attempts.into())),
            ("MFA_ENABLED", Bool(self.mfa_enabled)),
            (
                "MFA_SUPPORTED_METHODS",
                List(self.mfa_supported_methods.clone()),
            ),
            ("SERVER_MODE", Bool(self.server_mode)),
        ];

        if let Some(ldap) = &self.ldap {
            settings.extend([
                ("LDAP_ANONYMOUS_BIND", Bool(ldap.anonymous_bind)),
                ("LDAP_AUTO_CREATE_USER", Bool(ldap.auto_create_user)),
                ("LDAP_BASE_DN", Text(ldap.base_dn.clone())),
                ("LDAP_BIND_PASSWORD", Optional(ldap.bind_password.clone())),
                ("LDAP_BIND_USER", Optional(ldap.bind_user.clone())),
                (
                    "LDAP_CONNECTION_TIMEOUT",
                    Number(ldap.connection_timeout.as_secs() as i64),
                ),
                ("LDAP_EMAIL_ATTRIBUTE", Text(ldap.email_attribute.clone())),
                ("LDAP_SEARCH_BASE_DN", Optional(ldap.search_base_dn.clone())),
                ("LDAP_SEARCH_FILTER", Text(ldap.search_filter.clone())),
                ("LDAP_SERVER_URI", Text(ldap.server_uri.clone())),
                ("LDAP_USE_STARTTLS", Bool(ldap.use_starttls)),
                (
                    "LDAP_USERNAME_ATTRIBUTE",
                    Text(ldap.username_attribute.clone()),
                ),
            ]);
        }

        if let Some(oauth2) = &self.oauth2 {
            settings.extend([
                (
                    "OAUTH2_AUTHORIZATION_URL",
                    Text(oauth2.authorization_url.clone()),
                ),
                ("OAUTH2_AUTO_CREATE_USER", Bool(oauth2.auto_create_user)),
                ("OAUTH2_CLIENT_ID", Text(oauth2.client_id.clone())),
                ("OAUTH2_CLIENT_SECRET", Text(oauth2.client_secret.clone())),
                ("OAUTH2_DISPLAY_NAME", Text(oauth2.display_name.clone())),
                ("OAUTH2_NAME", Text(oauth2.name.clone())),
                ("OAUTH2_REDIRECT_URL", Text(oauth2.redirect_url.clone())),
                ("OAUTH2_SCOPE", List(oauth2.scopes.clone())),
                ("OAUTH2_TOKEN_URL", Text(oauth2.token_url.clone())),
                ("OAUTH2_USERINFO_URL", Text(oauth2.userinfo_url.clone())),
            ]);
        }

        settings.sort_by_key(|(key, _)| *key);
        settings
    }

    /// `KEY = value` lines of all non-secret settings, ordered by key.
    ///
    /// String values are double quoted, other values are written bare.
    pub fn settings_dump(&self) -> String {
        self.settings()
            .into_iter()
            .filter(|(key, _)| !SECRET_SETTINGS.contains(key))
            .map(|(key, value)| format!("{} = {}\n", key, value.render()))
            .collect()
    }
}

enum SettingValue {
    Text(String),
    Optional(Option<String>),
    Bool(bool),
    Number(i64),
    List(Vec<String>),
}

impl SettingValue {
    fn render(&self) -> String {
        match self {
            Self::Text(value) | Self::Optional(Some(value)) => format!("\"{}\"", value),
            Self::Optional(None) => "None".to_string(),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::Number(value) => value.to_string(),
            Self::List(items) => format!(
                "[{}]",
                items
                    .iter()
                    .map(|item| format!("'{}'", item))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}
