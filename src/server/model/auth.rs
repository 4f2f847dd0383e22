//! Authentication source identifiers and the session-persisted manager state.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::model::auth::{AuthSourceStateDto, FlashMessageDto};

/// An identity backend users can log in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthSourceKind {
    Internal,
    Ldap,
    Kerberos,
    OAuth2,
}

impl AuthSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Ldap => "ldap",
            Self::Kerberos => "kerberos",
            Self::OAuth2 => "oauth2",
        }
    }

    /// Sources that authenticate without a password typed into the login form.
    pub fn is_passwordless(&self) -> bool {
        matches!(self, Self::Kerberos | Self::OAuth2)
    }
}

impl fmt::Display for AuthSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthSourceKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "internal" => Ok(Self::Internal),
            "ldap" => Ok(Self::Ldap),
            "kerberos" => Ok(Self::Kerberos),
            "oauth2" => Ok(Self::OAuth2),
            other => Err(other.to_string()),
        }
    }
}

/// Outcome of a login attempt as remembered in the session (`auth_source_manager`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSourceState {
    pub source_friendly_name: String,
    pub auth_sources: Vec<AuthSourceKind>,
    pub current_source: AuthSourceKind,
}

impl AuthSourceState {
    pub fn into_dto(self) -> AuthSourceStateDto {
        AuthSourceStateDto {
            source_friendly_name: self.source_friendly_name,
            auth_sources: self
                .auth_sources
                .iter()
                .map(|source| source.as_str().to_string())
                .collect(),
            current_source: self.current_source.as_str().to_string(),
        }
    }
}

/// Category of a flashed message, used by the login page for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Warning,
    Danger,
}

impl FlashCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub category: FlashCategory,
    pub message: String,
}

impl FlashMessage {
    pub fn into_dto(self) -> FlashMessageDto {
        FlashMessageDto {
            category: self.category.as_str().to_string(),
            message: self.message,
        }
    }
}
