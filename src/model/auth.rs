use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login form as posted by the login page.
///
/// The presence of `internal_button` or `oauth2_button` selects which group of
/// authentication sources is tried.
#[derive(Deserialize, Debug, Clone, Default, ToSchema)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub internal_button: Option<String>,
    pub oauth2_button: Option<String>,
}

/// Serialized state of the authentication source manager kept in the session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AuthSourceStateDto {
    pub source_friendly_name: String,
    pub auth_sources: Vec<String>,
    pub current_source: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct FlashMessageDto {
    pub category: String,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct LogoutUrlDto {
    pub logout_url: String,
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct ChangePasswordDto {
    pub password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NextParams {
    pub next: Option<String>,
}

/// Query parameters of the OAuth2 redirect back from the provider.
#[derive(Deserialize, Debug, Clone)]
pub struct OAuth2CallbackParams {
    pub state: String,
    pub code: String,
}
