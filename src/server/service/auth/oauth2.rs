//! Users authenticated by an OAuth2 identity provider.
//!
//! `authenticate` sends the browser to the provider; the provider redirects back to
//! `/oauth2/authorize` where [`OAuth2AuthSource::exchange`] turns the authorization code
//! into an identity read from the userinfo endpoint.

use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use serde_json::Value;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::auth::AuthSourceKind,
    service::auth::{resolve_user, AuthContext, AuthOutcome, Identity, LoginOutcome},
};

const NOT_CONFIGURED: &str = "OAuth2 authentication is not configured.";
const MISSING_IDENTITY: &str =
    "An email address or preferred username is required for OAuth2 login.";

pub struct OAuth2AuthSource<'a> {
    ctx: &'a AuthContext<'a>,
}

impl<'a> OAuth2AuthSource<'a> {
    pub fn new(ctx: &'a AuthContext<'a>) -> Self {
        Self { ctx }
    }

    /// Builds the provider authorization URL with a fresh CSRF state.
    pub fn authenticate(&self) -> AuthOutcome {
        let (Some(client), Some(config)) = (self.ctx.oauth_client, self.ctx.config.oauth2.as_ref())
        else {
            return AuthOutcome::Failed(NOT_CONFIGURED.to_string());
        };

        let (url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(config.scopes.iter().cloned().map(Scope::new))
            .url();

        AuthOutcome::Redirect {
            url: url.to_string(),
            csrf_state: csrf_state.secret().to_string(),
        }
    }

    /// Exchanges an authorization code and reads the user's identity.
    ///
    /// # Returns
    /// - `Ok(Ok(Identity))` - Identity from the userinfo endpoint
    /// - `Ok(Err(message))` - The profile carries neither email nor preferred username
    /// - `Err(AuthError::OAuth2NotConfigured)` - OAuth2 is not enabled
    /// - `Err(AuthError::OAuth2TokenExchange)` - Token endpoint rejected the code
    pub async fn exchange(&self, code: String) -> Result<Result<Identity, String>, AppError> {
        let (Some(client), Some(config)) = (self.ctx.oauth_client, self.ctx.config.oauth2.as_ref())
        else {
            return Err(AuthError::OAuth2NotConfigured.into());
        };

        let token = client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(self.ctx.http_client)
            .await
            .map_err(|e| AuthError::OAuth2TokenExchange(e.to_string()))?;

        let profile = self
            .ctx
            .http_client
            .get(&config.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(identity_from_profile(&profile).ok_or_else(|| MISSING_IDENTITY.to_string()))
    }

    pub async fn login(&self, identity: &Identity) -> Result<LoginOutcome, AppError> {
        let auto_create = self
            .ctx
            .config
            .oauth2
            .as_ref()
            .map(|config| config.auto_create_user)
            .unwrap_or(false);

        resolve_user(self.ctx, identity, AuthSourceKind::OAuth2, auto_create, None).await
    }
}

/// Identity from a userinfo profile: the email, else the preferred username.
pub fn identity_from_profile(profile: &Value) -> Option<Identity> {
    let field = |name: &str| {
        profile
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let email = field("email");
    let username = email.clone().or_else(|| field("preferred_username"))?;

    Some(Identity { username, email })
}
