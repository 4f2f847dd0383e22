use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::util::response::JsonResponse;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id stored in the session.
    #[error("User not found in session")]
    UserNotInSession,

    /// The session references a user that no longer exists.
    #[error("User {0} not found in database")]
    UserNotInDatabase(i32),

    /// The user account has been deactivated or locked.
    #[error("User {0} is inactive or locked")]
    UserInactive(i32),

    /// User lacks a required permission.
    ///
    /// # Fields
    /// - User id
    /// - Reason, logged only
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Logged in but the second factor has not been validated yet.
    #[error("User {0} has not completed multi-factor authentication")]
    MfaPending(i32),

    /// The OAuth2 `state` returned by the provider does not match the session.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// OAuth2 is not among the configured authentication sources.
    #[error("OAuth2 authentication is not configured")]
    OAuth2NotConfigured,

    /// Token exchange with the OAuth2 provider failed.
    #[error("Failed to exchange OAuth2 authorization code: {0}")]
    OAuth2TokenExchange(String),

    /// Current password supplied to the password change did not match.
    #[error("Invalid password")]
    InvalidPassword,

    /// Password change attempted for a user managed by an external source.
    #[error("User {0} is not an internal user")]
    NotInternalUser(i32),
}

/// Maps authentication errors to status codes with client-safe messages.
///
/// - 400 for CSRF failures, OAuth2 misconfiguration and rejected password changes
/// - 401 when there is no usable login (missing, unknown, inactive user or pending MFA)
/// - 403 for missing permissions
/// - 500 for token exchange failures
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) | Self::UserInactive(_) => {
                (StatusCode::UNAUTHORIZED, "Authentication required.")
            }
            Self::MfaPending(_) => (
                StatusCode::UNAUTHORIZED,
                "Multi-factor authentication required.",
            ),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this operation.",
            ),
            Self::CsrfValidationFailed => (
                StatusCode::BAD_REQUEST,
                "There was an issue logging you in, please try again.",
            ),
            Self::OAuth2NotConfigured => (
                StatusCode::BAD_REQUEST,
                "OAuth2 authentication is not configured.",
            ),
            Self::InvalidPassword => (StatusCode::BAD_REQUEST, "Invalid password"),
            Self::NotInternalUser(_) => (
                StatusCode::BAD_REQUEST,
                "Password can only be changed for internal users.",
            ),
            Self::OAuth2TokenExchange(ref reason) => {
                tracing::error!("OAuth2 token exchange failed: {}", reason);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        JsonResponse::error(status, message).into_response()
    }
}
