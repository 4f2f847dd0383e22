//! HTTP handlers.
//!
//! Handlers resolve the user through `AuthGuard`, call a service and wrap the result in
//! the JSON envelope. Login-related handlers answer with redirects like the login page
//! expects.

pub mod about;
pub mod authenticate;
pub mod browser;
pub mod kerberos;
pub mod mfa;
pub mod oauth2;
pub mod preference;
pub mod server;
pub mod server_group;

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::server::{
    service::auth::{login::LoginResponse, AuthContext},
    state::AppState,
    util::response::JsonResponse,
};

const NEGOTIATE_REQUIRED: &str = "Kerberos authentication required.";

/// Authentication context of a request.
///
/// The Kerberos principal is read from the header the fronting web server sets after a
/// successful negotiation.
fn auth_context<'a>(state: &'a AppState, headers: &'a HeaderMap) -> AuthContext<'a> {
    let kerberos_principal = headers
        .get(state.config.kerberos.principal_header.as_str())
        .and_then(|value| value.to_str().ok());

    AuthContext {
        db: &state.db,
        config: state.config.as_ref(),
        http_client: &state.http_client,
        oauth_client: state.oauth_client.as_ref(),
        kerberos_principal,
    }
}

/// Turns a login flow result into the HTTP response.
///
/// A Kerberos challenge is a 401 carrying `WWW-Authenticate: Negotiate`.
fn login_response(response: LoginResponse) -> Response {
    match response {
        LoginResponse::Redirect(url) | LoginResponse::ProviderRedirect(url) => {
            Redirect::to(&url).into_response()
        }
        LoginResponse::Challenge => (
            [(header::WWW_AUTHENTICATE, "Negotiate")],
            JsonResponse::error(StatusCode::UNAUTHORIZED, NEGOTIATE_REQUIRED),
        )
            .into_response(),
    }
}
