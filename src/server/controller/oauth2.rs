use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::JsonEnvelope,
        auth::{NextParams, OAuth2CallbackParams},
    },
    server::{
        controller::{auth_context, login_response},
        error::AppError,
        service::auth::login::LoginService,
        state::AppState,
    },
};

pub static OAUTH2_TAG: &str = "oauth2";

/// Redirect target of the OAuth2 provider.
///
/// Validates the CSRF `state`, exchanges the authorization `code` and logs the user in.
///
/// # Returns
/// - `303 See Other` - Redirect to the browser, the MFA page or the login page
/// - `400 Bad Request` - CSRF state mismatch
/// - `500 Internal Server Error` - Token exchange or userinfo request failed
#[utoipa::path(
    get,
    path = "/oauth2/authorize",
    tag = OAUTH2_TAG,
    params(
        ("state" = String, Query, description = "CSRF state issued at login"),
        ("code" = String, Query, description = "Authorization code")
    ),
    responses(
        (status = 303, description = "Redirect after login"),
        (status = 400, description = "CSRF state mismatch", body = JsonEnvelope),
        (status = 500, description = "Internal server error", body = JsonEnvelope)
    ),
)]
pub async fn authorize(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(params): Query<OAuth2CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = auth_context(&state, &headers);

    let response = LoginService::new(&ctx, &session)
        .oauth2_callback(&params.state, params.code)
        .await?;

    Ok(login_response(response))
}

#[utoipa::path(
    get,
    path = "/oauth2/logout",
    tag = OAUTH2_TAG,
    params(("next" = Option<String>, Query, description = "Local path to continue to")),
    responses(
        (status = 303, description = "Redirect to `next` or the login page")
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(params): Query<NextParams>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = auth_context(&state, &headers);

    let response = LoginService::new(&ctx, &session)
        .logout(params.next.as_deref())
        .await?;

    Ok(login_response(response))
}
