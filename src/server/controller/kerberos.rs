use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::{
    model::{api::JsonEnvelope, auth::NextParams},
    server::{
        controller::{auth_context, login_response},
        error::AppError,
        service::auth::login::LoginService,
        state::AppState,
    },
};

pub static KERBEROS_TAG: &str = "kerberos";

/// Log in with the Kerberos principal negotiated by the web server.
///
/// Without a principal the client is asked to negotiate.
#[utoipa::path(
    get,
    path = "/kerberos/login",
    tag = KERBEROS_TAG,
    responses(
        (status = 303, description = "Redirect to the browser or the login page"),
        (status = 401, description = "Kerberos negotiation required", body = JsonEnvelope),
        (status = 404, description = "Kerberos is not an enabled authentication source", body = JsonEnvelope)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let ctx = auth_context(&state, &headers);

    let response = LoginService::new(&ctx, &session).kerberos_login().await?;

    Ok(login_response(response))
}

#[utoipa::path(
    get,
    path = "/kerberos/logout",
    tag = KERBEROS_TAG,
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
