use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
    Form, Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::JsonEnvelope,
        auth::{ChangePasswordDto, FlashMessageDto, LoginForm, LogoutUrlDto, NextParams},
    },
    server::{
        controller::{auth_context, login_response},
        error::AppError,
        middleware::{
            auth::AuthGuard,
            session::{AuthSession, FlashSession},
        },
        service::{
            auth::login::{get_logout_url, LoginService},
            user::UserService,
        },
        state::AppState,
        util::{crypto::derive_key, response::JsonResponse},
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTHENTICATE_TAG: &str = "authenticate";

/// Log in with the posted login form.
///
/// Runs the configured authentication sources. The outcome is always a redirect: to the
/// browser (or the MFA validation page) on success, back to the login page with flashed
/// messages on failure, or to the OAuth2 provider. Kerberos asks the client to negotiate
/// with a 401 `WWW-Authenticate: Negotiate` response.
///
/// # Returns
/// - `303 See Other` - Redirect to the next page
/// - `401 Unauthorized` - Kerberos negotiation required
/// - `500 Internal Server Error` - Database or session error
#[utoipa::path(
    post,
    path = "/authenticate/login",
    tag = AUTHENTICATE_TAG,
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the browser, the login page or the identity provider"),
        (status = 401, description = "Kerberos negotiation required", body = JsonEnvelope),
        (status = 500, description = "Internal server error", body = JsonEnvelope)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = auth_context(&state, &headers);

    let response = LoginService::new(&ctx, &session).login(&form).await?;

    Ok(login_response(response))
}

/// Drain the flashed messages.
///
/// # Returns
/// - `200 OK` - Messages in the order they were flashed
#[utoipa::path(
    get,
    path = "/authenticate/messages",
    tag = AUTHENTICATE_TAG,
    responses(
        (status = 200, description = "Flashed messages", body = Vec<FlashMessageDto>),
        (status = 500, description = "Internal server error", body = JsonEnvelope)
    ),
)]
pub async fn messages(session: Session) -> Result<impl IntoResponse, AppError> {
    let messages: Vec<FlashMessageDto> = FlashSession::new(&session)
        .take_all()
        .await?
        .into_iter()
        .map(|message| message.into_dto())
        .collect();

    Ok(JsonResponse::success().with_data(messages))
}

/// Logout URL for the source the user logged in with.
///
/// # Access Control
/// Requires a logged-in user.
#[utoipa::path(
    get,
    path = "/authenticate/logout-url",
    tag = AUTHENTICATE_TAG,
    responses(
        (status = 200, description = "Logout URL", body = LogoutUrlDto),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn logout_url(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session).require(&[]).await?;

    let auth_state = AuthSession::new(&session).get_auth_state().await?;
    let logout_url = get_logout_url(auth_state.as_ref(), state.config.server_mode);

    Ok(JsonResponse::success().with_data(LogoutUrlDto { logout_url }))
}

/// Log out and redirect to `next` when it is a local path.
#[utoipa::path(
    get,
    path = "/logout",
    tag = AUTHENTICATE_TAG,
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

/// Change the password of the logged-in internal user.
///
/// Saved server passwords are re-encrypted and the session switches to the new key.
///
/// # Returns
/// - `200 OK` - Password changed
/// - `400 Bad Request` - Wrong current password, mismatch, too short, or external user
/// - `401 Unauthorized` - User not authenticated
#[utoipa::path(
    post,
    path = "/change_password",
    tag = AUTHENTICATE_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = JsonEnvelope),
        (status = 400, description = "Password change rejected", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let current_key = derive_key(&payload.password);
    let new_key = UserService::new(&state.db)
        .change_password(
            &user,
            &payload.password,
            &payload.new_password,
            &payload.new_password_confirm,
            &current_key,
        )
        .await?;

    AuthSession::new(&session).set_crypt_key(&new_key).await?;

    Ok(JsonResponse::success().with_info("Password changed successfully."))
}

/// Redirect bare visits of the login endpoint to the login page.
pub async fn login_page() -> impl IntoResponse {
    Redirect::to("/login")
}
