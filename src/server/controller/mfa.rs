use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::JsonEnvelope,
        mfa::{
            MfaMethodDto, MfaRegisterForm, MfaRegistrationViewDto, MfaValidateForm,
            MfaValidationViewDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::{
            auth::login::POST_LOGIN_REDIRECT,
            mfa::{MfaRegistration, MfaService},
        },
        state::AppState,
        util::response::JsonResponse,
    },
};

pub static MFA_TAG: &str = "mfa";

/// List the enabled MFA methods and whether the user registered them.
///
/// # Access Control
/// Requires a logged-in user who passed the second factor.
#[utoipa::path(
    get,
    path = "/mfa/",
    tag = MFA_TAG,
    responses(
        (status = 200, description = "Enabled methods", body = Vec<MfaMethodDto>),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn list_methods(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let methods = MfaService::new(&state.db, &state.config, &session)
        .list(user.id)
        .await?;

    Ok(JsonResponse::success().with_data(methods))
}

/// Validation views of the methods the user registered.
///
/// # Access Control
/// Requires a logged-in user; the second factor may still be pending.
#[utoipa::path(
    get,
    path = "/mfa/validate",
    tag = MFA_TAG,
    responses(
        (status = 200, description = "Validation views", body = Vec<MfaValidationViewDto>),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn validation_views(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require_session_user()
        .await?;

    let views = MfaService::new(&state.db, &state.config, &session)
        .validation_views(user.id)
        .await?;

    Ok(JsonResponse::success().with_data(views))
}

/// Submit the second factor.
///
/// # Returns
/// - `303 See Other` - Code accepted, redirect to the browser
/// - `400 Bad Request` - Unknown method or rejected code
/// - `401 Unauthorized` - User not authenticated
#[utoipa::path(
    post,
    path = "/mfa/validate",
    tag = MFA_TAG,
    request_body(content = MfaValidateForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Second factor accepted"),
        (status = 400, description = "Code rejected", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn validate(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<MfaValidateForm>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session)
        .require_session_user()
        .await?;

    MfaService::new(&state.db, &state.config, &session)
        .validate(user.id, &form.mfa_method, &form.code)
        .await?;

    Ok(Redirect::to(POST_LOGIN_REDIRECT))
}

/// Start or finish the registration of a method.
///
/// Without `VALIDATE` the registration view with a fresh secret is returned. With it the
/// code is verified; the view is returned again when it is rejected.
#[utoipa::path(
    get,
    path = "/mfa/register/{method}",
    tag = MFA_TAG,
    params(("method" = String, Path, description = "MFA method name")),
    responses(
        (status = 200, description = "Registration view", body = MfaRegistrationViewDto),
        (status = 400, description = "Unsupported method", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn registration_view(
    State(state): State<AppState>,
    session: Session,
    Path(method): Path<String>,
) -> Result<Response, AppError> {
    register_step(&state, &session, &method, &MfaRegisterForm::default()).await
}

#[utoipa::path(
    post,
    path = "/mfa/register/{method}",
    tag = MFA_TAG,
    params(("method" = String, Path, description = "MFA method name")),
    request_body(content = MfaRegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Registration view, code rejected", body = MfaRegistrationViewDto),
        (status = 303, description = "Method registered"),
        (status = 400, description = "Unsupported method", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Path(method): Path<String>,
    Form(form): Form<MfaRegisterForm>,
) -> Result<Response, AppError> {
    register_step(&state, &session, &method, &form).await
}

async fn register_step(
    state: &AppState,
    session: &Session,
    method: &str,
    form: &MfaRegisterForm,
) -> Result<Response, AppError> {
    let user = AuthGuard::new(&state.db, session).require(&[]).await?;

    let registration = MfaService::new(&state.db, &state.config, session)
        .register(&user, method, form)
        .await?;

    Ok(match registration {
        MfaRegistration::Pending(view) => JsonResponse::success().with_data(view).into_response(),
        MfaRegistration::Registered => Redirect::to("/mfa/").into_response(),
    })
}

/// Remove a registered method.
#[utoipa::path(
    delete,
    path = "/mfa/{method}",
    tag = MFA_TAG,
    params(("method" = String, Path, description = "MFA method name")),
    responses(
        (status = 200, description = "Method removed", body = JsonEnvelope),
        (status = 404, description = "Method not registered", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn unregister(
    State(state): State<AppState>,
    session: Session,
    Path(method): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    MfaService::new(&state.db, &state.config, &session)
        .unregister(user.id, &method)
        .await?;

    Ok(JsonResponse::success())
}
