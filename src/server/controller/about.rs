use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::{
    model::{about::AboutDto, api::JsonEnvelope},
    server::{
        error::AppError, middleware::auth::AuthGuard, service::about::AboutService,
        state::AppState, util::response::JsonResponse,
    },
};

pub static ABOUT_TAG: &str = "about";

/// Details of the running console for the about box.
///
/// # Access Control
/// Requires a logged-in user. `admin` is only reported in server mode.
#[utoipa::path(
    get,
    path = "/about/",
    tag = ABOUT_TAG,
    responses(
        (status = 200, description = "About details", body = AboutDto),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let about =
        AboutService::new(&state.config, &state.user_agent_parser).index(&user, user_agent);

    Ok(JsonResponse::success().with_data(about))
}
