use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::JsonEnvelope,
        preference::{PreferenceDto, PreferenceValueDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, service::preference::PreferenceService,
        state::AppState, util::response::JsonResponse,
    },
};

pub static PREFERENCE_TAG: &str = "preference";

/// Get the user's value of a preference.
///
/// # Returns
/// - `200 OK` - Stored value or the configured default
/// - `404 Not Found` - Unknown preference
#[utoipa::path(
    get,
    path = "/preferences/{module}/{name}",
    tag = PREFERENCE_TAG,
    params(
        ("module" = String, Path, description = "Preference module"),
        ("name" = String, Path, description = "Preference name")
    ),
    responses(
        (status = 200, description = "Preference value", body = PreferenceDto),
        (status = 404, description = "Unknown preference", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn get_preference(
    State(state): State<AppState>,
    session: Session,
    Path((module, name)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let value = PreferenceService::new(&state.db, &state.config)
        .get(user.id, &module, &name)
        .await?;

    Ok(JsonResponse::success().with_data(PreferenceDto {
        module,
        name,
        value,
    }))
}

/// Store the user's value of a preference.
///
/// # Returns
/// - `200 OK` - Value stored
/// - `400 Bad Request` - Value has the wrong type
/// - `404 Not Found` - Unknown preference
#[utoipa::path(
    put,
    path = "/preferences/{module}/{name}",
    tag = PREFERENCE_TAG,
    params(
        ("module" = String, Path, description = "Preference module"),
        ("name" = String, Path, description = "Preference name")
    ),
    request_body = PreferenceValueDto,
    responses(
        (status = 200, description = "Preference stored", body = PreferenceDto),
        (status = 400, description = "Invalid value", body = JsonEnvelope),
        (status = 404, description = "Unknown preference", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn set_preference(
    State(state): State<AppState>,
    session: Session,
    Path((module, name)): Path<(String, String)>,
    Json(payload): Json<PreferenceValueDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let value = PreferenceService::new(&state.db, &state.config)
        .set(user.id, &module, &name, payload.value)
        .await?;

    Ok(JsonResponse::success().with_data(PreferenceDto {
        module,
        name,
        value,
    }))
}
