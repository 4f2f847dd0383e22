use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{api::JsonEnvelope, browser::BrowserNode},
    server::{
        error::AppError, middleware::auth::AuthGuard,
        service::server_group::ServerGroupService, state::AppState,
        util::response::JsonResponse,
    },
};

pub static BROWSER_TAG: &str = "browser";

/// Root nodes of the browser tree.
///
/// One node per visible server group; the first group cannot be deleted.
#[utoipa::path(
    get,
    path = "/browser/nodes/",
    tag = BROWSER_TAG,
    responses(
        (status = 200, description = "Root nodes", body = Vec<BrowserNode>),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn get_nodes(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let nodes = ServerGroupService::new(&state.db, &state.config)
        .get_nodes(user.id)
        .await?;

    Ok(JsonResponse::success().with_data(nodes))
}
