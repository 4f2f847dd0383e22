use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::JsonEnvelope,
        browser::{BrowserNode, NodeResponseDto},
        server::{CreateServerDto, ServerDto, UpdateServerDto},
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        service::server::{server_node, ServerService},
        state::AppState,
        util::response::JsonResponse,
    },
};

/// Tag for grouping server endpoints in OpenAPI documentation
pub static SERVER_TAG: &str = "server";

/// List the servers of a group visible to the user.
///
/// Shared servers of other users are included in server mode.
///
/// # Returns
/// - `200 OK` - Servers of the group
/// - `410 Gone` - Group does not exist
#[utoipa::path(
    get,
    path = "/browser/server/obj/{gid}/",
    tag = SERVER_TAG,
    params(("gid" = i32, Path, description = "Server group ID")),
    responses(
        (status = 200, description = "Servers of the group", body = Vec<ServerDto>),
        (status = 410, description = "Server group not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Path(gid): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let servers: Vec<ServerDto> = ServerService::new(&state.db)
        .list(user.id, gid, state.config.server_mode)
        .await?
        .into_iter()
        .map(|server| server.into_dto())
        .collect();

    Ok(Json(servers))
}

/// Get the properties of a server. Saved passwords are only reported as present.
#[utoipa::path(
    get,
    path = "/browser/server/obj/{gid}/{sid}",
    tag = SERVER_TAG,
    params(
        ("gid" = i32, Path, description = "Server group ID"),
        ("sid" = i32, Path, description = "Server ID")
    ),
    responses(
        (status = 200, description = "Server properties", body = ServerDto),
        (status = 410, description = "Server not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn properties(
    State(state): State<AppState>,
    session: Session,
    Path((gid, sid)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let server = ServerService::new(&state.db)
        .properties(user.id, gid, sid, state.config.server_mode)
        .await?;

    Ok(JsonResponse::success().with_data(server.into_dto()))
}

/// Register a server in one of the user's groups.
///
/// The password is encrypted with the key of the session and only saved when requested.
///
/// # Returns
/// - `200 OK` - Browser node of the new server
/// - `400 Bad Request` - Missing name or host, or port out of range
/// - `410 Gone` - Group does not belong to the user
#[utoipa::path(
    post,
    path = "/browser/server/obj/{gid}/",
    tag = SERVER_TAG,
    params(("gid" = i32, Path, description = "Server group ID")),
    request_body = CreateServerDto,
    responses(
        (status = 200, description = "Browser node of the new server", body = NodeResponseDto),
        (status = 400, description = "Invalid connection details", body = JsonEnvelope),
        (status = 410, description = "Server group not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Path(gid): Path<i32>,
    Json(payload): Json<CreateServerDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let key = AuthSession::new(&session).get_crypt_key().await?;

    let server = ServerService::new(&state.db)
        .create(user.id, gid, payload, key.as_ref())
        .await?;

    Ok(Json(NodeResponseDto {
        node: server_node(&server, user.id),
    }))
}

/// Update a server owned by the user.
///
/// # Returns
/// - `200 OK` - Browser node of the server
/// - `400 Bad Request` - Invalid connection details
/// - `403 Forbidden` - Server belongs to another user
/// - `410 Gone` - Server not found
#[utoipa::path(
    put,
    path = "/browser/server/obj/{gid}/{sid}",
    tag = SERVER_TAG,
    params(
        ("gid" = i32, Path, description = "Server group ID"),
        ("sid" = i32, Path, description = "Server ID")
    ),
    request_body = UpdateServerDto,
    responses(
        (status = 200, description = "Browser node of the server", body = NodeResponseDto),
        (status = 400, description = "Invalid connection details", body = JsonEnvelope),
        (status = 403, description = "Server belongs to another user", body = JsonEnvelope),
        (status = 410, description = "Server not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path((gid, sid)): Path<(i32, i32)>,
    Json(payload): Json<UpdateServerDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let key = AuthSession::new(&session).get_crypt_key().await?;

    let server = ServerService::new(&state.db)
        .update(user.id, gid, sid, payload, key.as_ref())
        .await?;

    Ok(Json(NodeResponseDto {
        node: server_node(&server, user.id),
    }))
}

#[utoipa::path(
    delete,
    path = "/browser/server/obj/{gid}/{sid}",
    tag = SERVER_TAG,
    params(
        ("gid" = i32, Path, description = "Server group ID"),
        ("sid" = i32, Path, description = "Server ID")
    ),
    responses(
        (status = 200, description = "Server deleted", body = JsonEnvelope),
        (status = 403, description = "Server belongs to another user", body = JsonEnvelope),
        (status = 410, description = "Server not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path((gid, sid)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ServerService::new(&state.db).delete(user.id, gid, sid).await?;

    Ok(JsonResponse::success().with_info("Server deleted"))
}

#[utoipa::path(
    get,
    path = "/browser/server/nodes/{gid}/",
    tag = SERVER_TAG,
    params(("gid" = i32, Path, description = "Server group ID")),
    responses(
        (status = 200, description = "Server nodes of the group", body = Vec<BrowserNode>),
        (status = 410, description = "Server group not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn nodes(
    State(state): State<AppState>,
    session: Session,
    Path(gid): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let nodes = ServerService::new(&state.db)
        .nodes(user.id, gid, state.config.server_mode)
        .await?;

    Ok(JsonResponse::success().with_data(nodes))
}

#[utoipa::path(
    get,
    path = "/browser/server/nodes/{gid}/{sid}",
    tag = SERVER_TAG,
    params(
        ("gid" = i32, Path, description = "Server group ID"),
        ("sid" = i32, Path, description = "Server ID")
    ),
    responses(
        (status = 200, description = "Server node", body = BrowserNode),
        (status = 410, description = "Server not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn node(
    State(state): State<AppState>,
    session: Session,
    Path((gid, sid)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let node = ServerService::new(&state.db)
        .node(user.id, gid, sid, state.config.server_mode)
        .await?;

    Ok(JsonResponse::success().with_data(node))
}

/// Collection nodes below a server.
#[utoipa::path(
    get,
    path = "/browser/server/children/{gid}/{sid}",
    tag = SERVER_TAG,
    params(
        ("gid" = i32, Path, description = "Server group ID"),
        ("sid" = i32, Path, description = "Server ID")
    ),
    responses(
        (status = 200, description = "Child collection nodes", body = Vec<BrowserNode>),
        (status = 410, description = "Server not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn children(
    State(state): State<AppState>,
    session: Session,
    Path((gid, sid)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let children = ServerService::new(&state.db)
        .children(user.id, gid, sid, state.config.server_mode)
        .await?;

    Ok(JsonResponse::success().with_data(children))
}

/// Forget the saved password of a server owned by the user.
#[utoipa::path(
    put,
    path = "/browser/server/clear_saved_password/{gid}/{sid}",
    tag = SERVER_TAG,
    params(
        ("gid" = i32, Path, description = "Server group ID"),
        ("sid" = i32, Path, description = "Server ID")
    ),
    responses(
        (status = 200, description = "Saved password cleared", body = JsonEnvelope),
        (status = 403, description = "Server belongs to another user", body = JsonEnvelope),
        (status = 410, description = "Server not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn clear_saved_password(
    State(state): State<AppState>,
    session: Session,
    Path((gid, sid)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ServerService::new(&state.db)
        .clear_saved_password(user.id, gid, sid)
        .await?;

    Ok(JsonResponse::success().with_info("The saved password cleared successfully."))
}
