use axum::{
    body::Bytes as RawBody,
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};
use tower_sessions::Session;

use crate::{
    model::{
        api::JsonEnvelope,
        browser::{BrowserNode, NodeResponseDto},
        server_group::{ServerGroupDto, ServerGroupListItemDto, ServerGroupPayloadDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard,
        service::server_group::ServerGroupService, state::AppState,
        util::response::JsonResponse,
    },
};

/// Tag for grouping server group endpoints in OpenAPI documentation
pub static SERVER_GROUP_TAG: &str = "server_group";

/// List the user's server groups ordered by name.
///
/// # Access Control
/// Requires a logged-in user who passed the second factor.
///
/// # Returns
/// - `200 OK` - `{id, name}` of each group
/// - `401 Unauthorized` - User not authenticated
#[utoipa::path(
    get,
    path = "/browser/server_group/obj/",
    tag = SERVER_GROUP_TAG,
    responses(
        (status = 200, description = "Server groups of the user", body = Vec<ServerGroupListItemDto>),
        (status = 401, description = "User not authenticated", body = JsonEnvelope),
        (status = 500, description = "Internal server error", body = JsonEnvelope)
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let groups: Vec<ServerGroupListItemDto> = ServerGroupService::new(&state.db, &state.config)
        .list(user.id)
        .await?
        .into_iter()
        .map(|group| group.into_list_item_dto())
        .collect();

    Ok(Json(groups))
}

/// Get the properties of a server group.
///
/// # Returns
/// - `200 OK` - `{id, name, user_id}` of the group
/// - `410 Gone` - Group does not exist
#[utoipa::path(
    get,
    path = "/browser/server_group/obj/{gid}",
    tag = SERVER_GROUP_TAG,
    params(("gid" = i32, Path, description = "Server group ID")),
    responses(
        (status = 200, description = "Server group properties", body = ServerGroupDto),
        (status = 410, description = "Server group not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn properties(
    State(state): State<AppState>,
    session: Session,
    Path(gid): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let group = ServerGroupService::new(&state.db, &state.config)
        .properties(gid)
        .await?;

    Ok(Json(group.into_dto()))
}

/// Create a server group.
///
/// # Arguments
/// - `payload` - Name of the new group
///
/// # Returns
/// - `200 OK` - Browser node of the new group
/// - `400 Bad Request` - The user already has a group with this name
/// - `417 Expectation Failed` - Name missing
#[utoipa::path(
    post,
    path = "/browser/server_group/obj/",
    tag = SERVER_GROUP_TAG,
    request_body = ServerGroupPayloadDto,
    responses(
        (status = 200, description = "Browser node of the new group", body = NodeResponseDto),
        (status = 400, description = "Duplicate name", body = JsonEnvelope),
        (status = 417, description = "Name missing", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ServerGroupPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let node = ServerGroupService::new(&state.db, &state.config)
        .create(user.id, payload.name)
        .await?;

    Ok(Json(NodeResponseDto { node }))
}

/// Rename one of the user's server groups.
///
/// A missing name leaves the group unchanged.
///
/// # Returns
/// - `200 OK` - Browser node of the group
/// - `400 Bad Request` - The user already has a group with this name
/// - `417 Expectation Failed` - Group not owned by the user or empty name
#[utoipa::path(
    put,
    path = "/browser/server_group/obj/{gid}",
    tag = SERVER_GROUP_TAG,
    params(("gid" = i32, Path, description = "Server group ID")),
    request_body = ServerGroupPayloadDto,
    responses(
        (status = 200, description = "Browser node of the group", body = NodeResponseDto),
        (status = 400, description = "Duplicate name", body = JsonEnvelope),
        (status = 417, description = "Group not found or empty name", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(gid): Path<i32>,
    Json(payload): Json<ServerGroupPayloadDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let node = ServerGroupService::new(&state.db, &state.config)
        .update(user.id, gid, payload.name)
        .await?;

    Ok(Json(NodeResponseDto { node }))
}

/// Delete one of the user's server groups together with its servers.
///
/// # Returns
/// - `200 OK` - Group deleted, the submitted form echoed as `result`
/// - `410 Gone` - Group not owned by the user
/// - `417 Expectation Failed` - Group holds a shared server or is the user's first group
#[utoipa::path(
    delete,
    path = "/browser/server_group/obj/{gid}",
    tag = SERVER_GROUP_TAG,
    params(("gid" = i32, Path, description = "Server group ID")),
    responses(
        (status = 200, description = "Server group deleted", body = JsonEnvelope),
        (status = 410, description = "Server group not found", body = JsonEnvelope),
        (status = 417, description = "Server group cannot be deleted", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(gid): Path<i32>,
    body: RawBody,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    ServerGroupService::new(&state.db, &state.config)
        .delete(user.id, gid)
        .await?;

    Ok(JsonResponse::success().with_result(form_fields(&body)))
}

/// Fields of a urlencoded request body; an empty or non-form body gives an empty map.
fn form_fields(body: &[u8]) -> Map<String, Value> {
    url::form_urlencoded::parse(body)
        .into_owned()
        .map(|(key, value)| (key, Value::String(value)))
        .collect()
}

/// Browser nodes of the groups visible to the user.
#[utoipa::path(
    get,
    path = "/browser/server_group/nodes/",
    tag = SERVER_GROUP_TAG,
    responses(
        (status = 200, description = "Server group nodes", body = Vec<BrowserNode>),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn nodes(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let nodes = ServerGroupService::new(&state.db, &state.config)
        .nodes(user.id)
        .await?;

    Ok(JsonResponse::success().with_data(nodes))
}

#[utoipa::path(
    get,
    path = "/browser/server_group/nodes/{gid}",
    tag = SERVER_GROUP_TAG,
    params(("gid" = i32, Path, description = "Server group ID")),
    responses(
        (status = 200, description = "Server group node", body = BrowserNode),
        (status = 410, description = "Server group not found", body = JsonEnvelope),
        (status = 401, description = "User not authenticated", body = JsonEnvelope)
    ),
)]
pub async fn node(
    State(state): State<AppState>,
    session: Session,
    Path(gid): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let node = ServerGroupService::new(&state.db, &state.config)
        .node(user.id, gid)
        .await?;

    Ok(JsonResponse::success().with_data(node))
}

/// Operations of other tree nodes that do not exist for server groups.
pub const NOT_APPLICABLE_OPERATIONS: [&str; 5] = ["sql", "msql", "stats", "dependency", "dependent"];

/// SQL, statistics and dependency views do not exist for server groups.
#[utoipa::path(
    get,
    path = "/browser/server_group/{operation}/{gid}",
    tag = SERVER_GROUP_TAG,
    params(
        ("operation" = String, Path, description = "One of sql, msql, stats, dependency, dependent"),
        ("gid" = i32, Path, description = "Server group ID")
    ),
    responses(
        (status = 422, description = "Operation not applicable to server groups", body = JsonEnvelope),
        (status = 404, description = "Unknown operation", body = JsonEnvelope)
    ),
)]
pub async fn not_applicable(
    State(state): State<AppState>,
    session: Session,
    Path((operation, _gid)): Path<(String, i32)>,
) -> Result<JsonResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session).require(&[]).await?;

    if !NOT_APPLICABLE_OPERATIONS.contains(&operation.as_str()) {
        return Err(AppError::NotFound(format!("Unknown operation '{}'", operation)));
    }

    Err(AppError::NotApplicable)
}
