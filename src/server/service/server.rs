//! Registered server management.
//!
//! Servers live inside server groups. Owners see and modify their own servers; in server
//! mode shared servers are visible to every user but remain read-only for them. Saved
//! passwords are sealed with the crypt key held in the login session.

use serde_json::{json, Map};

use sea_orm::ConnectionTrait;

use crate::{
    model::{
        browser::BrowserNode,
        server::{CreateServerDto, UpdateServerDto},
    },
    server::{
        data::{server::ServerRepository, server_group::ServerGroupRepository},
        error::{auth::AuthError, AppError},
        model::server::{CreateServerParams, Server, UpdateServerParams},
        service::server_group::SG_NODE_NOT_FOUND,
        util::{
            browser_node::{generate_browser_collection_node, generate_browser_node},
            crypto::{decrypt, encrypt, CryptKey},
            network::is_valid_host,
        },
    },
};

pub const SERVER_NODE: &str = "server";

const DEFAULT_TUNNEL_PORT: i32 = 22;
const SERVER_NOT_FOUND: &str = "Could not find the required server.";
const SERVER_ICON: &str = "icon-server-not-connected";
const SHARED_SERVER_ICON: &str = "icon-shared-server-not-connected";

/// Collections shown below a server node, as `(node type, label)`.
const SERVER_CHILD_COLLECTIONS: [(&str, &str); 3] = [
    ("database", "Databases"),
    ("role", "Login/Group Roles"),
    ("tablespace", "Tablespaces"),
];

pub struct ServerService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ServerService<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Lists the servers of a group visible to the user.
    ///
    /// # Arguments
    /// - `include_shared` - Whether shared servers of other users are visible (server mode)
    ///
    /// # Returns
    /// - `Err(AppError::Gone)` - No group with that id
    pub async fn list(
        &self,
        user_id: i32,
        gid: i32,
        include_shared: bool,
    ) -> Result<Vec<Server>, AppError> {
        if ServerGroupRepository::new(self.db)
            .find_by_id(gid)
            .await?
            .is_none()
        {
            return Err(AppError::Gone(SG_NODE_NOT_FOUND.to_string()));
        }

        let servers = ServerRepository::new(self.db)
            .list_visible_in_group(gid, user_id, include_shared)
            .await?;

        Ok(servers)
    }

    /// Returns a server of group `gid` if the user may see it.
    ///
    /// # Returns
    /// - `Ok(Server)` - The server, passwords still encrypted
    /// - `Err(AppError::Gone)` - Server missing, in another group or not visible
    pub async fn properties(
        &self,
        user_id: i32,
        gid: i32,
        sid: i32,
        include_shared: bool,
    ) -> Result<Server, AppError> {
        let server = ServerRepository::new(self.db).find_by_id(sid).await?;

        match server {
            Some(server)
                if server.servergroup_id == gid
                    && (server.user_id == user_id || (include_shared && server.shared)) =>
            {
                Ok(server)
            }
            _ => Err(AppError::Gone(SERVER_NOT_FOUND.to_string())),
        }
    }

    /// Registers a server in one of the user's groups.
    ///
    /// Passwords are kept only when `save_password` is set and a crypt key is available.
    ///
    /// # Returns
    /// - `Ok(Server)` - The created server
    /// - `Err(AppError::Gone)` - Group missing or owned by someone else
    /// - `Err(AppError::BadRequest)` - Name, host or port rejected
    pub async fn create(
        &self,
        user_id: i32,
        gid: i32,
        dto: CreateServerDto,
        key: Option<&CryptKey>,
    ) -> Result<Server, AppError> {
        if ServerGroupRepository::new(self.db)
            .find_for_user(gid, user_id)
            .await?
            .is_none()
        {
            return Err(AppError::Gone(SG_NODE_NOT_FOUND.to_string()));
        }

        validate_connection(&dto.name, &dto.host, dto.port)?;
        if dto.use_ssh_tunnel {
            validate_tunnel(dto.tunnel_host.as_deref(), dto.tunnel_port)?;
        }

        let mut params = CreateServerParams::from_dto(user_id, gid, dto);
        params.password = seal(params.password.take(), params.save_password, key)?;
        params.tunnel_password = seal(
            params.tunnel_password.take(),
            params.use_ssh_tunnel,
            key,
        )?;

        let server = ServerRepository::new(self.db).create(params).await?;

        tracing::info!("User {} registered server {}", user_id, server.id);

        Ok(server)
    }

    /// Updates one of the user's servers.
    ///
    /// # Returns
    /// - `Ok(Server)` - The server after the update
    /// - `Err(AppError::Gone)` - Server missing or not visible
    /// - `Err(AuthError::AccessDenied)` - Server is shared by another user
    /// - `Err(AppError::BadRequest)` - Name, host or port rejected
    pub async fn update(
        &self,
        user_id: i32,
        gid: i32,
        sid: i32,
        dto: UpdateServerDto,
        key: Option<&CryptKey>,
    ) -> Result<Server, AppError> {
        let server = self.owned(user_id, gid, sid).await?;

        validate_connection(
            dto.name.as_deref().unwrap_or(&server.name),
            dto.host.as_deref().unwrap_or(&server.host),
            dto.port.unwrap_or(server.port),
        )?;

        let save_password = dto.save_password.unwrap_or(server.save_password);
        let use_ssh_tunnel = dto.use_ssh_tunnel.unwrap_or(server.use_ssh_tunnel);
        if use_ssh_tunnel {
            validate_tunnel(
                dto.tunnel_host.as_deref().or(server.tunnel_host.as_deref()),
                dto.tunnel_port.or(server.tunnel_port),
            )?;
        }

        let mut params = UpdateServerParams::from_dto(dto);
        params.password = seal(params.password.take(), save_password, key)?;
        params.tunnel_password = seal(params.tunnel_password.take(), use_ssh_tunnel, key)?;

        let repo = ServerRepository::new(self.db);
        let updated = repo
            .update(sid, params)
            .await?
            .ok_or_else(|| AppError::Gone(SERVER_NOT_FOUND.to_string()))?;

        if !updated.save_password && updated.password.is_some() {
            repo.update_passwords(sid, None, updated.tunnel_password.clone())
                .await?;
            return Ok(Server {
                password: None,
                ..updated
            });
        }

        Ok(updated)
    }

    /// Deletes one of the user's servers.
    pub async fn delete(&self, user_id: i32, gid: i32, sid: i32) -> Result<(), AppError> {
        let server = self.owned(user_id, gid, sid).await?;

        ServerRepository::new(self.db).delete(server.id).await?;

        tracing::info!("User {} deleted server {}", user_id, server.id);

        Ok(())
    }

    /// Forgets the saved passwords of one of the user's servers.
    pub async fn clear_saved_password(
        &self,
        user_id: i32,
        gid: i32,
        sid: i32,
    ) -> Result<(), AppError> {
        let server = self.owned(user_id, gid, sid).await?;

        ServerRepository::new(self.db)
            .clear_saved_password(server.id)
            .await?;

        Ok(())
    }

    /// Browser nodes of the servers in a group.
    pub async fn nodes(
        &self,
        user_id: i32,
        gid: i32,
        include_shared: bool,
    ) -> Result<Vec<BrowserNode>, AppError> {
        let nodes = self
            .list(user_id, gid, include_shared)
            .await?
            .iter()
            .map(|server| server_node(server, user_id))
            .collect();

        Ok(nodes)
    }

    /// Browser node of a single server.
    pub async fn node(
        &self,
        user_id: i32,
        gid: i32,
        sid: i32,
        include_shared: bool,
    ) -> Result<BrowserNode, AppError> {
        let server = self.properties(user_id, gid, sid, include_shared).await?;

        Ok(server_node(&server, user_id))
    }

    /// Collection nodes shown when a server node is expanded.
    pub async fn children(
        &self,
        user_id: i32,
        gid: i32,
        sid: i32,
        include_shared: bool,
    ) -> Result<Vec<BrowserNode>, AppError> {
        let server = self.properties(user_id, gid, sid, include_shared).await?;

        let nodes = SERVER_CHILD_COLLECTIONS
            .iter()
            .map(|(node_type, label)| {
                generate_browser_collection_node(node_type, server.id, label, Map::new())
            })
            .collect();

        Ok(nodes)
    }

    /// Re-seals the saved passwords of the user's servers under `new_key`.
    ///
    /// All values are decrypted before anything is written. A password that cannot be
    /// decrypted with `old_key` is dropped rather than failing the whole operation.
    pub async fn reencrypt_server_passwords(
        &self,
        user_id: i32,
        old_key: &CryptKey,
        new_key: &CryptKey,
    ) -> Result<(), AppError> {
        let repo = ServerRepository::new(self.db);

        let mut updates = Vec::new();
        for server in repo.list_by_user(user_id).await? {
            if server.password.is_none() && server.tunnel_password.is_none() {
                continue;
            }

            let password = reseal(server.id, server.password.as_deref(), old_key, new_key)?;
            let tunnel_password = reseal(
                server.id,
                server.tunnel_password.as_deref(),
                old_key,
                new_key,
            )?;

            updates.push((server.id, password, tunnel_password));
        }

        for (id, password, tunnel_password) in updates {
            repo.update_passwords(id, password, tunnel_password).await?;
        }

        Ok(())
    }

    /// Forgets every saved server and tunnel password of the user.
    pub async fn remove_saved_passwords(&self, user_id: i32) -> Result<(), AppError> {
        ServerRepository::new(self.db)
            .clear_saved_passwords_for_user(user_id)
            .await?;

        tracing::info!("Removed saved server passwords of user {}", user_id);

        Ok(())
    }

    /// Checks whether a server with id `sid` exists, regardless of owner.
    pub async fn does_server_exist(&self, sid: i32) -> Result<bool, AppError> {
        Ok(ServerRepository::new(self.db).exists(sid).await?)
    }

    /// Loads a server for modification by its owner.
    ///
    /// Servers the user cannot see are reported as gone even when they exist; such
    /// attempts are logged.
    async fn owned(&self, user_id: i32, gid: i32, sid: i32) -> Result<Server, AppError> {
        let server = match self.properties(user_id, gid, sid, true).await {
            Ok(server) => server,
            Err(AppError::Gone(msg)) => {
                if self.does_server_exist(sid).await? {
                    tracing::warn!(
                        "User {} tried to modify server {} outside their view",
                        user_id,
                        sid
                    );
                }
                return Err(AppError::Gone(msg));
            }
            Err(err) => return Err(err),
        };

        if server.user_id != user_id {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("server {} belongs to user {}", sid, server.user_id),
            )
            .into());
        }

        Ok(server)
    }
}

fn validate_connection(name: &str, host: &str, port: i32) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Could not find the required parameter (Name).".to_string(),
        ));
    }
    if host.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Could not find the required parameter (Host name/address).".to_string(),
        ));
    }
    if !is_valid_host(host) {
        return Err(AppError::BadRequest(format!(
            "Host name/address '{}' is not a valid IP address or host name.",
            host
        )));
    }
    validate_port(port)
}

fn validate_tunnel(tunnel_host: Option<&str>, tunnel_port: Option<i32>) -> Result<(), AppError> {
    let Some(tunnel_host) = tunnel_host.filter(|host| !host.trim().is_empty()) else {
        return Err(AppError::BadRequest(
            "Could not find the required parameter (Tunnel host).".to_string(),
        ));
    };
    if !is_valid_host(tunnel_host) {
        return Err(AppError::BadRequest(format!(
            "Tunnel host '{}' is not a valid IP address or host name.",
            tunnel_host
        )));
    }
    validate_port(tunnel_port.unwrap_or(DEFAULT_TUNNEL_PORT))
}

fn validate_port(port: i32) -> Result<(), AppError> {
    if !(1..=65535).contains(&port) {
        return Err(AppError::BadRequest(format!(
            "Invalid port {}, must be between 1 and 65535.",
            port
        )));
    }

    Ok(())
}

/// Encrypts `password` when it should be saved and a key is available.
fn seal(
    password: Option<String>,
    save: bool,
    key: Option<&CryptKey>,
) -> Result<Option<String>, AppError> {
    match (password, key) {
        (Some(password), Some(key)) if save && !password.is_empty() => {
            Ok(Some(encrypt(&password, key)?))
        }
        _ => Ok(None),
    }
}

fn reseal(
    server_id: i32,
    sealed: Option<&str>,
    old_key: &CryptKey,
    new_key: &CryptKey,
) -> Result<Option<String>, AppError> {
    let Some(sealed) = sealed else {
        return Ok(None);
    };

    match decrypt(sealed, old_key) {
        Ok(plaintext) => Ok(Some(encrypt(&plaintext, new_key)?)),
        Err(err) => {
            tracing::warn!(
                "Dropping saved password of server {}, it could not be decrypted: {}",
                server_id,
                err
            );
            Ok(None)
        }
    }
}

pub fn server_node(server: &Server, user_id: i32) -> BrowserNode {
    let icon = if server.shared && server.user_id != user_id {
        SHARED_SERVER_ICON
    } else {
        SERVER_ICON
    };

    let mut extra = Map::new();
    extra.insert("connected".to_string(), json!(false));
    extra.insert("server_type".to_string(), json!("pg"));
    extra.insert("db".to_string(), json!(server.maintenance_db));
    extra.insert("username".to_string(), json!(server.username));
    extra.insert("user_id".to_string(), json!(server.user_id));
    extra.insert("shared".to_string(), json!(server.shared));
    extra.insert(
        "is_password_saved".to_string(),
        json!(server.password.is_some()),
    );
    extra.insert(
        "is_tunnel_password_saved".to_string(),
        json!(server.tunnel_password.is_some()),
    );

    generate_browser_node(
        SERVER_NODE,
        server.id,
        Some(server.servergroup_id),
        &server.name,
        icon,
        true,
        extra,
    )
}
