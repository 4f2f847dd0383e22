//! Server domain models and parameters.

use crate::model::server::{CreateServerDto, ServerDto, UpdateServerDto};

/// Registered PostgreSQL server. Passwords stay encrypted.
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub id: i32,
    pub user_id: i32,
    pub servergroup_id: i32,
    pub name: String,
    pub host: String,
    pub port: i32,
    pub maintenance_db: String,
    pub username: String,
    pub password: Option<String>,
    pub save_password: bool,
    pub shared: bool,
    pub comment: Option<String>,
    pub use_ssh_tunnel: bool,
    pub tunnel_host: Option<String>,
    pub tunnel_port: Option<i32>,
    pub tunnel_username: Option<String>,
    pub tunnel_password: Option<String>,
}

impl Server {
    pub fn from_entity(entity: entity::server::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            servergroup_id: entity.servergroup_id,
            name: entity.name,
            host: entity.host,
            port: entity.port,
            maintenance_db: entity.maintenance_db,
            username: entity.username,
            password: entity.password,
            save_password: entity.save_password,
            shared: entity.shared,
            comment: entity.comment,
            use_ssh_tunnel: entity.use_ssh_tunnel,
            tunnel_host: entity.tunnel_host,
            tunnel_port: entity.tunnel_port,
            tunnel_username: entity.tunnel_username,
            tunnel_password: entity.tunnel_password,
        }
    }

    pub fn into_dto(self) -> ServerDto {
        ServerDto {
            id: self.id,
            gid: self.servergroup_id,
            user_id: self.user_id,
            name: self.name,
            host: self.host,
            port: self.port,
            maintenance_db: self.maintenance_db,
            username: self.username,
            has_password: self.password.is_some(),
            save_password: self.save_password,
            shared: self.shared,
            comment: self.comment,
            use_ssh_tunnel: self.use_ssh_tunnel,
            tunnel_host: self.tunnel_host,
            tunnel_port: self.tunnel_port,
            tunnel_username: self.tunnel_username,
            has_tunnel_password: self.tunnel_password.is_some(),
        }
    }
}

/// Parameters for registering a server.
///
/// Passwords arrive as plaintext from the client and are replaced by their encrypted form
/// before the repository stores them.
#[derive(Debug, Clone)]
pub struct CreateServerParams {
    pub user_id: i32,
    pub servergroup_id: i32,
    pub name: String,
    pub host: String,
    pub port: i32,
    pub maintenance_db: String,
    pub username: String,
    pub password: Option<String>,
    pub save_password: bool,
    pub shared: bool,
    pub comment: Option<String>,
    pub use_ssh_tunnel: bool,
    pub tunnel_host: Option<String>,
    pub tunnel_port: Option<i32>,
    pub tunnel_username: Option<String>,
    pub tunnel_password: Option<String>,
}

impl CreateServerParams {
    pub fn from_dto(user_id: i32, servergroup_id: i32, dto: CreateServerDto) -> Self {
        Self {
            user_id,
            servergroup_id,
            name: dto.name,
            host: dto.host,
            port: dto.port,
            maintenance_db: dto.maintenance_db,
            username: dto.username,
            password: dto.password,
            save_password: dto.save_password,
            shared: dto.shared,
            comment: dto.comment,
            use_ssh_tunnel: dto.use_ssh_tunnel,
            tunnel_host: dto.tunnel_host,
            tunnel_port: dto.tunnel_port,
            tunnel_username: dto.tunnel_username,
            tunnel_password: dto.tunnel_password,
        }
    }
}

/// Partial server update. `None` leaves a column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateServerParams {
    pub name: Option<String>,
    pub host: Option<String>,
    pub port: Option<i32>,
    pub maintenance_db: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub save_password: Option<bool>,
    pub shared: Option<bool>,
    pub comment: Option<String>,
    pub use_ssh_tunnel: Option<bool>,
    pub tunnel_host: Option<String>,
    pub tunnel_port: Option<i32>,
    pub tunnel_username: Option<String>,
    pub tunnel_password: Option<String>,
}

impl UpdateServerParams {
    pub fn from_dto(dto: UpdateServerDto) -> Self {
        Self {
            name: dto.name,
            host: dto.host,
            port: dto.port,
            maintenance_db: dto.maintenance_db,
            username: dto.username,
            password: dto.password,
            save_password: dto.save_password,
            shared: dto.shared,
            comment: dto.comment,
            use_ssh_tunnel: dto.use_ssh_tunnel,
            tunnel_host: dto.tunnel_host,
            tunnel_port: dto.tunnel_port,
            tunnel_username: dto.tunnel_username,
            tunnel_password: dto.tunnel_password,
        }
    }
}
