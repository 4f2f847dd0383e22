//! Server factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Builder for server records.
///
/// Defaults: name `Server {n}`, host `localhost`, port 5432, maintenance database
/// `postgres`, username `postgres`, no saved password, not shared, no SSH tunnel.
pub struct ServerFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    servergroup_id: i32,
    name: String,
    host: String,
    port: i32,
    password: Option<String>,
    tunnel_password: Option<String>,
    shared: bool,
}

impl<'a> ServerFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32, servergroup_id: i32) -> Self {
        Self {
            db,
            user_id,
            servergroup_id,
            name: format!("Server {}", next_id()),
            host: "localhost".to_string(),
            port: 5432,
            password: None,
            tunnel_password: None,
            shared: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: i32) -> Self {
        self.port = port;
        self
    }

    /// Stores an already encrypted password and marks it as saved.
    pub fn password(mut self, encrypted: impl Into<String>) -> Self {
        self.password = Some(encrypted.into());
        self
    }

    /// Stores an already encrypted SSH tunnel password.
    pub fn tunnel_password(mut self, encrypted: impl Into<String>) -> Self {
        self.tunnel_password = Some(encrypted.into());
        self
    }

    pub fn shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    pub async fn build(self) -> Result<entity::server::Model, DbErr> {
        let use_ssh_tunnel = self.tunnel_password.is_some();
        entity::server::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            servergroup_id: ActiveValue::Set(self.servergroup_id),
            name: ActiveValue::Set(self.name),
            host: ActiveValue::Set(self.host),
            port: ActiveValue::Set(self.port),
            maintenance_db: ActiveValue::Set("postgres".to_string()),
            username: ActiveValue::Set("postgres".to_string()),
            save_password: ActiveValue::Set(self.password.is_some()),
            password: ActiveValue::Set(self.password),
            shared: ActiveValue::Set(self.shared),
            comment: ActiveValue::Set(None),
            use_ssh_tunnel: ActiveValue::Set(use_ssh_tunnel),
            tunnel_host: ActiveValue::Set(use_ssh_tunnel.then(|| "bastion".to_string())),
            tunnel_port: ActiveValue::Set(use_ssh_tunnel.then_some(22)),
            tunnel_username: ActiveValue::Set(use_ssh_tunnel.then(|| "tunnel".to_string())),
            tunnel_password: ActiveValue::Set(self.tunnel_password),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a private server with defaults inside `servergroup_id`.
pub async fn create_server(
    db: &DatabaseConnection,
    user_id: i32,
    servergroup_id: i32,
) -> Result<entity::server::Model, DbErr> {
    ServerFactory::new(db, user_id, servergroup_id).build().await
}
