use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Server properties. Saved passwords are never returned, only whether one is stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ServerDto {
    pub id: i32,
    pub gid: i32,
    pub user_id: i32,
    pub name: String,
    pub host: String,
    pub port: i32,
    pub maintenance_db: String,
    pub username: String,
    pub has_password: bool,
    pub save_password: bool,
    pub shared: bool,
    pub comment: Option<String>,
    pub use_ssh_tunnel: bool,
    pub tunnel_host: Option<String>,
    pub tunnel_port: Option<i32>,
    pub tunnel_username: Option<String>,
    pub has_tunnel_password: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CreateServerDto {
    pub name: String,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: i32,
    #[serde(default = "default_maintenance_db")]
    pub maintenance_db: String,
    pub username: String,
    pub password: Option<String>,
    #[serde(default)]
    pub save_password: bool,
    #[serde(default)]
    pub shared: bool,
    pub comment: Option<String>,
    #[serde(default)]
    pub use_ssh_tunnel: bool,
    pub tunnel_host: Option<String>,
    pub tunnel_port: Option<i32>,
    pub tunnel_username: Option<String>,
    pub tunnel_password: Option<String>,
}

fn default_port() -> i32 {
    5432
}

fn default_maintenance_db() -> String {
    "postgres".to_string()
}

/// Partial update; absent fields keep their stored value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct UpdateServerDto {
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
