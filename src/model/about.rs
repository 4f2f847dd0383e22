use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AboutDto {
    pub browser_details: String,
    pub os_details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nwjs: Option<String>,
    pub config_db: String,
    pub log_file: Option<String>,
    pub app_mode: String,
    /// Only reported in server mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    pub current_user: String,
    pub settings: String,
}
