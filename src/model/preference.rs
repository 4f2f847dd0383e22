use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PreferenceDto {
    pub module: String,
    pub name: String,
    pub value: serde_json::Value,
}

#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct PreferenceValueDto {
    pub value: serde_json::Value,
}
