use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard JSON envelope returned by the console's ajax endpoints.
///
/// `success` is `1` on success and `0` on failure; the HTTP status of the response carries
/// the same information for clients that look at it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct JsonEnvelope {
    pub success: u8,
    pub errormsg: String,
    pub info: String,
    pub result: Option<serde_json::Value>,
    pub data: Option<serde_json::Value>,
}
