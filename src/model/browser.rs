use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A node of the browser tree as consumed by the JavaScript tree widget.
///
/// Extra attributes (`can_delete`, `user_id`, ...) are flattened next to the base keys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct BrowserNode {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub inode: bool,
    #[serde(rename = "_type")]
    pub node_type: String,
    #[serde(rename = "_id")]
    pub node_id: i32,
    #[serde(rename = "_pid")]
    pub parent_id: Option<i32>,
    pub module: String,
    /// Child node types, only present on collection nodes.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub nodes: Option<Vec<String>>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

/// Body returned by create and update of tree objects.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct NodeResponseDto {
    pub node: BrowserNode,
}
