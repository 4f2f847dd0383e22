//! Browser tree node construction.

use serde_json::{Map, Value};

use crate::model::browser::BrowserNode;

const BASE_KEYS: [&str; 9] = [
    "id", "label", "icon", "inode", "_type", "_id", "_pid", "module", "nodes",
];

pub const SERVER_GROUP_ICON: &str = "icon-server_group";
pub const SHARED_SERVER_GROUP_ICON: &str = "icon-server_group_shared";

fn module_name(node_type: &str) -> String {
    format!("pgadmin.node.{}", node_type)
}

/// Keeps only extra attributes that do not collide with the base node keys.
fn without_base_keys(extra: Map<String, Value>) -> Map<String, Value> {
    extra
        .into_iter()
        .filter(|(key, _)| !BASE_KEYS.contains(&key.as_str()))
        .collect()
}

/// Builds a tree node of `node_type`.
///
/// An empty `icon` falls back to `icon-<node_type>`. Extra attributes never override the
/// base keys.
pub fn generate_browser_node(
    node_type: &str,
    node_id: i32,
    parent_id: Option<i32>,
    label: &str,
    icon: &str,
    inode: bool,
    extra: Map<String, Value>,
) -> BrowserNode {
    let icon = if icon.is_empty() {
        format!("icon-{}", node_type)
    } else {
        icon.to_string()
    };

    BrowserNode {
        id: format!("{}_{}", node_type, node_id),
        label: label.to_string(),
        icon,
        inode,
        node_type: node_type.to_string(),
        node_id,
        parent_id,
        module: module_name(node_type),
        nodes: None,
        extra: without_base_keys(extra),
    }
}

/// Builds the collection node grouping children of `node_type` under `parent_id`.
pub fn generate_browser_collection_node(
    node_type: &str,
    parent_id: i32,
    label: &str,
    extra: Map<String, Value>,
) -> BrowserNode {
    BrowserNode {
        id: format!("coll-{}_{}", node_type, parent_id),
        label: label.to_string(),
        icon: format!("icon-coll-{}", node_type),
        inode: true,
        node_type: format!("coll-{}", node_type),
        node_id: parent_id,
        parent_id: Some(parent_id),
        module: module_name(node_type),
        nodes: Some(vec![node_type.to_string()]),
        extra: without_base_keys(extra),
    }
}

/// Icon of a server group as seen by the current user.
///
/// Foreign groups reachable only through a shared server get the shared icon in server mode.
pub fn server_group_icon(
    server_mode: bool,
    group_user_id: i32,
    current_user_id: i32,
    has_shared_server: bool,
) -> &'static str {
    if server_mode && group_user_id != current_user_id && has_shared_server {
        SHARED_SERVER_GROUP_ICON
    } else {
        SERVER_GROUP_ICON
    }
}
