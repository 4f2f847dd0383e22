//! Small helpers shared by the server layers.

pub mod browser_node;
pub mod crypto;
pub mod network;
pub mod password;
pub mod random;
pub mod response;
pub mod user_agent;
