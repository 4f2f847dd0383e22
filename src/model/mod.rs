//! Request and response payloads shared with the browser client.

pub mod about;
pub mod api;
pub mod auth;
pub mod browser;
pub mod mfa;
pub mod preference;
pub mod server;
pub mod server_group;
