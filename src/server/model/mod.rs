//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary and into DTOs
//! at the controller boundary.

pub mod auth;
pub mod mfa;
pub mod server;
pub mod server_group;
pub mod user;
