//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories. They enforce the
//! catalog rules (ownership, visibility, group deletion constraints), drive the
//! authentication sources and work with domain models rather than DTOs or entity models.

pub mod about;
pub mod auth;
pub mod mfa;
pub mod preference;
pub mod server;
pub mod server_group;
pub mod user;

#[cfg(test)]
mod test;
