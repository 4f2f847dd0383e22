//! SeaORM entities for the SQLite catalog.
//!
//! The catalog holds console users, their MFA registrations and preferences, and the
//! server groups and server connection entries shown in the browser tree.

pub mod prelude;

pub mod server;
pub mod server_group;
pub mod user;
pub mod user_mfa;
pub mod user_preference;
