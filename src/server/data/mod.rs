//! Database repository layer for the catalog.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! catalog entity. Repositories use SeaORM entity models internally and return domain models
//! to keep the data layer separate from the business logic layer.

pub mod server;
pub mod server_group;
pub mod user;
pub mod user_mfa;
pub mod user_preference;
