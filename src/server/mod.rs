//! Backend of the console.
//!
//! Axum serves the JSON routes, SeaORM keeps the SQLite catalog of users, server groups,
//! registered servers and preferences, and tower-sessions stores logins in the same
//! database.
//!
//! # Layers
//!
//! - `controller/` - Route handlers: access checks, extraction, response shaping
//! - `service/` - Catalog rules, the authentication source chain and MFA
//! - `data/` - Repositories over the SeaORM entities
//! - `model/` - Domain types converted from entities and into DTOs
//! - `middleware/` - `AuthGuard` and typed wrappers over the session keys
//! - `error/` - `AppError` and its mapping to status codes
//! - `util/` - Saved password crypto, browser tree nodes, the JSON envelope
//!
//! `config`, `state`, `startup` and `router` wire these together at launch.
//!
//! A request is routed to a controller, which resolves the user with `AuthGuard`, hands
//! plain values to a service and turns the returned domain model into a DTO.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
