//! pgconsole test utilities
//!
//! Shared helpers for the tests of the console backend: an in-memory SQLite catalog built
//! from the entity definitions, a lazily created session on the same pool, and factories
//! for the catalog records (users, server groups, servers, MFA registrations).
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn lists_groups() -> Result<(), TestError> {
//!     let mut test = TestBuilder::new().with_catalog_tables().build().await?;
//!     let (db, session) = test.db_and_session().await?;
//!
//!     let user = factory::user::create_user(db).await?;
//!     let group = factory::server_group::create_server_group(db, user.id).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
