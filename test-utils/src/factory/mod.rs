//! Factories for catalog records.
//!
//! Each module exposes a builder-style `*Factory` for customised records and a `create_*`
//! shorthand for a record with defaults. Defaults use a shared counter so repeated calls
//! never collide on unique columns.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::UserFactory::new(&db)
//!     .username("admin@example.com")
//!     .role("Administrator")
//!     .build()
//!     .await?;
//! let group = factory::server_group::create_server_group(&db, user.id).await?;
//! let server = factory::server::ServerFactory::new(&db, user.id, group.id)
//!     .shared(true)
//!     .build()
//!     .await?;
//! ```

pub mod helpers;
pub mod server;
pub mod server_group;
pub mod user;
pub mod user_mfa;

pub use server::create_server;
pub use server_group::create_server_group;
pub use user::create_user;
pub use user_mfa::create_user_mfa;
