//! Shared helpers for the factories.

use sea_orm::{DatabaseConnection, DbErr};

static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Returns the next value of a process-wide counter used to build unique test values.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user together with the default `Servers` group every user owns.
///
/// # Returns
/// - `Ok((user, group))` - The created user and their first group
/// - `Err(DbErr)` - Insert failed
pub async fn create_user_with_default_group(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::server_group::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let group = crate::factory::server_group::ServerGroupFactory::new(db, user.id)
        .name("Servers")
        .build()
        .await?;

    Ok((user, group))
}
