//! MFA registration factory.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Registers `method` for `user_id` with the given secret.
///
/// # Returns
/// - `Ok(Model)` - The registration
/// - `Err(DbErr)` - Insert failed, e.g. the method is already registered
pub async fn create_user_mfa(
    db: &DatabaseConnection,
    user_id: i32,
    method: &str,
    options: Option<&str>,
) -> Result<entity::user_mfa::Model, DbErr> {
    entity::user_mfa::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        mfa_auth: ActiveValue::Set(method.to_string()),
        options: ActiveValue::Set(options.map(str::to_string)),
    }
    .insert(db)
    .await
}
