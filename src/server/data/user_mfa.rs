//! MFA registration repository.

use migration::OnConflict;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::mfa::UserMfa;

pub struct UserMfaRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserMfaRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, user_id: i32, method: &str) -> Result<Option<UserMfa>, DbErr> {
        let entity = entity::prelude::UserMfa::find_by_id((user_id, method.to_string()))
            .one(self.db)
            .await?;

        Ok(entity.map(UserMfa::from_entity))
    }

    /// Lists the method names registered by `user_id`.
    pub async fn list_methods(&self, user_id: i32) -> Result<Vec<String>, DbErr> {
        let entities = entity::prelude::UserMfa::find()
            .filter(entity::user_mfa::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_mfa::Column::MfaAuth)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|entity| entity.mfa_auth).collect())
    }

    pub async fn has_any(&self, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::UserMfa::find()
            .filter(entity::user_mfa::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Registers a method, replacing the options of an existing registration.
    pub async fn upsert(
        &self,
        user_id: i32,
        method: &str,
        options: Option<String>,
    ) -> Result<(), DbErr> {
        entity::prelude::UserMfa::insert(entity::user_mfa::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            mfa_auth: ActiveValue::Set(method.to_string()),
            options: ActiveValue::Set(options),
        })
        .on_conflict(
            OnConflict::columns([
                entity::user_mfa::Column::UserId,
                entity::user_mfa::Column::MfaAuth,
            ])
            .update_column(entity::user_mfa::Column::Options)
            .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }

    /// Removes a registration.
    ///
    /// # Returns
    /// - `Ok(true)` - Registration removed
    /// - `Ok(false)` - Method was not registered
    pub async fn delete(&self, user_id: i32, method: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::UserMfa::delete_by_id((user_id, method.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
