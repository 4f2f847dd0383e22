//! Per-user preference repository. Values are stored as JSON text.

use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

pub struct UserPreferenceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserPreferenceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the stored value of preference `name`, if the user ever set it.
    pub async fn get(&self, user_id: i32, name: &str) -> Result<Option<String>, DbErr> {
        let entity = entity::prelude::UserPreference::find_by_id((user_id, name.to_string()))
            .one(self.db)
            .await?;

        Ok(entity.map(|entity| entity.value))
    }

    /// Inserts or replaces the value of preference `name`.
    pub async fn set(&self, user_id: i32, name: &str, value: String) -> Result<(), DbErr> {
        entity::prelude::UserPreference::insert(entity::user_preference::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(name.to_string()),
            value: ActiveValue::Set(value),
        })
        .on_conflict(
            OnConflict::columns([
                entity::user_preference::Column::UserId,
                entity::user_preference::Column::Name,
            ])
            .update_column(entity::user_preference::Column::Value)
            .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }
}
