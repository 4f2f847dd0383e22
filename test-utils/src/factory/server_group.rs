//! Server group factory.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Builder for server group records owned by `user_id`.
///
/// Default name: `Group {n}`.
pub struct ServerGroupFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    name: String,
}

impl<'a> ServerGroupFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            name: format!("Group {}", next_id()),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub async fn build(self) -> Result<entity::server_group::Model, DbErr> {
        entity::server_group::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            name: ActiveValue::Set(self.name),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a group with a generated name for `user_id`.
pub async fn create_server_group(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::server_group::Model, DbErr> {
    ServerGroupFactory::new(db, user_id).build().await
}
