//! Server group data repository.
//!
//! Provides `ServerGroupRepository` for the folders of the browser tree. Name uniqueness per
//! user is checked here so callers can report duplicates before the insert.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::server_group::ServerGroup;

pub struct ServerGroupRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ServerGroupRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a server group owned by `user_id`.
    ///
    /// # Returns
    /// - `Ok(ServerGroup)` - The created group
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, user_id: i32, name: &str) -> Result<ServerGroup, DbErr> {
        let entity = entity::server_group::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ServerGroup::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ServerGroup>, DbErr> {
        let entity = entity::prelude::ServerGroup::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(ServerGroup::from_entity))
    }

    /// Finds a group only if it is owned by `user_id`.
    pub async fn find_for_user(&self, id: i32, user_id: i32) -> Result<Option<ServerGroup>, DbErr> {
        let entity = entity::prelude::ServerGroup::find_by_id(id)
            .filter(entity::server_group::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;

        Ok(entity.map(ServerGroup::from_entity))
    }

    /// Lists the groups owned by `user_id` ordered by name.
    pub async fn list_by_user_ordered_by_name(
        &self,
        user_id: i32,
    ) -> Result<Vec<ServerGroup>, DbErr> {
        let entities = entity::prelude::ServerGroup::find()
            .filter(entity::server_group::Column::UserId.eq(user_id))
            .order_by_asc(entity::server_group::Column::Name)
            .order_by_asc(entity::server_group::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ServerGroup::from_entity).collect())
    }

    /// Lists the groups owned by `user_id` in creation order.
    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<ServerGroup>, DbErr> {
        let entities = entity::prelude::ServerGroup::find()
            .filter(entity::server_group::Column::UserId.eq(user_id))
            .order_by_asc(entity::server_group::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ServerGroup::from_entity).collect())
    }

    /// Returns the user's default group, i.e. the one with the lowest id.
    pub async fn first_for_user(&self, user_id: i32) -> Result<Option<ServerGroup>, DbErr> {
        let entity = entity::prelude::ServerGroup::find()
            .filter(entity::server_group::Column::UserId.eq(user_id))
            .order_by_asc(entity::server_group::Column::Id)
            .one(self.db)
            .await?;

        Ok(entity.map(ServerGroup::from_entity))
    }

    /// Lists the groups with the given ids in creation order.
    pub async fn find_by_ids(&self, ids: Vec<i32>) -> Result<Vec<ServerGroup>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::ServerGroup::find()
            .filter(entity::server_group::Column::Id.is_in(ids))
            .order_by_asc(entity::server_group::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ServerGroup::from_entity).collect())
    }

    /// Checks whether `user_id` already owns a group called `name`.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the groups to check
    /// - `name` - Name to look for
    /// - `exclude_id` - Group to ignore, used when renaming a group to its own name
    pub async fn exists_by_name(
        &self,
        user_id: i32,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::ServerGroup::find()
            .filter(entity::server_group::Column::UserId.eq(user_id))
            .filter(entity::server_group::Column::Name.eq(name));

        if let Some(id) = exclude_id {
            query = query.filter(entity::server_group::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Renames a group.
    ///
    /// # Returns
    /// - `Ok(Some(ServerGroup))` - The renamed group
    /// - `Ok(None)` - No group with that id
    pub async fn update_name(&self, id: i32, name: &str) -> Result<Option<ServerGroup>, DbErr> {
        entity::prelude::ServerGroup::update_many()
            .filter(entity::server_group::Column::Id.eq(id))
            .col_expr(
                entity::server_group::Column::Name,
                Expr::value(name.to_string()),
            )
            .exec(self.db)
            .await?;

        self.find_by_id(id).await
    }

    /// Deletes a group together with its servers.
    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Server::delete_many()
            .filter(entity::server::Column::ServergroupId.eq(id))
            .exec(self.db)
            .await?;

        entity::prelude::ServerGroup::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
