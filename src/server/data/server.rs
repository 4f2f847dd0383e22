//! Server data repository.
//!
//! Provides `ServerRepository` for registered PostgreSQL servers. Passwords handled here are
//! always the encrypted form; encryption happens in the service layer.

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::server::{CreateServerParams, Server, UpdateServerParams};

pub struct ServerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ServerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a server.
    ///
    /// # Returns
    /// - `Ok(Server)` - The created server
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, params: CreateServerParams) -> Result<Server, DbErr> {
        let entity = entity::server::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            servergroup_id: ActiveValue::Set(params.servergroup_id),
            name: ActiveValue::Set(params.name),
            host: ActiveValue::Set(params.host),
            port: ActiveValue::Set(params.port),
            maintenance_db: ActiveValue::Set(params.maintenance_db),
            username: ActiveValue::Set(params.username),
            password: ActiveValue::Set(params.password),
            save_password: ActiveValue::Set(params.save_password),
            shared: ActiveValue::Set(params.shared),
            comment: ActiveValue::Set(params.comment),
            use_ssh_tunnel: ActiveValue::Set(params.use_ssh_tunnel),
            tunnel_host: ActiveValue::Set(params.tunnel_host),
            tunnel_port: ActiveValue::Set(params.tunnel_port),
            tunnel_username: ActiveValue::Set(params.tunnel_username),
            tunnel_password: ActiveValue::Set(params.tunnel_password),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Server::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Server>, DbErr> {
        let entity = entity::prelude::Server::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Server::from_entity))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Server::find_by_id(id).count(self.db).await?;

        Ok(count > 0)
    }

    /// Lists the servers of a group that `user_id` may see.
    ///
    /// # Arguments
    /// - `servergroup_id` - Group to list
    /// - `user_id` - Viewing user; they see their own servers
    /// - `include_shared` - Whether shared servers of other users are visible too
    pub async fn list_visible_in_group(
        &self,
        servergroup_id: i32,
        user_id: i32,
        include_shared: bool,
    ) -> Result<Vec<Server>, DbErr> {
        let mut visibility = Condition::any().add(entity::server::Column::UserId.eq(user_id));
        if include_shared {
            visibility = visibility.add(entity::server::Column::Shared.eq(true));
        }

        let entities = entity::prelude::Server::find()
            .filter(entity::server::Column::ServergroupId.eq(servergroup_id))
            .filter(visibility)
            .order_by_asc(entity::server::Column::Name)
            .order_by_asc(entity::server::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Server::from_entity).collect())
    }

    /// Lists every server owned by `user_id`.
    pub async fn list_by_user(&self, user_id: i32) -> Result<Vec<Server>, DbErr> {
        let entities = entity::prelude::Server::find()
            .filter(entity::server::Column::UserId.eq(user_id))
            .order_by_asc(entity::server::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Server::from_entity).collect())
    }

    /// Checks whether a group holds at least one shared server.
    pub async fn has_shared_in_group(&self, servergroup_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Server::find()
            .filter(entity::server::Column::ServergroupId.eq(servergroup_id))
            .filter(entity::server::Column::Shared.eq(true))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Ids of all groups holding at least one shared server.
    pub async fn group_ids_with_shared_servers(&self) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Server::find()
            .select_only()
            .column(entity::server::Column::ServergroupId)
            .filter(entity::server::Column::Shared.eq(true))
            .distinct()
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Some(Server))` - The updated server
    /// - `Ok(None)` - No server with that id
    pub async fn update(
        &self,
        id: i32,
        params: UpdateServerParams,
    ) -> Result<Option<Server>, DbErr> {
        let Some(entity) = entity::prelude::Server::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::server::ActiveModel = entity.into();

        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(host) = params.host {
            active.host = ActiveValue::Set(host);
        }
        if let Some(port) = params.port {
            active.port = ActiveValue::Set(port);
        }
        if let Some(maintenance_db) = params.maintenance_db {
            active.maintenance_db = ActiveValue::Set(maintenance_db);
        }
        if let Some(username) = params.username {
            active.username = ActiveValue::Set(username);
        }
        if let Some(password) = params.password {
            active.password = ActiveValue::Set(Some(password));
        }
        if let Some(save_password) = params.save_password {
            active.save_password = ActiveValue::Set(save_password);
        }
        if let Some(shared) = params.shared {
            active.shared = ActiveValue::Set(shared);
        }
        if let Some(comment) = params.comment {
            active.comment = ActiveValue::Set(Some(comment));
        }
        if let Some(use_ssh_tunnel) = params.use_ssh_tunnel {
            active.use_ssh_tunnel = ActiveValue::Set(use_ssh_tunnel);
        }
        if let Some(tunnel_host) = params.tunnel_host {
            active.tunnel_host = ActiveValue::Set(Some(tunnel_host));
        }
        if let Some(tunnel_port) = params.tunnel_port {
            active.tunnel_port = ActiveValue::Set(Some(tunnel_port));
        }
        if let Some(tunnel_username) = params.tunnel_username {
            active.tunnel_username = ActiveValue::Set(Some(tunnel_username));
        }
        if let Some(tunnel_password) = params.tunnel_password {
            active.tunnel_password = ActiveValue::Set(Some(tunnel_password));
        }

        let entity = active.update(self.db).await?;

        Ok(Some(Server::from_entity(entity)))
    }

    /// Replaces both stored passwords of a server.
    pub async fn update_passwords(
        &self,
        id: i32,
        password: Option<String>,
        tunnel_password: Option<String>,
    ) -> Result<(), DbErr> {
        entity::prelude::Server::update_many()
            .filter(entity::server::Column::Id.eq(id))
            .col_expr(entity::server::Column::Password, Expr::value(password))
            .col_expr(
                entity::server::Column::TunnelPassword,
                Expr::value(tunnel_password),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Forgets the saved passwords of one server.
    pub async fn clear_saved_password(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Server::update_many()
            .filter(entity::server::Column::Id.eq(id))
            .col_expr(entity::server::Column::Password, Expr::value(None::<String>))
            .col_expr(entity::server::Column::SavePassword, Expr::value(false))
            .col_expr(
                entity::server::Column::TunnelPassword,
                Expr::value(None::<String>),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Forgets the saved passwords of every server owned by `user_id`.
    pub async fn clear_saved_passwords_for_user(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::Server::update_many()
            .filter(entity::server::Column::UserId.eq(user_id))
            .col_expr(entity::server::Column::Password, Expr::value(None::<String>))
            .col_expr(entity::server::Column::SavePassword, Expr::value(false))
            .col_expr(
                entity::server::Column::TunnelPassword,
                Expr::value(None::<String>),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Server::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(())
    }
}
