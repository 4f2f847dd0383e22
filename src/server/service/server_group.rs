//! Server group business logic.
//!
//! Groups are the root level of the browser tree. A user always keeps their first group,
//! and groups holding shared servers cannot be deleted because other users see them. In
//! server mode a user also sees foreign groups that contain shared servers, unless they
//! opted out through the `browser.hide_shared_server` preference.

use serde_json::{json, Map, Value};
use std::collections::HashSet;

use sea_orm::DatabaseConnection;

use crate::{
    model::browser::BrowserNode,
    server::{
        config::Config,
        data::{server::ServerRepository, server_group::ServerGroupRepository},
        error::AppError,
        model::server_group::{ServerGroup, VisibleServerGroup},
        service::preference::PreferenceService,
        util::browser_node::{generate_browser_node, server_group_icon},
    },
};

pub const SERVER_GROUP_NODE: &str = "server_group";

pub const SG_NOT_FOUND: &str = "The specified server group could not be found.";
pub const SG_NODE_NOT_FOUND: &str = "Could not find the server group.";
const SG_CANNOT_DELETE: &str = "The specified server group cannot be deleted.";
const SG_ALREADY_EXISTS: &str = "The specified server group already exists.";
const SG_NAME_MISSING: &str = "No server group name was specified";

pub struct ServerGroupService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> ServerGroupService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Lists the user's own groups ordered by name.
    pub async fn list(&self, user_id: i32) -> Result<Vec<ServerGroup>, AppError> {
        let groups = ServerGroupRepository::new(self.db)
            .list_by_user_ordered_by_name(user_id)
            .await?;

        Ok(groups)
    }

    /// Returns a group by id.
    ///
    /// # Returns
    /// - `Ok(ServerGroup)` - The group
    /// - `Err(AppError::Gone)` - No group with that id
    pub async fn properties(&self, gid: i32) -> Result<ServerGroup, AppError> {
        ServerGroupRepository::new(self.db)
            .find_by_id(gid)
            .await?
            .ok_or_else(|| AppError::Gone(SG_NOT_FOUND.to_string()))
    }

    /// Creates a group for the user and returns its browser node.
    ///
    /// # Returns
    /// - `Ok(BrowserNode)` - Node of the new group
    /// - `Err(AppError::ExpectationFailed)` - Name missing or empty
    /// - `Err(AppError::BadRequest)` - The user already has a group with that name
    pub async fn create(&self, user_id: i32, name: Option<String>) -> Result<BrowserNode, AppError> {
        let name = match name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(AppError::ExpectationFailed(SG_NAME_MISSING.to_string())),
        };

        let repo = ServerGroupRepository::new(self.db);
        if repo.exists_by_name(user_id, &name, None).await? {
            return Err(AppError::BadRequest(SG_ALREADY_EXISTS.to_string()));
        }

        let group = repo.create(user_id, &name).await?;

        Ok(self.browser_node(&group, user_id, false, Some(true)))
    }

    /// Renames one of the user's groups and returns its browser node.
    ///
    /// # Returns
    /// - `Ok(BrowserNode)` - Node of the group after the update
    /// - `Err(AppError::ExpectationFailed)` - Group not owned by the user, or empty name
    /// - `Err(AppError::BadRequest)` - The user already has a group with that name
    pub async fn update(
        &self,
        user_id: i32,
        gid: i32,
        name: Option<String>,
    ) -> Result<BrowserNode, AppError> {
        let repo = ServerGroupRepository::new(self.db);

        let Some(mut group) = repo.find_for_user(gid, user_id).await? else {
            return Err(AppError::ExpectationFailed(SG_NOT_FOUND.to_string()));
        };

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(AppError::ExpectationFailed(SG_NAME_MISSING.to_string()));
            }
            if repo.exists_by_name(user_id, &name, Some(gid)).await? {
                return Err(AppError::BadRequest(SG_ALREADY_EXISTS.to_string()));
            }

            group = repo
                .update_name(gid, &name)
                .await?
                .ok_or_else(|| AppError::ExpectationFailed(SG_NOT_FOUND.to_string()))?;
        }

        let has_shared = ServerRepository::new(self.db)
            .has_shared_in_group(gid)
            .await?;

        Ok(self.browser_node(&group, user_id, has_shared, Some(true)))
    }

    /// Deletes one of the user's groups with its servers.
    ///
    /// Checks run in order: shared servers, default group, ownership.
    ///
    /// # Returns
    /// - `Ok(())` - Group deleted
    /// - `Err(AppError::ExpectationFailed)` - Group holds a shared server or is the user's first group
    /// - `Err(AppError::Gone)` - Group does not belong to the user
    pub async fn delete(&self, user_id: i32, gid: i32) -> Result<(), AppError> {
        let repo = ServerGroupRepository::new(self.db);

        if ServerRepository::new(self.db)
            .has_shared_in_group(gid)
            .await?
        {
            return Err(AppError::ExpectationFailed(SG_CANNOT_DELETE.to_string()));
        }

        if let Some(first) = repo.first_for_user(user_id).await? {
            if first.id == gid {
                return Err(AppError::ExpectationFailed(SG_CANNOT_DELETE.to_string()));
            }
        }

        let Some(group) = repo.find_for_user(gid, user_id).await? else {
            return Err(AppError::Gone(SG_NOT_FOUND.to_string()));
        };

        repo.delete(group.id).await?;

        tracing::info!("User {} deleted server group {}", user_id, group.id);

        Ok(())
    }

    /// Groups shown in server mode: the user's own groups plus foreign groups holding
    /// shared servers, the latter dropped when the user hides shared servers.
    pub async fn get_all_server_groups(
        &self,
        user_id: i32,
    ) -> Result<Vec<VisibleServerGroup>, AppError> {
        let hide_shared_server = PreferenceService::new(self.db, self.config)
            .hide_shared_server(user_id)
            .await?;

        let shared_group_ids: HashSet<i32> = ServerRepository::new(self.db)
            .group_ids_with_shared_servers()
            .await?
            .into_iter()
            .collect();

        let repo = ServerGroupRepository::new(self.db);
        let mut group_ids: Vec<i32> = repo
            .list_by_user(user_id)
            .await?
            .into_iter()
            .map(|group| group.id)
            .collect();
        if !hide_shared_server {
            group_ids.extend(shared_group_ids.iter().copied());
        }
        group_ids.sort_unstable();
        group_ids.dedup();

        let groups = repo
            .find_by_ids(group_ids)
            .await?
            .into_iter()
            .map(|group| VisibleServerGroup {
                has_shared_server: shared_group_ids.contains(&group.id),
                group,
            })
            .collect();

        Ok(groups)
    }

    /// Groups visible to the user in the current mode, in creation order.
    pub async fn visible_groups(&self, user_id: i32) -> Result<Vec<VisibleServerGroup>, AppError> {
        if self.config.server_mode {
            return self.get_all_server_groups(user_id).await;
        }

        let servers = ServerRepository::new(self.db);
        let mut visible = Vec::new();
        for group in ServerGroupRepository::new(self.db)
            .list_by_user(user_id)
            .await?
        {
            let has_shared_server = servers.has_shared_in_group(group.id).await?;
            visible.push(VisibleServerGroup {
                group,
                has_shared_server,
            });
        }

        Ok(visible)
    }

    /// Browser nodes of all visible groups.
    pub async fn nodes(&self, user_id: i32) -> Result<Vec<BrowserNode>, AppError> {
        let nodes = self
            .visible_groups(user_id)
            .await?
            .iter()
            .map(|visible| {
                self.browser_node(&visible.group, user_id, visible.has_shared_server, None)
            })
            .collect();

        Ok(nodes)
    }

    /// Browser node of a single group.
    ///
    /// # Returns
    /// - `Ok(BrowserNode)` - Node of the group
    /// - `Err(AppError::Gone)` - No group with that id
    pub async fn node(&self, user_id: i32, gid: i32) -> Result<BrowserNode, AppError> {
        let Some(group) = ServerGroupRepository::new(self.db).find_by_id(gid).await? else {
            return Err(AppError::Gone(SG_NODE_NOT_FOUND.to_string()));
        };

        let has_shared = ServerRepository::new(self.db)
            .has_shared_in_group(gid)
            .await?;

        Ok(self.browser_node(&group, user_id, has_shared, None))
    }

    /// Root level nodes of the browser tree.
    ///
    /// The first group cannot be deleted; every node carries the owning `user_id`.
    pub async fn get_nodes(&self, user_id: i32) -> Result<Vec<BrowserNode>, AppError> {
        let nodes = self
            .visible_groups(user_id)
            .await?
            .iter()
            .enumerate()
            .map(|(idx, visible)| {
                let mut node = self.browser_node(
                    &visible.group,
                    user_id,
                    visible.has_shared_server,
                    Some(idx > 0),
                );
                node.extra
                    .insert("user_id".to_string(), json!(visible.group.user_id));
                node
            })
            .collect();

        Ok(nodes)
    }

    fn browser_node(
        &self,
        group: &ServerGroup,
        user_id: i32,
        has_shared_server: bool,
        can_delete: Option<bool>,
    ) -> BrowserNode {
        let icon = server_group_icon(
            self.config.server_mode,
            group.user_id,
            user_id,
            has_shared_server,
        );

        let mut extra = Map::new();
        if let Some(can_delete) = can_delete {
            extra.insert("can_delete".to_string(), Value::Bool(can_delete));
        }

        generate_browser_node(
            SERVER_GROUP_NODE,
            group.id,
            None,
            &group.name,
            icon,
            true,
            extra,
        )
    }
}
