//! Server group domain models.

use crate::model::server_group::{ServerGroupDto, ServerGroupListItemDto};

#[derive(Debug, Clone, PartialEq)]
pub struct ServerGroup {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
}

impl ServerGroup {
    pub fn from_entity(entity: entity::server_group::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            name: entity.name,
        }
    }

    pub fn into_dto(self) -> ServerGroupDto {
        ServerGroupDto {
            id: self.id,
            name: self.name,
            user_id: self.user_id,
        }
    }

    pub fn into_list_item_dto(self) -> ServerGroupListItemDto {
        ServerGroupListItemDto {
            id: self.id,
            name: self.name,
        }
    }
}

/// A server group as presented in one user's browser tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleServerGroup {
    pub group: ServerGroup,
    /// Whether the group contains at least one shared server.
    pub has_shared_server: bool,
}
