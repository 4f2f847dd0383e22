use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ServerGroupDto {
    pub id: i32,
    pub name: String,
    pub user_id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ServerGroupListItemDto {
    pub id: i32,
    pub name: String,
}

/// Payload for creating or renaming a server group.
///
/// On update a missing `name` leaves the group unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct ServerGroupPayloadDto {
    pub name: Option<String>,
}
