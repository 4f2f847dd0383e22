use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "server")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub servergroup_id: i32,
    pub name: String,
    pub host: String,
    pub port: i32,
    pub maintenance_db: String,
    pub username: String,
    /// Encrypted with the owner's crypt key.
    pub password: Option<String>,
    pub save_password: bool,
    pub shared: bool,
    pub comment: Option<String>,
    pub use_ssh_tunnel: bool,
    pub tunnel_host: Option<String>,
    pub tunnel_port: Option<i32>,
    pub tunnel_username: Option<String>,
    /// Encrypted with the owner's crypt key.
    pub tunnel_password: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::server_group::Entity",
        from = "Column::ServergroupId",
        to = "super::server_group::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ServerGroup,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::server_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServerGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
