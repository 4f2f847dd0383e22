use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    /// Argon2 PHC string, absent for users authenticated by an external source.
    pub password: Option<String>,
    pub active: bool,
    pub role: String,
    pub auth_source: String,
    pub login_attempts: i32,
    pub locked: bool,
    /// Random per-user value used as crypt-key material for password-less sources.
    pub fs_uniquifier: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::server_group::Entity")]
    ServerGroup,
    #[sea_orm(has_many = "super::server::Entity")]
    Server,
    #[sea_orm(has_many = "super::user_mfa::Entity")]
    UserMfa,
    #[sea_orm(has_many = "super::user_preference::Entity")]
    UserPreference,
}

impl Related<super::server_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServerGroup.def()
    }
}

impl Related<super::server::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Server.def()
    }
}

impl Related<super::user_mfa::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserMfa.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
