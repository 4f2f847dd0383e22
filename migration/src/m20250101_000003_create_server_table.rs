use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20250101_000001_create_user_table::User,
    m20250101_000002_create_server_group_table::ServerGroup,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Server::Table)
                    .if_not_exists()
                    .col(pk_auto(Server::Id))
                    .col(integer(Server::UserId))
                    .col(integer(Server::ServergroupId))
                    .col(string(Server::Name))
                    .col(string(Server::Host))
                    .col(integer(Server::Port).default(5432))
                    .col(string(Server::MaintenanceDb).default("postgres"))
                    .col(string(Server::Username))
                    .col(string_null(Server::Password))
                    .col(boolean(Server::SavePassword).default(false))
                    .col(boolean(Server::Shared).default(false))
                    .col(string_null(Server::Comment))
                    .col(boolean(Server::UseSshTunnel).default(false))
                    .col(string_null(Server::TunnelHost))
                    .col(integer_null(Server::TunnelPort))
                    .col(string_null(Server::TunnelUsername))
                    .col(string_null(Server::TunnelPassword))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_user_id")
                            .from(Server::Table, Server::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_servergroup_id")
                            .from(Server::Table, Server::ServergroupId)
                            .to(ServerGroup::Table, ServerGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Server::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Server {
    Table,
    Id,
    UserId,
    ServergroupId,
    Name,
    Host,
    Port,
    MaintenanceDb,
    Username,
    Password,
    SavePassword,
    Shared,
    Comment,
    UseSshTunnel,
    TunnelHost,
    TunnelPort,
    TunnelUsername,
    TunnelPassword,
}
