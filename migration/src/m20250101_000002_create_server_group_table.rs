use sea_orm_migration::{prelude::*, schema::*};

use super::m20250101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServerGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(ServerGroup::Id))
                    .col(integer(ServerGroup::UserId))
                    .col(string(ServerGroup::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_server_group_user_id")
                            .from(ServerGroup::Table, ServerGroup::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_server_group_user_id_name")
                    .table(ServerGroup::Table)
                    .col(ServerGroup::UserId)
                    .col(ServerGroup::Name)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServerGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ServerGroup {
    Table,
    Id,
    UserId,
    Name,
}
