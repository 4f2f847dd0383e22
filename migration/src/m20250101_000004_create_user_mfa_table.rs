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
                    .table(UserMfa::Table)
                    .if_not_exists()
                    .col(integer(UserMfa::UserId))
                    .col(string(UserMfa::MfaAuth))
                    .col(string_null(UserMfa::Options))
                    .primary_key(Index::create().col(UserMfa::UserId).col(UserMfa::MfaAuth))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_mfa_user_id")
                            .from(UserMfa::Table, UserMfa::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserMfa::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserMfa {
    Table,
    UserId,
    MfaAuth,
    Options,
}
