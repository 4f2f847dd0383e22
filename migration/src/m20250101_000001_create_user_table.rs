use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string(User::Username))
                    .col(string_null(User::Email))
                    .col(string_null(User::Password))
                    .col(boolean(User::Active).default(true))
                    .col(string(User::Role).default("User"))
                    .col(string(User::AuthSource).default("internal"))
                    .col(integer(User::LoginAttempts).default(0))
                    .col(boolean(User::Locked).default(false))
                    .col(string(User::FsUniquifier))
                    .to_owned(),
            )
            .await?;

        // The same username may exist once per authentication source
        manager
            .create_index(
                Index::create()
                    .name("idx_user_username_auth_source")
                    .table(User::Table)
                    .col(User::Username)
                    .col(User::AuthSource)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Username,
    Email,
    Password,
    Active,
    Role,
    AuthSource,
    LoginAttempts,
    Locked,
    FsUniquifier,
}
