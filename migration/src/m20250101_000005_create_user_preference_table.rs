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
                    .table(UserPreference::Table)
                    .if_not_exists()
                    .col(integer(UserPreference::UserId))
                    .col(string(UserPreference::Name))
                    .col(string(UserPreference::Value))
                    .primary_key(
                        Index::create()
                            .col(UserPreference::UserId)
                            .col(UserPreference::Name),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_preference_user_id")
                            .from(UserPreference::Table, UserPreference::UserId)
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
            .drop_table(Table::drop().table(UserPreference::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserPreference {
    Table,
    UserId,
    Name,
    Value,
}
