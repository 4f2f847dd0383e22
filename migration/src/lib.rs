pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user_table;
mod m20250101_000002_create_server_group_table;
mod m20250101_000003_create_server_table;
mod m20250101_000004_create_user_mfa_table;
mod m20250101_000005_create_user_preference_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user_table::Migration),
            Box::new(m20250101_000002_create_server_group_table::Migration),
            Box::new(m20250101_000003_create_server_table::Migration),
            Box::new(m20250101_000004_create_user_mfa_table::Migration),
            Box::new(m20250101_000005_create_user_preference_table::Migration),
        ]
    }
}
