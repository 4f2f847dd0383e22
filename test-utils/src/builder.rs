use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for test contexts backed by an in-memory SQLite catalog.
///
/// Tables are generated from the SeaORM entities with the SQLite backend and created in the
/// order they were added, so referenced tables must come before the tables referencing them.
///
/// ```rust,ignore
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(ServerGroup)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds the CREATE TABLE statement generated from `entity`.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user and server group tables.
    ///
    /// Enough for tests of the browser tree root and group management.
    pub fn with_group_tables(self) -> Self {
        self.with_table(User).with_table(ServerGroup)
    }

    /// Adds every catalog table in dependency order:
    /// - User
    /// - ServerGroup
    /// - Server
    /// - UserMfa
    /// - UserPreference
    pub fn with_catalog_tables(self) -> Self {
        self.with_group_tables()
            .with_table(Server)
            .with_table(UserMfa)
            .with_table(UserPreference)
    }

    /// Connects to a fresh in-memory database and creates the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with the schema in place
    /// - `Err(TestError::Database)` - Connection or table creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();

        context.with_tables(self.tables).await?;

        Ok(context)
    }
}
