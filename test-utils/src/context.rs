use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Test environment holding the catalog connection and a session.
///
/// Both are created lazily on first access. The session store lives in the same in-memory
/// database as the catalog, mirroring the production setup where sessions share the pool.
pub struct TestContext {
    /// In-memory SQLite catalog, created by `database()`.
    pub db: Option<DatabaseConnection>,

    /// Session created by `session()`.
    pub session: Option<Session>,

    store: Option<Arc<SqliteStore>>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
            store: None,
        }
    }

    /// Gets or creates the in-memory database connection.
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let db = Database::connect("sqlite::memory:").await?;

                Ok(&*self.db.insert(db))
            }
        }
    }

    /// Executes the CREATE TABLE statements in order.
    ///
    /// Usually called by `TestBuilder::build()`.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Gets or creates the session store, migrating its table on first use.
    async fn store(&mut self) -> Result<Arc<SqliteStore>, TestError> {
        if let Some(store) = &self.store {
            return Ok(store.clone());
        }

        let pool = self.database().await?.get_sqlite_connection_pool().clone();
        let store = SqliteStore::new(pool);
        store
            .migrate()
            .await
            .map_err(|e| TestError::SessionStore(e.to_string()))?;

        let store = Arc::new(store);
        self.store = Some(store.clone());

        Ok(store)
    }

    /// Gets or creates the shared test session.
    ///
    /// The session uses the same 7 day inactivity expiry as the application.
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        if self.session.is_none() {
            let session = self.new_session().await?;
            self.session = Some(session);
        }

        match self.session {
            Some(ref session) => Ok(session),
            None => unreachable!("session initialized above"),
        }
    }

    /// Creates an additional, independent session on the same store.
    ///
    /// Useful when a test needs two users logged in at the same time.
    pub async fn new_session(&mut self) -> Result<Session, TestError> {
        let store = self.store().await?;

        Ok(Session::new(
            None,
            store,
            Some(Expiry::OnInactivity(Duration::days(7))),
        ))
    }

    /// Gets or creates both the database and the shared session.
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.database().await?;
        self.session().await?;

        match (self.db.as_ref(), self.session.as_ref()) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => unreachable!("database and session initialized above"),
        }
    }
}
