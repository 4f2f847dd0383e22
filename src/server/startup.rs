use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::user::UserService,
    state::OAuth2Client,
};

const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite catalog using the connection string from
/// configuration, then runs all pending SeaORM migrations. This must complete before the
/// application can access the catalog.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the catalog's connection pool.
///
/// Sessions expire after seven days of inactivity. The cookie is only marked secure when
/// the application is served over https.
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool().clone();

    let session_store = SqliteStore::new(pool);
    session_store
        .migrate()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to migrate session store: {}", e)))?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.app_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_INACTIVITY_DAYS)));

    Ok(session_layer)
}

/// HTTP client for the OAuth2 token and userinfo requests.
///
/// Redirects are disabled to prevent SSRF.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Builds the OAuth2 client when an OAuth2 provider is configured.
///
/// # Returns
/// - `Ok(None)` - OAuth2 is not configured
/// - `Err(ConfigError::InvalidUrl)` - A provider endpoint is malformed
pub fn setup_oauth_client(config: &Config) -> Result<Option<OAuth2Client>, ConfigError> {
    let Some(oauth2) = config.oauth2.as_ref() else {
        return Ok(None);
    };

    let invalid_url = |key: &str| {
        let key = key.to_string();
        move |source: url::ParseError| ConfigError::InvalidUrl { key, source }
    };

    let client = BasicClient::new(ClientId::new(oauth2.client_id.clone()))
        .set_client_secret(ClientSecret::new(oauth2.client_secret.clone()))
        .set_auth_uri(
            AuthUrl::new(oauth2.authorization_url.clone())
                .map_err(invalid_url("OAUTH2_AUTHORIZATION_URL"))?,
        )
        .set_token_uri(
            TokenUrl::new(oauth2.token_url.clone()).map_err(invalid_url("OAUTH2_TOKEN_URL"))?,
        )
        .set_redirect_uri(
            RedirectUrl::new(oauth2.redirect_url.clone())
                .map_err(invalid_url("OAUTH2_REDIRECT_URL"))?,
        );

    Ok(Some(client))
}

/// Creates the administrator from `DEFAULT_EMAIL`/`DEFAULT_PASSWORD` on an empty catalog.
pub async fn create_default_admin(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    if let Some(admin) = UserService::new(db).create_default_admin(config).await? {
        tracing::info!("Created default administrator {}", admin.username);
    }

    Ok(())
}
