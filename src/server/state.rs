use oauth2::{
    basic::{BasicErrorResponseType, BasicTokenType},
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uaparser::UserAgentParser;

use crate::server::config::Config;

/// Type alias for the OAuth2 client with authorization and token endpoints configured.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Shared handles cloned into every request.
///
/// Initialized once during startup and cloned for each request via Axum's state
/// extraction. Every field is cheap to clone: the database connection is a pool,
/// `reqwest::Client` and the configuration are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the SQLite catalog.
    pub db: DatabaseConnection,

    /// Application configuration read at startup.
    pub config: Arc<Config>,

    /// HTTP client used for OAuth2 token exchange and the userinfo endpoint.
    ///
    /// Configured without redirects to prevent SSRF.
    pub http_client: reqwest::Client,

    /// OAuth2 client, present only when `oauth2` is an enabled authentication source.
    pub oauth_client: Option<OAuth2Client>,

    /// User-Agent parser for the about box, built once from the bundled regexes.
    pub user_agent_parser: Arc<UserAgentParser>,
}

impl AppState {
    /// Wraps the configuration in an `Arc`.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Parsed application configuration
    /// - `http_client` - HTTP client for external requests
    /// - `oauth_client` - OAuth2 client when OAuth2 is configured
    /// - `user_agent_parser` - Parser for User-Agent headers
    pub fn new(
        db: DatabaseConnection,
        config: Config,
        http_client: reqwest::Client,
        oauth_client: Option<OAuth2Client>,
        user_agent_parser: Arc<UserAgentParser>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            http_client,
            oauth_client,
            user_agent_parser,
        }
    }
}
