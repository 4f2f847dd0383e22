use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// Check `.env.example` for the variables each authentication source needs.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed.
    #[error("Invalid value '{value}' for environment variable {key}")]
    InvalidValue { key: String, value: String },

    /// A configured URL (OAuth2 endpoints, application URL) is malformed.
    #[error("Invalid URL for {key}: {source}")]
    InvalidUrl {
        key: String,
        #[source]
        source: url::ParseError,
    },
}
