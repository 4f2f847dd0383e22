use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// The catalog holds an auth source name this build does not know.
    #[error("Unknown authentication source '{0}'")]
    UnknownAuthSource(String),

    /// Password hashing failed.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// The crypt key stored in the session is not a valid 32 byte key.
    #[error("Malformed crypt key in session")]
    MalformedCryptKey,

    /// The bundled user agent regexes failed to load.
    #[error("Failed to build user agent parser: {0}")]
    UserAgentParser(String),

    /// The provisioning URI does not fit in a QR code.
    #[error("Failed to build QR code: {0}")]
    QrCode(#[from] qrcode::types::QrError),

    /// The QR code could not be encoded as PNG.
    #[error("Failed to encode QR code image: {0}")]
    QrImage(#[from] image::ImageError),

    /// A provisioning URI could not be built.
    #[error("Failed to build URI: {0}")]
    InvalidUri(#[from] url::ParseError),
}
