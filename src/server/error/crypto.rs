use thiserror::Error;

/// Failures of saved-password encryption.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Failed to encrypt value")]
    Encrypt,

    /// Wrong key or tampered ciphertext.
    #[error("Failed to decrypt value")]
    Decrypt,

    #[error("Ciphertext is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Ciphertext is too short")]
    Truncated,

    #[error("Decrypted value is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A password was supplied to be saved but the session holds no crypt key.
    #[error("No crypt key available in the session")]
    MissingKey,
}
