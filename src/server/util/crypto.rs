//! Encryption of saved server passwords.
//!
//! Values are sealed with AES-256-GCM under a key derived from the user's crypt-key
//! material (login password, or `fs_uniquifier` for password-less sources). The stored
//! form is base64 of `nonce || ciphertext`.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{prelude::BASE64_STANDARD, Engine};
use sha2::{Digest, Sha256};

use crate::server::error::crypto::CryptoError;

const NONCE_LEN: usize = 12;

/// 256-bit encryption key.
pub type CryptKey = [u8; 32];

/// Derives the encryption key from crypt-key material.
pub fn derive_key(material: &str) -> CryptKey {
    Sha256::digest(material.as_bytes()).into()
}

/// Encrypts `plaintext`, returning base64 of `nonce || ciphertext`.
pub fn encrypt(plaintext: &str, key: &CryptKey) -> Result<String, CryptoError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|_| CryptoError::Encrypt)?;

    let mut sealed = nonce.to_vec();
    sealed.extend_from_slice(&ciphertext);

    Ok(BASE64_STANDARD.encode(sealed))
}

/// Decrypts a value produced by [`encrypt`].
///
/// # Returns
/// - `Ok(String)` - The plaintext
/// - `Err(CryptoError::Decrypt)` - Wrong key or tampered value
/// - `Err(CryptoError::Encoding | Truncated | Utf8)` - Malformed input
pub fn decrypt(sealed: &str, key: &CryptKey) -> Result<String, CryptoError> {
    let bytes = BASE64_STANDARD.decode(sealed)?;
    if bytes.len() <= NONCE_LEN {
        return Err(CryptoError::Truncated);
    }

    let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::Decrypt)?;

    Ok(String::from_utf8(plaintext)?)
}

/// Encodes a key for storage in the session.
pub fn encode_key(key: &CryptKey) -> String {
    BASE64_STANDARD.encode(key)
}

/// Decodes a key stored with [`encode_key`]; `None` when malformed.
pub fn decode_key(encoded: &str) -> Option<CryptKey> {
    let bytes = BASE64_STANDARD.decode(encoded).ok()?;
    bytes.try_into().ok()
}
