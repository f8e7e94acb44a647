//! Obfuscated-secret codec for operator and server passwords.
//!
//! Stored secrets are bcrypt hashes wrapped in base64 so that config files
//! never carry raw hash bytes. [`decode`] recovers the stored bytes,
//! [`verify`] checks a login attempt against them, and [`generate`]
//! produces a storable string from a plaintext password.
//!
//! Decode failures are returned to the caller; whether a bad entry aborts
//! startup or is skipped is the caller's decision.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use thiserror::Error;

/// Errors from encoding or decoding a stored secret.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The secret (or input to encode) was empty.
    #[error("empty password")]
    Empty,
    /// The stored string was not valid base64.
    #[error("malformed password encoding: {0}")]
    Malformed(#[from] base64::DecodeError),
    /// Hashing a new password failed.
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Encode raw secret bytes into the storable string form.
pub fn encode(secret: &[u8]) -> Result<String, PasswordError> {
    if secret.is_empty() {
        return Err(PasswordError::Empty);
    }
    Ok(BASE64.encode(secret))
}

/// Decode a stored secret string back into raw bytes.
pub fn decode(encoded: &str) -> Result<Vec<u8>, PasswordError> {
    if encoded.is_empty() {
        return Err(PasswordError::Empty);
    }
    Ok(BASE64.decode(encoded)?)
}

/// Hash a plaintext password and encode it into the storable string form.
pub fn generate(plain: &str) -> Result<String, PasswordError> {
    if plain.is_empty() {
        return Err(PasswordError::Empty);
    }
    let hashed = bcrypt::hash(plain, bcrypt::DEFAULT_COST)?;
    encode(hashed.as_bytes())
}

/// Verify a login attempt against decoded secret bytes.
///
/// Bcrypt hashes are recognized by their `$2` prefix; anything else is
/// compared as plaintext.
pub fn verify(attempt: &str, decoded: &[u8]) -> bool {
    match std::str::from_utf8(decoded) {
        Ok(stored) if stored.starts_with("$2") => {
            bcrypt::verify(attempt, stored).unwrap_or(false)
        }
        Ok(stored) => stored == attempt,
        Err(_) => false,
    }
}
