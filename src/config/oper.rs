//! Operator secret holders.

use serde::Deserialize;

use crate::password::{self, PasswordError};

/// A stored secret, as it appears in an `[operator.<name>]` block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretConfig {
    /// The secret in the encoded form produced by
    /// [`crate::password::generate`].
    pub password: String,
}

impl SecretConfig {
    /// Decode the stored secret into raw bytes.
    pub fn decoded(&self) -> Result<Vec<u8>, PasswordError> {
        password::decode(&self.password)
    }
}
