//! Core configuration types and loading.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::listen::TlsListenConfig;
use super::oper::SecretConfig;
use super::registration::AccountRegistrationConfig;
use super::validation;
use crate::password::{self, PasswordError};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The document was structurally malformed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A startup invariant was violated.
    #[error("invalid config: {0}")]
    Invalid(#[from] validation::ValidationError),
}

/// Root configuration aggregate.
///
/// Built once at process start and read-only thereafter. Every section
/// defaults to its zero value so a missing section is reported by the
/// invariant checks, with a stable message, rather than as a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network identity.
    pub network: NetworkConfig,
    /// Server identity, bind addresses, and listener material.
    pub server: ServerConfig,
    /// Persistent datastore location.
    pub datastore: DatastoreConfig,
    /// Account registration settings.
    pub registration: RegistrationConfig,
    /// Raw operator name → secret holder.
    pub operator: HashMap<String, SecretConfig>,
    /// Numeric protocol limits.
    pub limits: LimitsConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    ///
    /// Invariants are checked in a fixed order and the first violation is
    /// returned, so a given broken document always produces the same
    /// diagnostic. Use [`validate`](super::validate) to collect every
    /// violation instead.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        validation::check(&config)?;
        Ok(config)
    }
}

/// Network identity configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Name of the IRC network this server belongs to.
    pub name: String,
}

/// Server identity and listener configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ServerConfig {
    /// Connection password, in the encoded form produced by
    /// [`crate::password::generate`]. This field is the single source for
    /// the server secret; [`ServerConfig::password_bytes`] is the one
    /// decoding step.
    pub password: Option<String>,
    /// Server name; must have the format of a hostname.
    pub name: String,
    /// Addresses to bind plaintext/TLS listeners to (e.g. "0.0.0.0:6667").
    pub listen: Vec<String>,
    /// Optional WebSocket bind address.
    pub ws_listen: Option<String>,
    /// Listener label → TLS cert/key pair.
    pub tls_listeners: HashMap<String, TlsListenConfig>,
    /// Whether to perform ident (RFC 1413) checks on connecting clients.
    pub check_ident: bool,
    /// Log file path.
    pub log: Option<String>,
    /// MOTD file path.
    pub motd: Option<String>,
    /// Addresses trusted to proxy client connections (WEBIRC).
    pub proxy_allowed_from: Vec<String>,
}

impl ServerConfig {
    /// Decode the configured connection password, if any.
    pub fn password_bytes(&self) -> Result<Option<Vec<u8>>, PasswordError> {
        self.password.as_deref().map(password::decode).transpose()
    }
}

/// Persistent datastore configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatastoreConfig {
    /// Path to the datastore file.
    pub path: String,
}

/// Account registration configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Account verification settings.
    pub accounts: AccountRegistrationConfig,
}
