//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions and the loader
//! - [`listen`]: TLS listener material (cert/key pairs)
//! - [`oper`]: Operator secret holders
//! - [`limits`]: Numeric protocol limits
//! - [`registration`]: Account registration (mail callback) settings
//! - [`validation`]: Fail-fast startup invariant checks
//! - [`resolve`]: On-demand derivation of the runtime operator and TLS maps

mod limits;
mod listen;
mod oper;
mod registration;
mod resolve;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::{TlsListenConfig, TlsMaterialError};
pub use oper::SecretConfig;
pub use registration::{AccountRegistrationConfig, CallbacksConfig, MailtoConfig, MailtoTlsConfig};
pub use resolve::{EntryError, ResolveError, Resolved};
pub use types::{
    Config, ConfigError, DatastoreConfig, NetworkConfig, RegistrationConfig, ServerConfig,
};
pub use validation::{ValidationError, check, validate};
