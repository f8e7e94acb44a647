//! corvus-core - Configuration and identity core for the Corvus IRC daemon.
//!
//! This crate owns everything the daemon needs before it can accept its
//! first connection, and the identity helpers it keeps calling afterwards:
//!
//! - [`config`]: TOML configuration loading with fail-fast invariant
//!   checks, plus on-demand derivation of the runtime operator and TLS
//!   listener maps
//! - [`casemap`]: RFC 1459 casefolding and the [`CanonicalName`] key type
//! - [`hostname`]: DNS-style hostname grammar validation
//! - [`lookup`]: reverse-DNS hostname resolution with an injectable
//!   resolver backend and a bounded timeout
//! - [`password`]: the obfuscated-secret codec used for operator and
//!   server passwords
//!
//! The accept loop, protocol parsing, and channel/client state live in the
//! daemon proper; they consume the types produced here.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod casemap;
pub mod config;
pub mod hostname;
pub mod lookup;
pub mod password;

pub use casemap::{CanonicalName, casefold_name};
pub use config::Config;
pub use hostname::is_hostname;
pub use lookup::{DnsResolver, HostnameResolver, ip_string};
