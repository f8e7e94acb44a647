//! Startup invariant checks.
//!
//! The checks run in a fixed order and [`check`] reports only the first
//! violation, so a given broken document always produces the same
//! diagnostic. [`validate`] walks the same order but collects every
//! violation, for tooling that wants the full picture.

use thiserror::Error;

use super::Config;
use crate::hostname::is_hostname;

/// Violations of the startup invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `network.name` was empty or missing.
    #[error("network name missing")]
    MissingNetworkName,
    /// `server.name` was empty or missing.
    #[error("server name missing")]
    MissingServerName,
    /// `server.name` was not a valid hostname.
    #[error("server name must match the format of a hostname")]
    ServerNameNotHostname,
    /// `datastore.path` was empty or missing.
    #[error("datastore path missing")]
    MissingDatastorePath,
    /// `server.listen` had no entries.
    #[error("server listening addresses missing")]
    NoListenAddresses,
    /// One of the limit bounds was out of range.
    #[error("limits aren't setup properly, check them and make them sane")]
    InvalidLimits,
}

// The check order is part of the interface: diagnostics stay deterministic
// across releases. `kicklen` is accepted without a lower bound, unlike its
// sibling fields.
fn violations(config: &Config, first_only: bool) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    macro_rules! fail {
        ($err:expr) => {
            errors.push($err);
            if first_only {
                return errors;
            }
        };
    }

    if config.network.name.is_empty() {
        fail!(ValidationError::MissingNetworkName);
    }
    if config.server.name.is_empty() {
        fail!(ValidationError::MissingServerName);
    } else if !is_hostname(&config.server.name) {
        fail!(ValidationError::ServerNameNotHostname);
    }
    if config.datastore.path.is_empty() {
        fail!(ValidationError::MissingDatastorePath);
    }
    if config.server.listen.is_empty() {
        fail!(ValidationError::NoListenAddresses);
    }
    let limits = &config.limits;
    if limits.nicklen < 1 || limits.channellen < 2 || limits.awaylen < 1 || limits.topiclen < 1 {
        fail!(ValidationError::InvalidLimits);
    }

    errors
}

/// Check the startup invariants in fixed order, returning the first
/// violation. This is what [`Config::load`](super::Config::load) runs.
pub fn check(config: &Config) -> Result<(), ValidationError> {
    match violations(config, true).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Check the startup invariants in fixed order, collecting every
/// violation.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let errors = violations(config, false);
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
