//! On-demand derivation of runtime maps from the validated config.
//!
//! Nothing here is cached: the network layer and auth layer call these at
//! the moment they need the maps, and each call re-reads the config and
//! re-loads material from disk.
//!
//! Two failure severities apply per entry. A name that cannot be
//! canonicalized is logged and skipped; the rest of the map is unaffected.
//! A value that cannot be constructed (unreadable cert/key, undecodable
//! secret) is returned as a typed error next to the map, and the caller
//! picks between fail-fast ([`Resolved::strict`]) and partial availability.

use std::collections::HashMap;

use thiserror::Error;
use tokio_rustls::TlsAcceptor;
use tracing::warn;

use super::listen::TlsMaterialError;
use super::types::Config;
use crate::casemap::{CanonicalName, casefold_name};
use crate::password::PasswordError;

/// Why a runtime value could not be constructed for an entry.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The stored secret did not decode.
    #[error(transparent)]
    Password(#[from] PasswordError),
    /// The TLS material did not load.
    #[error(transparent)]
    Tls(#[from] TlsMaterialError),
}

/// A construction failure, tagged with the raw entry name it belongs to.
#[derive(Debug, Error)]
#[error("{name}: {source}")]
pub struct EntryError {
    /// The raw (unfolded) name of the failing entry.
    pub name: String,
    /// What went wrong constructing its value.
    #[source]
    pub source: ResolveError,
}

/// Outcome of deriving a runtime map from raw config entries.
#[derive(Debug)]
pub struct Resolved<T> {
    /// Successfully constructed values, keyed by canonical name.
    pub entries: HashMap<CanonicalName, T>,
    /// Raw names that failed canonicalization and were skipped.
    pub skipped: Vec<String>,
    /// Entries whose value could not be constructed.
    pub failures: Vec<EntryError>,
}

impl<T> Resolved<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Treat any construction failure as fatal, yielding the bare map.
    ///
    /// Skipped (uncanonicalizable) names remain soft even here; they have
    /// already been logged.
    pub fn strict(self) -> Result<HashMap<CanonicalName, T>, EntryError> {
        match self.failures.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.entries),
        }
    }
}

impl Config {
    /// Derive the canonical-operator-name → decoded-secret map.
    pub fn operators(&self) -> Resolved<Vec<u8>> {
        let mut resolved = Resolved::new();
        for (raw, secret) in &self.operator {
            let name = match casefold_name(raw) {
                Ok(name) => name,
                Err(e) => {
                    warn!(name = %raw, error = %e, "skipping operator: name does not casefold");
                    resolved.skipped.push(raw.clone());
                    continue;
                }
            };
            match secret.decoded() {
                Ok(bytes) => {
                    resolved.entries.insert(name, bytes);
                }
                Err(e) => resolved.failures.push(EntryError {
                    name: raw.clone(),
                    source: e.into(),
                }),
            }
        }
        resolved
    }

    /// Derive the canonical-listener-label → TLS-acceptor map.
    pub fn tls_listeners(&self) -> Resolved<TlsAcceptor> {
        let mut resolved = Resolved::new();
        for (raw, listener) in &self.server.tls_listeners {
            let name = match casefold_name(raw) {
                Ok(name) => name,
                Err(e) => {
                    warn!(label = %raw, error = %e, "skipping TLS listener: label does not casefold");
                    resolved.skipped.push(raw.clone());
                    continue;
                }
            };
            match listener.tls_acceptor() {
                Ok(acceptor) => {
                    resolved.entries.insert(name, acceptor);
                }
                Err(e) => resolved.failures.push(EntryError {
                    name: raw.clone(),
                    source: e.into(),
                }),
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecretConfig;
    use crate::config::TlsListenConfig;
    use crate::password;

    fn config_with_opers(opers: &[(&str, &str)]) -> Config {
        let mut config = Config::default();
        for (name, password) in opers {
            config.operator.insert(
                name.to_string(),
                SecretConfig {
                    password: password.to_string(),
                },
            );
        }
        config
    }

    #[test]
    fn operators_are_keyed_by_canonical_name() {
        let stored = password::encode(b"swordfish").unwrap();
        let config = config_with_opers(&[("Dan[Away]", &stored)]);

        let resolved = config.operators();
        assert!(resolved.skipped.is_empty());
        assert!(resolved.failures.is_empty());
        assert_eq!(resolved.entries["dan{away}"], b"swordfish");
    }

    #[test]
    fn unfoldable_operator_names_are_skipped_not_fatal() {
        let stored = password::encode(b"swordfish").unwrap();
        let config = config_with_opers(&[("good", &stored), ("bad name", &stored)]);

        let resolved = config.operators();
        assert_eq!(resolved.skipped, vec!["bad name"]);
        assert!(resolved.failures.is_empty());
        assert_eq!(resolved.entries.len(), 1);
        assert!(resolved.entries.contains_key("good"));
    }

    #[test]
    fn undecodable_secrets_surface_as_entry_failures() {
        let stored = password::encode(b"swordfish").unwrap();
        let config = config_with_opers(&[("good", &stored), ("broken", "%%%")]);

        let resolved = config.operators();
        assert!(resolved.skipped.is_empty());
        assert_eq!(resolved.failures.len(), 1);
        assert_eq!(resolved.failures[0].name, "broken");
        assert!(matches!(
            resolved.failures[0].source,
            ResolveError::Password(_)
        ));
        // The rest of the map is still populated.
        assert!(resolved.entries.contains_key("good"));
    }

    #[test]
    fn strict_promotes_the_first_failure() {
        let config = config_with_opers(&[("broken", "%%%")]);
        let err = config.operators().strict().unwrap_err();
        assert_eq!(err.name, "broken");

        let stored = password::encode(b"swordfish").unwrap();
        let config = config_with_opers(&[("good", &stored)]);
        let map = config.operators().strict().unwrap();
        assert_eq!(map["good"], b"swordfish");
    }

    #[test]
    fn unreadable_tls_material_surfaces_as_entry_failure() {
        let mut config = Config::default();
        config.server.tls_listeners.insert(
            "0.0.0.0:6697".to_string(),
            TlsListenConfig {
                cert: "/nonexistent/cert.pem".to_string(),
                key: "/nonexistent/key.pem".to_string(),
            },
        );

        let resolved = config.tls_listeners();
        assert!(resolved.entries.is_empty());
        assert_eq!(resolved.failures.len(), 1);
        assert_eq!(resolved.failures[0].name, "0.0.0.0:6697");
        assert!(matches!(resolved.failures[0].source, ResolveError::Tls(_)));
    }

    #[test]
    fn unfoldable_tls_label_is_skipped_without_touching_disk() {
        let mut config = Config::default();
        config.server.tls_listeners.insert(
            "bad label".to_string(),
            TlsListenConfig {
                cert: "/nonexistent/cert.pem".to_string(),
                key: "/nonexistent/key.pem".to_string(),
            },
        );

        let resolved = config.tls_listeners();
        assert_eq!(resolved.skipped, vec!["bad label"]);
        assert!(resolved.failures.is_empty());
        assert!(resolved.entries.is_empty());
    }
}
