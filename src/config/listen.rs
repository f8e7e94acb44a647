//! TLS listener material.

use std::io::{BufReader, Cursor};
use std::sync::Arc;

use rustls_pemfile::{certs, pkcs8_private_keys};
use serde::Deserialize;
use thiserror::Error;
use tokio_rustls::TlsAcceptor;
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};

/// Errors from loading a listener's certificate/key pair.
#[derive(Debug, Error)]
pub enum TlsMaterialError {
    /// A PEM file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the unreadable file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The certificate file contained no certificates.
    #[error("no certificates found in {0}")]
    NoCerts(String),
    /// The key file contained no PKCS#8 private keys.
    #[error("no private keys found in {0}")]
    NoKeys(String),
    /// The pair was rejected by the TLS stack.
    #[error("invalid cert/key pair: {0}")]
    Tls(#[from] tokio_rustls::rustls::Error),
}

/// A TLS listener's certificate and key paths, as configured.
#[derive(Debug, Clone, Deserialize)]
pub struct TlsListenConfig {
    /// Path to the certificate chain file (PEM format).
    pub cert: String,
    /// Path to the private key file (PEM format, PKCS#8).
    pub key: String,
}

impl TlsListenConfig {
    /// Load the certificate/key pair and build a ready TLS acceptor.
    pub fn tls_acceptor(&self) -> Result<TlsAcceptor, TlsMaterialError> {
        let cert_file = std::fs::read(&self.cert).map_err(|source| TlsMaterialError::Io {
            path: self.cert.clone(),
            source,
        })?;
        let cert_reader = &mut BufReader::new(Cursor::new(cert_file));
        let certs: Vec<CertificateDer> = certs(cert_reader)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| TlsMaterialError::Io {
                path: self.cert.clone(),
                source,
            })?;
        if certs.is_empty() {
            return Err(TlsMaterialError::NoCerts(self.cert.clone()));
        }

        let key_file = std::fs::read(&self.key).map_err(|source| TlsMaterialError::Io {
            path: self.key.clone(),
            source,
        })?;
        let key_reader = &mut BufReader::new(Cursor::new(key_file));
        let mut keys: Vec<PrivateKeyDer> = pkcs8_private_keys(key_reader)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| TlsMaterialError::Io {
                path: self.key.clone(),
                source,
            })?
            .into_iter()
            .map(PrivateKeyDer::from)
            .collect();
        if keys.is_empty() {
            return Err(TlsMaterialError::NoKeys(self.key.clone()));
        }
        let key = keys.remove(0);

        let tls_config = ServerConfig::builder()
            .with_no_client_auth()
            .with_single_cert(certs, key)?;

        Ok(TlsAcceptor::from(Arc::new(tls_config)))
    }
}
