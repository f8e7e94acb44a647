//! Reverse-DNS hostname resolution for incoming connections.
//!
//! The accept path wants a display hostname for each client, but must
//! never stall or fail on one: every lookup is bounded by a timeout and
//! every failure falls back to the client's IP string. The actual DNS
//! query sits behind the [`ReverseDns`] trait so tests can substitute a
//! canned resolver.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use thiserror::Error;
use tracing::debug;

use crate::hostname::is_hostname;

/// Upper bound on a single reverse lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from a reverse-DNS query.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The query failed (NXDOMAIN, SERVFAIL, transport error, ...).
    #[error("reverse lookup failed: {0}")]
    Dns(String),
}

/// Capability to resolve an IP address back to candidate hostnames.
#[async_trait]
pub trait ReverseDns: Send + Sync {
    /// Return the PTR names for `ip`, in answer order.
    async fn reverse(&self, ip: IpAddr) -> Result<Vec<String>, LookupError>;
}

/// Production [`ReverseDns`] backed by the system's DNS configuration.
#[derive(Clone)]
pub struct DnsResolver {
    resolver: TokioResolver,
}

impl DnsResolver {
    /// Create a resolver from system config, falling back to defaults.
    pub fn new() -> Self {
        let resolver = TokioResolver::builder_tokio()
            .map(|b| b.build())
            .unwrap_or_else(|_| {
                TokioResolver::builder_with_config(
                    ResolverConfig::default(),
                    TokioConnectionProvider::default(),
                )
                .build()
            });
        Self { resolver }
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReverseDns for DnsResolver {
    async fn reverse(&self, ip: IpAddr) -> Result<Vec<String>, LookupError> {
        let lookup = self
            .resolver
            .reverse_lookup(ip)
            .await
            .map_err(|e| LookupError::Dns(e.to_string()))?;
        Ok(lookup.iter().map(|ptr| ptr.to_string()).collect())
    }
}

/// Strip the port from a transport address, leaving the IP component.
///
/// Addresses that do not parse as `ip:port` are returned unchanged.
pub fn ip_string(addr: &str) -> String {
    match addr.parse::<SocketAddr>() {
        Ok(sock) => sock.ip().to_string(),
        Err(_) => addr.to_string(),
    }
}

/// Resolves transport addresses to display hostnames.
///
/// Safe to share across connection tasks; holds no mutable state.
pub struct HostnameResolver<R = DnsResolver> {
    resolver: R,
    timeout: Duration,
}

impl HostnameResolver<DnsResolver> {
    /// Resolver backed by the system DNS configuration.
    pub fn system() -> Self {
        Self::new(DnsResolver::new())
    }
}

impl<R: ReverseDns> HostnameResolver<R> {
    /// Wrap a [`ReverseDns`] backend with the default timeout.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Override the per-lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve a transport address (`ip:port` or bare IP) to a hostname.
    ///
    /// Only the first PTR answer is consulted. On lookup failure, timeout,
    /// an empty answer, or a name that fails [`is_hostname`], the IP
    /// string is returned unchanged.
    pub async fn lookup_hostname(&self, addr: &str) -> String {
        let ip_str = ip_string(addr);
        let Ok(ip) = ip_str.parse::<IpAddr>() else {
            return ip_str;
        };

        let names = match tokio::time::timeout(self.timeout, self.resolver.reverse(ip)).await {
            Ok(Ok(names)) => names,
            Ok(Err(e)) => {
                debug!(%ip, error = %e, "reverse lookup failed");
                return ip_str;
            }
            Err(_) => {
                debug!(%ip, timeout = ?self.timeout, "reverse lookup timed out");
                return ip_str;
            }
        };

        let Some(first) = names.first() else {
            return ip_str;
        };

        // PTR answers come back fully qualified with a trailing dot.
        let name = first.strip_suffix('.').unwrap_or(first);
        if is_hostname(name) {
            name.to_string()
        } else {
            debug!(%ip, name, "discarding malformed PTR answer");
            ip_str
        }
    }
}
