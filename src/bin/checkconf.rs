//! corvus-checkconf - validate a config file and its derived material.
//!
//! Loads the given configuration, runs both runtime-map derivations, and
//! reports every skipped or failed entry. Exits non-zero if the config is
//! invalid or any operator/TLS entry fails to construct, so it can gate a
//! deploy.

use corvus_core::Config;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ircd.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        server = %config.server.name,
        network = %config.network.name,
        listeners = config.server.listen.len(),
        "Configuration OK"
    );

    let mut bad_entries = 0usize;

    let opers = config.operators();
    for name in &opers.skipped {
        warn!(%name, "operator skipped: name does not casefold");
    }
    for failure in &opers.failures {
        error!(error = %failure, "operator credential unusable");
        bad_entries += 1;
    }
    info!(count = opers.entries.len(), "Operator credentials resolved");

    let tls = config.tls_listeners();
    for label in &tls.skipped {
        warn!(%label, "TLS listener skipped: label does not casefold");
    }
    for failure in &tls.failures {
        error!(error = %failure, "TLS listener material unusable");
        bad_entries += 1;
    }
    info!(count = tls.entries.len(), "TLS listeners resolved");

    if bad_entries > 0 {
        anyhow::bail!("{bad_entries} config entries failed to resolve");
    }
    Ok(())
}
