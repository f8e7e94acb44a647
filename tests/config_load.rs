//! End-to-end configuration loading and derivation.

use std::io::Write;

use corvus_core::config::{ConfigError, ValidationError, validate};
use corvus_core::{Config, password};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn full_document() -> String {
    let oper_secret = password::encode(b"swordfish").unwrap();
    format!(
        r#"
[network]
name = "CorvusNet"

[server]
password = "{server_secret}"
name = "irc.example.com"
listen = ["0.0.0.0:6667", "[::]:6667"]
ws-listen = "0.0.0.0:8097"
check-ident = true
log = "ircd.log"
motd = "motd.txt"
proxy-allowed-from = ["localhost"]

[server.tls-listeners."0.0.0.0:6697"]
cert = "/nonexistent/fullchain.pem"
key = "/nonexistent/privkey.pem"

[datastore]
path = "ircd.db"

[registration.accounts]
enabled = true
enabled-callbacks = ["mailto"]

[registration.accounts.callbacks.mailto]
server = "smtp.example.com"
port = 587
sender = "ircd@example.com"

[operator.Admin]
password = "{oper_secret}"

[operator."bad name"]
password = "{oper_secret}"

[limits]
nicklen = 32
channellen = 64
awaylen = 200
kicklen = 400
topiclen = 400
whowas-entries = 100
"#,
        server_secret = password::encode(b"letmein").unwrap(),
        oper_secret = oper_secret,
    )
}

#[test]
fn loads_a_complete_document_from_disk() {
    let file = write_config(&full_document());
    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.network.name, "CorvusNet");
    assert_eq!(config.server.name, "irc.example.com");
    assert_eq!(config.server.listen.len(), 2);
    assert_eq!(config.server.ws_listen.as_deref(), Some("0.0.0.0:8097"));
    assert!(config.server.check_ident);
    assert_eq!(config.server.password_bytes().unwrap().unwrap(), b"letmein");
    assert!(config.registration.accounts.enabled);
    assert_eq!(
        config.registration.accounts.callbacks.mailto.server,
        "smtp.example.com"
    );
    assert_eq!(config.limits.whowas_entries, 100);
}

#[test]
fn operator_map_folds_names_and_skips_unfoldable_ones() {
    let file = write_config(&full_document());
    let config = Config::load(file.path()).unwrap();

    let opers = config.operators();
    assert!(opers.failures.is_empty());
    assert_eq!(opers.entries.len(), 1);
    assert_eq!(opers.entries["admin"], b"swordfish");
    assert_eq!(opers.skipped, vec!["bad name"]);
}

#[test]
fn tls_map_reports_unloadable_material_without_aborting() {
    let file = write_config(&full_document());
    let config = Config::load(file.path()).unwrap();

    let tls = config.tls_listeners();
    assert!(tls.entries.is_empty());
    assert!(tls.skipped.is_empty());
    assert_eq!(tls.failures.len(), 1);
    assert_eq!(tls.failures[0].name, "0.0.0.0:6697");
}

#[test]
fn missing_network_name_yields_an_invariant_error() {
    let file = write_config(
        r#"
[server]
name = "irc.example.com"
listen = ["0.0.0.0:6667"]

[datastore]
path = "ircd.db"

[limits]
nicklen = 32
channellen = 64
awaylen = 200
topiclen = 400
"#,
    );
    match Config::load(file.path()) {
        Err(ConfigError::Invalid(ValidationError::MissingNetworkName)) => {}
        other => panic!("expected invariant error, got {other:?}"),
    }
}

#[test]
fn earliest_violation_wins_when_several_hold() {
    // Network name missing AND datastore missing AND listen empty AND
    // limits zeroed: the network name is reported.
    let file = write_config("[server]\nname = \"irc.example.com\"\n");
    match Config::load(file.path()) {
        Err(ConfigError::Invalid(ValidationError::MissingNetworkName)) => {}
        other => panic!("expected MissingNetworkName, got {other:?}"),
    }

    // With the network present, the next unsatisfied check in order is the
    // server-name hostname format.
    let file = write_config(
        r#"
[network]
name = "CorvusNet"

[server]
name = "nodothost"
"#,
    );
    match Config::load(file.path()) {
        Err(ConfigError::Invalid(ValidationError::ServerNameNotHostname)) => {}
        other => panic!("expected ServerNameNotHostname, got {other:?}"),
    }
}

#[test]
fn validate_collects_what_load_reports_first() {
    let file = write_config("[server]\nname = \"irc.example.com\"\n");
    let config: Config =
        toml::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();

    let errors = validate(&config).unwrap_err();
    assert_eq!(errors[0], ValidationError::MissingNetworkName);
    assert!(errors.contains(&ValidationError::MissingDatastorePath));
    assert!(errors.contains(&ValidationError::NoListenAddresses));
    assert!(errors.contains(&ValidationError::InvalidLimits));
}
