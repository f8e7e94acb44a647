//! Account registration configuration.
//!
//! Parsed structurally so the account layer gets typed access to its mail
//! callback settings; this core does not interpret them further.

use serde::Deserialize;

/// Account verification configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AccountRegistrationConfig {
    /// Whether account registration is enabled at all.
    pub enabled: bool,
    /// Verification callbacks offered to registering users.
    pub enabled_callbacks: Vec<String>,
    /// Per-callback settings.
    pub callbacks: CallbacksConfig,
}

/// Settings for each supported verification callback.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CallbacksConfig {
    /// Mail verification settings.
    pub mailto: MailtoConfig,
}

/// Mail verification callback settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MailtoConfig {
    /// SMTP server hostname.
    pub server: String,
    /// SMTP server port.
    pub port: u16,
    /// TLS settings for the SMTP session.
    pub tls: MailtoTlsConfig,
    /// SMTP username.
    pub username: String,
    /// SMTP password.
    pub password: String,
    /// Sender address for verification mail.
    pub sender: String,
    /// Subject line of the verification message.
    pub verify_message_subject: String,
    /// Body of the verification message.
    pub verify_message: String,
}

/// TLS settings for the mail callback's SMTP session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MailtoTlsConfig {
    /// Whether to use TLS when talking to the SMTP server.
    pub enabled: bool,
    /// Skip certificate verification (testing only).
    #[serde(rename = "insecure_skip_verify")]
    pub insecure_skip_verify: bool,
    /// Expected server name on the SMTP server's certificate.
    #[serde(rename = "servername")]
    pub server_name: String,
}
