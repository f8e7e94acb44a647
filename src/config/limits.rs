//! Numeric protocol limits.

use serde::Deserialize;

/// Numeric protocol limits.
///
/// Bounds on the lengths clients can use for the corresponding protocol
/// fields. The lower bounds are enforced at load time by the validation
/// checks; `kicklen` is carried but not bound-checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LimitsConfig {
    /// Maximum nickname length.
    pub nicklen: u32,
    /// Maximum channel name length.
    pub channellen: u32,
    /// Maximum away-message length.
    pub awaylen: u32,
    /// Maximum kick-message length.
    pub kicklen: u32,
    /// Maximum topic length.
    pub topiclen: u32,
    /// Number of WHOWAS entries retained per nickname.
    pub whowas_entries: u32,
}
