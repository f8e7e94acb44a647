//! Hostname grammar validation.
//!
//! Used to vet the server's own declared name at config load and to
//! sanity-check reverse-DNS results on the accept path. Stricter than
//! generic DNS: a bare label without a dot is rejected, since IRC server
//! identities are always fully qualified.

/// Maximum total length of a hostname, per RFC 1035.
pub const MAX_HOSTNAME_LEN: usize = 253;

/// Maximum length of a single dot-separated label.
pub const MAX_LABEL_LEN: usize = 63;

/// Check whether `name` has the format of a fully qualified hostname.
///
/// All of the following must hold:
/// - total length in 1..=253 and at least one `.`
/// - every dot-separated label has length 1..=63 and neither starts nor
///   ends with `-`
/// - every character is in `[a-z0-9.-]`, case-insensitively
///
/// # Examples
///
/// ```
/// use corvus_core::hostname::is_hostname;
///
/// assert!(is_hostname("irc.example.com"));
/// assert!(!is_hostname("nodothost"));
/// assert!(!is_hostname("-bad.example.com"));
/// ```
pub fn is_hostname(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_HOSTNAME_LEN || !name.contains('.') {
        return false;
    }

    for label in name.split('.') {
        if label.is_empty()
            || label.len() > MAX_LABEL_LEN
            || label.starts_with('-')
            || label.ends_with('-')
        {
            return false;
        }
    }

    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
}
