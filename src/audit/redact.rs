//! One-way redaction of values before they reach the audit trail

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt::Write;

/// Number of hex characters kept from the SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 16;

/// Hash sensitive data for audit logging.
///
/// Returns the first 16 hex characters of the SHA-256 digest, enough to
/// correlate events without being reversible.
pub fn hash_sensitive_data(data: &str) -> String {
    let digest = Sha256::digest(data.as_bytes());
    let mut out = String::with_capacity(DIGEST_HEX_LEN);
    for byte in digest.iter().take(DIGEST_HEX_LEN / 2) {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// Replace free text with a `<name>_hash` digest and a `length` field.
///
/// Length is counted in characters, not bytes.
pub fn redacted_text(name: &str, text: &str) -> [(String, Value); 2] {
    [
        (format!("{}_hash", name), Value::from(hash_sensitive_data(text))),
        ("length".to_string(), Value::from(text.chars().count())),
    ]
}
