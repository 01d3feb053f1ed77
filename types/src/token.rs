//! Single-use scan token carried inside a presentation credential.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single-use nonce bound to one credential issuance.
///
/// Drawn from 128 bits of OS entropy, so collisions within a tenant are
/// negligible. A token is acceptable at most once; the token guard records
/// consumption.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanToken(String);

impl ScanToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a fresh token from 16 bytes of OS entropy, hex-encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        getrandom::getrandom(&mut bytes).expect("OS entropy source unavailable");
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScanToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
