//! Customer identity and the punch-card record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of stamps a card can hold.
pub const MAX_COFFEES: u8 = 10;

/// An opaque, stable customer identifier assigned at registration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a fresh identifier from 16 bytes of OS entropy, hex-encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        getrandom::getrandom(&mut bytes).expect("OS entropy source unavailable");
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer's punch-card record, owned by the tenant's ledger store.
///
/// `coffees` stays in `[0, MAX_COFFEES]` and is only ever changed through the
/// point-ledger transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    /// Display name, stored verbatim. No uniqueness constraint.
    pub name: String,
    pub coffees: u8,
}

impl Customer {
    /// Create a new customer with a fresh id and an empty card.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::generate(),
            name: name.into(),
            coffees: 0,
        }
    }

    /// Whether the card is full and the next coffee is on the house.
    pub fn is_redeemable(&self) -> bool {
        self.coffees >= MAX_COFFEES
    }
}
