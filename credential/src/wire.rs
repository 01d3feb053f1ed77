//! The credential wire shape.
//!
//! A flat JSON object with exactly these camelCase fields:
//! `customerId`, `tenantId`, `issuedAt` (integer milliseconds), `token`,
//! `isRedemption`. The rendering and camera-decoding components hand these
//! bytes around unmodified.

use serde::{Deserialize, Serialize};
use timbro_types::{CustomerId, ScanToken, TenantId, Timestamp};

use crate::CredentialError;

/// A short-lived, single-use presentation credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub customer_id: CustomerId,
    pub tenant_id: TenantId,
    /// Issuance time in Unix milliseconds.
    pub issued_at: Timestamp,
    /// Single-use nonce, unique within the tenant.
    pub token: ScanToken,
    /// Advisory hint that the card was full at issuance. Never authorizes a
    /// mutation; the validator re-derives redemption from the persisted
    /// balance.
    pub is_redemption: bool,
}

impl Credential {
    /// Serialize to the JSON wire form.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).expect("credential serialization should not fail")
    }

    /// Parse raw scanned bytes back into a credential.
    pub fn decode(raw: &str) -> Result<Self, CredentialError> {
        serde_json::from_str(raw).map_err(|e| CredentialError::Malformed(e.to_string()))
    }
}
