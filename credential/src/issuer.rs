//! Credential issuance.

use timbro_types::{Customer, LoyaltyParams, TenantId, Timestamp};

use crate::Credential;

/// Issues fresh presentation credentials bound to a customer and tenant.
///
/// Each call draws a new single-use token. The `is_redemption` flag reflects
/// the customer's balance at issuance time and is purely advisory for the
/// terminal's messaging.
pub struct CredentialIssuer {
    params: LoyaltyParams,
}

impl CredentialIssuer {
    pub fn new(params: LoyaltyParams) -> Self {
        Self { params }
    }

    /// Produce a fresh credential for the customer's current state.
    pub fn issue(&self, customer: &Customer, tenant: &TenantId, now: Timestamp) -> Credential {
        Credential {
            customer_id: customer.id.clone(),
            tenant_id: tenant.clone(),
            issued_at: now,
            token: timbro_types::ScanToken::generate(),
            is_redemption: customer.coffees >= self.params.max_coffees,
        }
    }

    /// How often the presenting side should call [`issue`](Self::issue).
    pub fn reissue_interval_ms(&self) -> u64 {
        self.params.reissue_interval_ms
    }
}

impl Default for CredentialIssuer {
    fn default() -> Self {
        Self::new(LoyaltyParams::loyalty_defaults())
    }
}
