//! Scan outcomes presented to the terminal.

use std::fmt;

use timbro_types::Customer;

/// Why a scanned credential was refused.
///
/// Closed set; every reason is terminal for that scan and none of them
/// mutate state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The bytes did not parse as a credential.
    MalformedCredential,
    /// The credential was issued for a different tenant.
    WrongTenant,
    /// More than the acceptance window has passed since issuance.
    Expired,
    /// The token was already consumed by an earlier scan.
    AlreadyUsed,
    /// The customer id does not resolve in this tenant's ledger.
    UnknownCustomer,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::MalformedCredential => "could not read the code",
            Self::WrongTenant => "code belongs to a different venue",
            Self::Expired => "code expired, ask the customer to refresh",
            Self::AlreadyUsed => "code was already scanned",
            Self::UnknownCustomer => "customer not registered here",
        };
        write!(f, "{msg}")
    }
}

/// Result of processing one scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The scan committed: one stamp accrued (or ignored on a full card),
    /// history appended, token consumed.
    Accepted {
        /// The customer record as persisted after the commit.
        customer: Customer,
        /// Whether the terminal should prompt the staff to redeem. Derived
        /// from the persisted balance, never from the credential's hint.
        prompt_redemption: bool,
    },
    Rejected(RejectReason),
}

impl ScanOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
