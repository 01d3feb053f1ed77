//! Consumed-token storage trait.

use crate::StoreError;
use timbro_types::{ScanToken, TenantId, Timestamp};

/// Trait for the consumed-token set, scoped per tenant.
///
/// A token present in this mapping must never be accepted again. Absence of
/// a key means "not consumed" — there is no separate failure mode.
pub trait TokenStore {
    /// When the token was consumed, or `None` if it never was.
    fn get_consumed(
        &self,
        tenant: &TenantId,
        token: &ScanToken,
    ) -> Result<Option<Timestamp>, StoreError>;

    /// Record a token as consumed at the given time.
    fn put_consumed(
        &self,
        tenant: &TenantId,
        token: &ScanToken,
        consumed_at: Timestamp,
    ) -> Result<(), StoreError>;

    /// Remove a consumption entry (garbage collection, or rollback of a
    /// commit that failed half-way).
    fn delete_consumed(&self, tenant: &TenantId, token: &ScanToken) -> Result<(), StoreError>;

    /// All consumed tokens of a tenant with their consumption timestamps.
    fn iter_consumed(&self, tenant: &TenantId)
        -> Result<Vec<(ScanToken, Timestamp)>, StoreError>;

    /// Replace the tenant's entire consumed-token set (backup import).
    fn replace_consumed(
        &self,
        tenant: &TenantId,
        entries: &[(ScanToken, Timestamp)],
    ) -> Result<(), StoreError>;
}
