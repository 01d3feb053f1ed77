//! Scan history storage trait.

use crate::StoreError;
use timbro_types::{ScanRecord, TenantId};

/// Trait for the append-only scan log, scoped per tenant.
pub trait ScanStore {
    /// Append one accepted scan to the tenant's log.
    fn append_scan(&self, tenant: &TenantId, record: &ScanRecord) -> Result<(), StoreError>;

    /// The full scan log of a tenant, in append order.
    fn iter_scans(&self, tenant: &TenantId) -> Result<Vec<ScanRecord>, StoreError>;

    /// Replace the tenant's entire scan log (backup import).
    fn replace_scans(&self, tenant: &TenantId, records: &[ScanRecord]) -> Result<(), StoreError>;
}
