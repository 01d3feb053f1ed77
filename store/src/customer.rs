//! Customer storage trait.

use crate::StoreError;
use timbro_types::{Customer, CustomerId, TenantId};

/// Trait for customer record storage, scoped per tenant.
///
/// Puts are last-write-wins; callers serialize concurrent writers with
/// [`crate::TenantLocks`].
pub trait CustomerStore {
    /// Fetch a customer record, or `None` if the id is unknown.
    fn get_customer(
        &self,
        tenant: &TenantId,
        id: &CustomerId,
    ) -> Result<Option<Customer>, StoreError>;

    /// Insert or overwrite a customer record.
    fn put_customer(&self, tenant: &TenantId, customer: &Customer) -> Result<(), StoreError>;

    /// All customers of a tenant. Order is unspecified.
    fn iter_customers(&self, tenant: &TenantId) -> Result<Vec<Customer>, StoreError>;

    /// Replace the tenant's entire customer collection (backup import).
    fn replace_customers(
        &self,
        tenant: &TenantId,
        customers: &[Customer],
    ) -> Result<(), StoreError>;
}
