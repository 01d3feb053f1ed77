//! Per-tenant mutual exclusion for read-modify-write sequences.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use timbro_types::TenantId;

/// A lock map keyed by tenant.
///
/// The consumed-token set and the customer records are the only shared
/// mutable state in the system; every read-modify-write of either must hold
/// the tenant's lock so that concurrent scans of the same token yield exactly
/// one acceptance. One lock per tenant is enough — realistic deployments have
/// a single terminal scanning one credential at a time.
#[derive(Default)]
pub struct TenantLocks {
    locks: Mutex<HashMap<TenantId, Arc<Mutex<()>>>>,
}

impl TenantLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch (or create) the lock for a tenant.
    pub fn lock_for(&self, tenant: &TenantId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("tenant lock map poisoned");
        locks
            .entry(tenant.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Run `f` while holding the tenant's lock.
    pub fn with_tenant<T>(&self, tenant: &TenantId, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(tenant);
        let _guard: MutexGuard<'_, ()> = lock.lock().expect("tenant lock poisoned");
        f()
    }
}
