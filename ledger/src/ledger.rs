//! The tenant-scoped point ledger.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate};
use timbro_store::{CustomerStore, ScanStore, TenantLocks};
use timbro_types::{Customer, CustomerId, LoyaltyParams, TenantId};

use crate::history::{day_bounds, in_window};
use crate::{points, LedgerError};

/// High-level ledger interface over an injected storage backend.
///
/// Every mutation runs under the tenant's lock so read-modify-write sequences
/// never interleave with a concurrent scan commit on the same tenant.
pub struct Ledger<S> {
    store: Arc<S>,
    locks: Arc<TenantLocks>,
    params: LoyaltyParams,
}

impl<S> Clone for Ledger<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            locks: self.locks.clone(),
            params: self.params.clone(),
        }
    }
}

impl<S> Ledger<S> {
    pub fn new(store: Arc<S>, params: LoyaltyParams) -> Self {
        Self::with_locks(store, Arc::new(TenantLocks::new()), params)
    }

    /// Share a lock map with other components (the scan validator) so all
    /// writers to a tenant partition serialize on the same mutex.
    pub fn with_locks(store: Arc<S>, locks: Arc<TenantLocks>, params: LoyaltyParams) -> Self {
        Self {
            store,
            locks,
            params,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn locks(&self) -> &Arc<TenantLocks> {
        &self.locks
    }

    pub fn params(&self) -> &LoyaltyParams {
        &self.params
    }
}

impl<S: CustomerStore> Ledger<S> {
    /// Register a new customer with an empty card and a fresh id.
    pub fn register(
        &self,
        tenant: &TenantId,
        name: impl Into<String>,
    ) -> Result<Customer, LedgerError> {
        let customer = Customer::new(name);
        self.store.put_customer(tenant, &customer)?;
        tracing::info!(%tenant, customer = %customer.id, "registered customer");
        Ok(customer)
    }

    /// Fetch a single customer record.
    pub fn customer(
        &self,
        tenant: &TenantId,
        id: &CustomerId,
    ) -> Result<Option<Customer>, LedgerError> {
        Ok(self.store.get_customer(tenant, id)?)
    }

    /// All customers of a tenant.
    pub fn customers(&self, tenant: &TenantId) -> Result<Vec<Customer>, LedgerError> {
        Ok(self.store.iter_customers(tenant)?)
    }

    /// Add one stamp to a customer's card (staff-triggered).
    pub fn accrue(&self, tenant: &TenantId, id: &CustomerId) -> Result<Customer, LedgerError> {
        self.locks.with_tenant(tenant, || {
            let customer = self.resolve(tenant, id)?;
            let updated = points::accrue(&customer, self.params.max_coffees)?;
            self.store.put_customer(tenant, &updated)?;
            tracing::info!(%tenant, customer = %id, coffees = updated.coffees, "stamp accrued");
            Ok(updated)
        })
    }

    /// Redeem a full card, resetting it to zero (staff-triggered).
    pub fn redeem(&self, tenant: &TenantId, id: &CustomerId) -> Result<Customer, LedgerError> {
        self.locks.with_tenant(tenant, || {
            let customer = self.resolve(tenant, id)?;
            let updated = points::redeem(&customer, self.params.max_coffees)?;
            self.store.put_customer(tenant, &updated)?;
            tracing::info!(%tenant, customer = %id, "card redeemed");
            Ok(updated)
        })
    }

    /// Administrative override of a customer's balance, clamped into range.
    pub fn set_points(
        &self,
        tenant: &TenantId,
        id: &CustomerId,
        n: i32,
    ) -> Result<Customer, LedgerError> {
        self.locks.with_tenant(tenant, || {
            let customer = self.resolve(tenant, id)?;
            let updated = points::set_points(&customer, n, self.params.max_coffees);
            self.store.put_customer(tenant, &updated)?;
            tracing::info!(%tenant, customer = %id, coffees = updated.coffees, "points overridden");
            Ok(updated)
        })
    }

    fn resolve(&self, tenant: &TenantId, id: &CustomerId) -> Result<Customer, LedgerError> {
        self.store
            .get_customer(tenant, id)?
            .ok_or_else(|| LedgerError::UnknownCustomer(id.to_string()))
    }
}

impl<S: CustomerStore + ScanStore> Ledger<S> {
    /// Customers with at least one accepted scan on the given local day,
    /// each reported with its current balance.
    ///
    /// Linear in history size; fine for tenant-local daily traffic. If
    /// history ever grows large, add a per-day secondary index instead of
    /// scanning the whole log.
    pub fn customers_scanned_on(
        &self,
        tenant: &TenantId,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<Vec<Customer>, LedgerError> {
        let (start, end) = day_bounds(date, offset).ok_or(LedgerError::InvalidDate)?;

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for record in self.store.iter_scans(tenant)? {
            if !in_window(record.scan_timestamp, start, end) {
                continue;
            }
            if !seen.insert(record.customer_id.clone()) {
                continue;
            }
            // Report the current record, not the balance at scan time.
            if let Some(customer) = self.store.get_customer(tenant, &record.customer_id)? {
                out.push(customer);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timbro_nullables::NullStore;
    use timbro_store::ScanStore;
    use timbro_types::{ScanRecord, Timestamp};

    fn ledger() -> Ledger<NullStore> {
        Ledger::new(Arc::new(NullStore::new()), LoyaltyParams::loyalty_defaults())
    }

    fn tenant() -> TenantId {
        TenantId::new("bar-sole")
    }

    #[test]
    fn register_starts_with_empty_card() {
        let ledger = ledger();
        let customer = ledger.register(&tenant(), "Mario Rossi").unwrap();
        assert_eq!(customer.coffees, 0);
        assert_eq!(customer.name, "Mario Rossi");

        let stored = ledger.customer(&tenant(), &customer.id).unwrap().unwrap();
        assert_eq!(stored, customer);
    }

    #[test]
    fn accrue_and_redeem_full_cycle() {
        let ledger = ledger();
        let customer = ledger.register(&tenant(), "Mario Rossi").unwrap();

        for _ in 0..10 {
            ledger.accrue(&tenant(), &customer.id).unwrap();
        }
        assert!(matches!(
            ledger.accrue(&tenant(), &customer.id),
            Err(LedgerError::CardFull)
        ));

        let redeemed = ledger.redeem(&tenant(), &customer.id).unwrap();
        assert_eq!(redeemed.coffees, 0);
        assert!(matches!(
            ledger.redeem(&tenant(), &customer.id),
            Err(LedgerError::NotRedeemable)
        ));
    }

    #[test]
    fn set_points_overrides_unconditionally() {
        let ledger = ledger();
        let customer = ledger.register(&tenant(), "Mario Rossi").unwrap();

        assert_eq!(ledger.set_points(&tenant(), &customer.id, 8).unwrap().coffees, 8);
        assert_eq!(ledger.set_points(&tenant(), &customer.id, -2).unwrap().coffees, 0);
        assert_eq!(ledger.set_points(&tenant(), &customer.id, 25).unwrap().coffees, 10);
    }

    #[test]
    fn unknown_customer_is_reported() {
        let ledger = ledger();
        assert!(matches!(
            ledger.accrue(&tenant(), &CustomerId::new("ghost")),
            Err(LedgerError::UnknownCustomer(_))
        ));
    }

    #[test]
    fn day_query_buckets_by_local_day() {
        let ledger = ledger();
        let customer = ledger.register(&tenant(), "Mario Rossi").unwrap();

        // 2024-03-10T23:59:59 UTC
        let late_scan = Timestamp::new(1_710_115_199_000);
        ledger
            .store()
            .append_scan(&tenant(), &ScanRecord::new(customer.id.clone(), late_scan))
            .unwrap();

        let utc = FixedOffset::east_opt(0).unwrap();
        let same_day = ledger
            .customers_scanned_on(&tenant(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), utc)
            .unwrap();
        assert_eq!(same_day.len(), 1);
        assert_eq!(same_day[0].id, customer.id);

        let next_day = ledger
            .customers_scanned_on(&tenant(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(), utc)
            .unwrap();
        assert!(next_day.is_empty());
    }

    #[test]
    fn day_query_collapses_repeat_scans_and_reports_current_balance() {
        let ledger = ledger();
        let customer = ledger.register(&tenant(), "Mario Rossi").unwrap();

        let base = 1_710_028_800_000u64; // 2024-03-10T00:00:00Z
        for i in 0..3 {
            ledger
                .store()
                .append_scan(
                    &tenant(),
                    &ScanRecord::new(customer.id.clone(), Timestamp::new(base + i * 1000)),
                )
                .unwrap();
        }
        ledger.set_points(&tenant(), &customer.id, 4).unwrap();

        let utc = FixedOffset::east_opt(0).unwrap();
        let scanned = ledger
            .customers_scanned_on(&tenant(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), utc)
            .unwrap();
        assert_eq!(scanned.len(), 1);
        assert_eq!(scanned[0].coffees, 4);
    }
}
