//! Nullable store — thread-safe in-memory storage for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use timbro_store::{CustomerStore, ScanStore, StoreError, TokenStore};
use timbro_types::{Customer, CustomerId, ScanRecord, ScanToken, TenantId, Timestamp};

/// An in-memory implementation of every storage trait, partitioned by tenant.
///
/// Thread-safe; the per-tenant serialization discipline still applies for
/// read-modify-write sequences, exactly as with the persistent backend.
pub struct NullStore {
    customers: Mutex<HashMap<TenantId, HashMap<String, Customer>>>,
    consumed: Mutex<HashMap<TenantId, HashMap<String, Timestamp>>>,
    scans: Mutex<HashMap<TenantId, Vec<ScanRecord>>>,
    /// When set, counts down on each write; the write that hits zero fails
    /// with a backend error.
    fail_countdown: Mutex<Option<u32>>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            customers: Mutex::new(HashMap::new()),
            consumed: Mutex::new(HashMap::new()),
            scans: Mutex::new(HashMap::new()),
            fail_countdown: Mutex::new(None),
        }
    }

    /// Make the next write operation fail, to exercise storage-failure paths.
    pub fn fail_next_write(&self) {
        self.fail_after_writes(0);
    }

    /// Let `n` writes succeed, then fail the one after them. Lets tests
    /// break a multi-write sequence at any chosen point.
    pub fn fail_after_writes(&self, n: u32) {
        *self.fail_countdown.lock().unwrap() = Some(n);
    }

    fn check_write(&self) -> Result<(), StoreError> {
        let mut countdown = self.fail_countdown.lock().unwrap();
        match *countdown {
            Some(0) => {
                *countdown = None;
                Err(StoreError::Backend("injected write failure".into()))
            }
            Some(n) => {
                *countdown = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerStore for NullStore {
    fn get_customer(
        &self,
        tenant: &TenantId,
        id: &CustomerId,
    ) -> Result<Option<Customer>, StoreError> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .get(tenant)
            .and_then(|m| m.get(id.as_str()))
            .cloned())
    }

    fn put_customer(&self, tenant: &TenantId, customer: &Customer) -> Result<(), StoreError> {
        self.check_write()?;
        self.customers
            .lock()
            .unwrap()
            .entry(tenant.clone())
            .or_default()
            .insert(customer.id.as_str().to_string(), customer.clone());
        Ok(())
    }

    fn iter_customers(&self, tenant: &TenantId) -> Result<Vec<Customer>, StoreError> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .get(tenant)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default())
    }

    fn replace_customers(
        &self,
        tenant: &TenantId,
        customers: &[Customer],
    ) -> Result<(), StoreError> {
        self.check_write()?;
        let map = customers
            .iter()
            .map(|c| (c.id.as_str().to_string(), c.clone()))
            .collect();
        self.customers.lock().unwrap().insert(tenant.clone(), map);
        Ok(())
    }
}

impl TokenStore for NullStore {
    fn get_consumed(
        &self,
        tenant: &TenantId,
        token: &ScanToken,
    ) -> Result<Option<Timestamp>, StoreError> {
        Ok(self
            .consumed
            .lock()
            .unwrap()
            .get(tenant)
            .and_then(|m| m.get(token.as_str()))
            .copied())
    }

    fn put_consumed(
        &self,
        tenant: &TenantId,
        token: &ScanToken,
        consumed_at: Timestamp,
    ) -> Result<(), StoreError> {
        self.check_write()?;
        self.consumed
            .lock()
            .unwrap()
            .entry(tenant.clone())
            .or_default()
            .insert(token.as_str().to_string(), consumed_at);
        Ok(())
    }

    fn delete_consumed(&self, tenant: &TenantId, token: &ScanToken) -> Result<(), StoreError> {
        if let Some(m) = self.consumed.lock().unwrap().get_mut(tenant) {
            m.remove(token.as_str());
        }
        Ok(())
    }

    fn iter_consumed(
        &self,
        tenant: &TenantId,
    ) -> Result<Vec<(ScanToken, Timestamp)>, StoreError> {
        Ok(self
            .consumed
            .lock()
            .unwrap()
            .get(tenant)
            .map(|m| {
                m.iter()
                    .map(|(t, at)| (ScanToken::new(t.clone()), *at))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn replace_consumed(
        &self,
        tenant: &TenantId,
        entries: &[(ScanToken, Timestamp)],
    ) -> Result<(), StoreError> {
        self.check_write()?;
        let map = entries
            .iter()
            .map(|(t, at)| (t.as_str().to_string(), *at))
            .collect();
        self.consumed.lock().unwrap().insert(tenant.clone(), map);
        Ok(())
    }
}

impl ScanStore for NullStore {
    fn append_scan(&self, tenant: &TenantId, record: &ScanRecord) -> Result<(), StoreError> {
        self.check_write()?;
        self.scans
            .lock()
            .unwrap()
            .entry(tenant.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn iter_scans(&self, tenant: &TenantId) -> Result<Vec<ScanRecord>, StoreError> {
        Ok(self
            .scans
            .lock()
            .unwrap()
            .get(tenant)
            .cloned()
            .unwrap_or_default())
    }

    fn replace_scans(&self, tenant: &TenantId, records: &[ScanRecord]) -> Result<(), StoreError> {
        self.check_write()?;
        self.scans
            .lock()
            .unwrap()
            .insert(tenant.clone(), records.to_vec());
        Ok(())
    }
}
