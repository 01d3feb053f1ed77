//! LMDB implementation of ScanStore.
//!
//! Records are keyed by a zero-padded per-tenant sequence number, so LMDB's
//! lexicographic key order reproduces append order.

use timbro_store::{ScanStore, StoreError};
use timbro_types::{ScanRecord, TenantId};

use crate::environment::LmdbStore;
use crate::error::store_err;

impl ScanStore for LmdbStore {
    fn append_scan(&self, tenant: &TenantId, record: &ScanRecord) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(store_err)?;
        let seq = self
            .scan_seq
            .get(&wtxn, tenant.as_str())
            .map_err(store_err)?
            .unwrap_or(0);
        let key = Self::tenant_key(tenant, &format!("{seq:016x}"));
        self.scans.put(&mut wtxn, &key, record).map_err(store_err)?;
        self.scan_seq
            .put(&mut wtxn, tenant.as_str(), &(seq + 1))
            .map_err(store_err)?;
        wtxn.commit().map_err(store_err)
    }

    fn iter_scans(&self, tenant: &TenantId) -> Result<Vec<ScanRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(store_err)?;
        let prefix = Self::tenant_prefix(tenant);
        let mut out = Vec::new();
        for item in self.scans.prefix_iter(&rtxn, &prefix).map_err(store_err)? {
            let (_, record) = item.map_err(store_err)?;
            out.push(record);
        }
        Ok(out)
    }

    fn replace_scans(&self, tenant: &TenantId, records: &[ScanRecord]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(store_err)?;
        let prefix = Self::tenant_prefix(tenant);

        let stale: Vec<String> = self
            .scans
            .prefix_iter(&wtxn, &prefix)
            .map_err(store_err)?
            .map(|item| item.map(|(k, _)| k.to_string()))
            .collect::<Result<_, _>>()
            .map_err(store_err)?;
        for key in stale {
            self.scans.delete(&mut wtxn, &key).map_err(store_err)?;
        }

        for (seq, record) in records.iter().enumerate() {
            let key = Self::tenant_key(tenant, &format!("{seq:016x}"));
            self.scans.put(&mut wtxn, &key, record).map_err(store_err)?;
        }
        self.scan_seq
            .put(&mut wtxn, tenant.as_str(), &(records.len() as u64))
            .map_err(store_err)?;
        wtxn.commit().map_err(store_err)
    }
}
