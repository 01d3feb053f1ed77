//! LMDB implementation of TokenStore.

use timbro_store::{StoreError, TokenStore};
use timbro_types::{ScanToken, TenantId, Timestamp};

use crate::environment::LmdbStore;
use crate::error::store_err;

impl TokenStore for LmdbStore {
    fn get_consumed(
        &self,
        tenant: &TenantId,
        token: &ScanToken,
    ) -> Result<Option<Timestamp>, StoreError> {
        let rtxn = self.env.read_txn().map_err(store_err)?;
        let key = Self::tenant_key(tenant, token.as_str());
        self.consumed.get(&rtxn, &key).map_err(store_err)
    }

    fn put_consumed(
        &self,
        tenant: &TenantId,
        token: &ScanToken,
        consumed_at: Timestamp,
    ) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(store_err)?;
        let key = Self::tenant_key(tenant, token.as_str());
        self.consumed
            .put(&mut wtxn, &key, &consumed_at)
            .map_err(store_err)?;
        wtxn.commit().map_err(store_err)
    }

    fn delete_consumed(&self, tenant: &TenantId, token: &ScanToken) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(store_err)?;
        let key = Self::tenant_key(tenant, token.as_str());
        self.consumed.delete(&mut wtxn, &key).map_err(store_err)?;
        wtxn.commit().map_err(store_err)
    }

    fn iter_consumed(
        &self,
        tenant: &TenantId,
    ) -> Result<Vec<(ScanToken, Timestamp)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(store_err)?;
        let prefix = Self::tenant_prefix(tenant);
        let mut out = Vec::new();
        for item in self
            .consumed
            .prefix_iter(&rtxn, &prefix)
            .map_err(store_err)?
        {
            let (key, consumed_at) = item.map_err(store_err)?;
            let token = key
                .strip_prefix(prefix.as_str())
                .ok_or_else(|| StoreError::Corruption(format!("malformed token key: {key}")))?;
            out.push((ScanToken::new(token), consumed_at));
        }
        Ok(out)
    }

    fn replace_consumed(
        &self,
        tenant: &TenantId,
        entries: &[(ScanToken, Timestamp)],
    ) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(store_err)?;
        let prefix = Self::tenant_prefix(tenant);

        let stale: Vec<String> = self
            .consumed
            .prefix_iter(&wtxn, &prefix)
            .map_err(store_err)?
            .map(|item| item.map(|(k, _)| k.to_string()))
            .collect::<Result<_, _>>()
            .map_err(store_err)?;
        for key in stale {
            self.consumed.delete(&mut wtxn, &key).map_err(store_err)?;
        }

        for (token, consumed_at) in entries {
            let key = Self::tenant_key(tenant, token.as_str());
            self.consumed
                .put(&mut wtxn, &key, consumed_at)
                .map_err(store_err)?;
        }
        wtxn.commit().map_err(store_err)
    }
}
