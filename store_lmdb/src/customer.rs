//! LMDB implementation of CustomerStore.

use timbro_store::{CustomerStore, StoreError};
use timbro_types::{Customer, CustomerId, TenantId};

use crate::environment::LmdbStore;
use crate::error::store_err;

impl CustomerStore for LmdbStore {
    fn get_customer(
        &self,
        tenant: &TenantId,
        id: &CustomerId,
    ) -> Result<Option<Customer>, StoreError> {
        let rtxn = self.env.read_txn().map_err(store_err)?;
        let key = Self::tenant_key(tenant, id.as_str());
        self.customers.get(&rtxn, &key).map_err(store_err)
    }

    fn put_customer(&self, tenant: &TenantId, customer: &Customer) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(store_err)?;
        let key = Self::tenant_key(tenant, customer.id.as_str());
        self.customers
            .put(&mut wtxn, &key, customer)
            .map_err(store_err)?;
        wtxn.commit().map_err(store_err)
    }

    fn iter_customers(&self, tenant: &TenantId) -> Result<Vec<Customer>, StoreError> {
        let rtxn = self.env.read_txn().map_err(store_err)?;
        let prefix = Self::tenant_prefix(tenant);
        let mut out = Vec::new();
        for item in self
            .customers
            .prefix_iter(&rtxn, &prefix)
            .map_err(store_err)?
        {
            let (_, customer) = item.map_err(store_err)?;
            out.push(customer);
        }
        Ok(out)
    }

    fn replace_customers(
        &self,
        tenant: &TenantId,
        customers: &[Customer],
    ) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(store_err)?;
        let prefix = Self::tenant_prefix(tenant);

        let stale: Vec<String> = self
            .customers
            .prefix_iter(&wtxn, &prefix)
            .map_err(store_err)?
            .map(|item| item.map(|(k, _)| k.to_string()))
            .collect::<Result<_, _>>()
            .map_err(store_err)?;
        for key in stale {
            self.customers.delete(&mut wtxn, &key).map_err(store_err)?;
        }

        for customer in customers {
            let key = Self::tenant_key(tenant, customer.id.as_str());
            self.customers
                .put(&mut wtxn, &key, customer)
                .map_err(store_err)?;
        }
        wtxn.commit().map_err(store_err)
    }
}
