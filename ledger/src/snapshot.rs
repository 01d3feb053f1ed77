//! Tenant backup export and import.
//!
//! A backup is a self-describing JSON document carrying every persisted
//! collection of one tenant. Import validates the whole document before
//! touching storage, so a rejected backup leaves the tenant untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use timbro_store::{CustomerStore, ScanStore, TokenStore};
use timbro_types::{Customer, ScanRecord, ScanToken, TenantId, Timestamp, MAX_COFFEES};

use crate::LedgerError;

/// Serialized snapshot of one tenant's state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantBackup {
    pub tenant_id: TenantId,
    pub export_timestamp: Timestamp,
    pub customers: Vec<Customer>,
    /// Token string to consumption time. A BTreeMap keeps the JSON stable
    /// across exports of identical state.
    pub consumed_tokens: BTreeMap<String, Timestamp>,
    pub scan_history: Vec<ScanRecord>,
}

impl TenantBackup {
    /// Snapshot everything a tenant has persisted.
    pub fn export_tenant<S>(
        store: &S,
        tenant: &TenantId,
        now: Timestamp,
    ) -> Result<Self, LedgerError>
    where
        S: CustomerStore + TokenStore + ScanStore,
    {
        let customers = store.iter_customers(tenant)?;
        let consumed_tokens = store
            .iter_consumed(tenant)?
            .into_iter()
            .map(|(token, at)| (token.to_string(), at))
            .collect();
        let scan_history = store.iter_scans(tenant)?;
        tracing::info!(%tenant, customers = customers.len(), "exported tenant backup");
        Ok(Self {
            tenant_id: tenant.clone(),
            export_timestamp: now,
            customers,
            consumed_tokens,
            scan_history,
        })
    }

    /// Replace the tenant's state with the backup's contents.
    ///
    /// Validation happens up front: a backup for another tenant or one with
    /// out-of-range balances is rejected before any collection is replaced.
    pub fn import_tenant<S>(&self, store: &S, tenant: &TenantId) -> Result<(), LedgerError>
    where
        S: CustomerStore + TokenStore + ScanStore,
    {
        if &self.tenant_id != tenant {
            return Err(LedgerError::TenantMismatch {
                expected: tenant.to_string(),
                found: self.tenant_id.to_string(),
            });
        }
        self.validate()?;

        let consumed: Vec<(ScanToken, Timestamp)> = self
            .consumed_tokens
            .iter()
            .map(|(token, at)| (ScanToken::new(token.clone()), *at))
            .collect();

        store.replace_customers(tenant, &self.customers)?;
        store.replace_consumed(tenant, &consumed)?;
        store.replace_scans(tenant, &self.scan_history)?;
        tracing::info!(%tenant, customers = self.customers.len(), "imported tenant backup");
        Ok(())
    }

    fn validate(&self) -> Result<(), LedgerError> {
        for customer in &self.customers {
            if customer.coffees > MAX_COFFEES {
                return Err(LedgerError::InvalidBackup(format!(
                    "customer '{}' has {} stamps, maximum is {}",
                    customer.id, customer.coffees, MAX_COFFEES
                )));
            }
            if customer.id.as_str().is_empty() {
                return Err(LedgerError::InvalidBackup(
                    "customer with empty id".into(),
                ));
            }
        }
        for record in &self.scan_history {
            if record.customer_id.as_str().is_empty() {
                return Err(LedgerError::InvalidBackup(
                    "scan record with empty customer id".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, LedgerError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::InvalidBackup(e.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, LedgerError> {
        serde_json::from_str(raw).map_err(|e| LedgerError::InvalidBackup(e.to_string()))
    }
}
