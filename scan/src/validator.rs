//! The scan validation state machine.

use std::sync::Arc;

use timbro_credential::Credential;
use timbro_ledger::points;
use timbro_store::{CustomerStore, ScanStore, TenantLocks, TokenStore};
use timbro_types::{Customer, LoyaltyParams, ScanRecord, TenantId, Timestamp};

use crate::outcome::{RejectReason, ScanOutcome};
use crate::{ScanError, TokenGuard};

/// Validates raw scanned bytes and commits accepted scans.
///
/// Gates run in a fixed order and short-circuit on the first failure:
/// parse, tenant, freshness, token, customer. Only after all five pass does
/// the commit run, under the tenant's lock, so two simultaneous scans of the
/// same credential resolve to one acceptance and one `AlreadyUsed`.
pub struct ScanValidator<S> {
    store: Arc<S>,
    guard: TokenGuard<S>,
    locks: Arc<TenantLocks>,
    params: LoyaltyParams,
}

impl<S> ScanValidator<S>
where
    S: CustomerStore + TokenStore + ScanStore,
{
    pub fn new(store: Arc<S>, params: LoyaltyParams) -> Self {
        Self::with_locks(store, Arc::new(TenantLocks::new()), params)
    }

    /// Share a lock map with the ledger so scan commits and staff-triggered
    /// mutations serialize on the same per-tenant mutex.
    pub fn with_locks(store: Arc<S>, locks: Arc<TenantLocks>, params: LoyaltyParams) -> Self {
        let guard = TokenGuard::new(store.clone(), &params);
        Self {
            store,
            guard,
            locks,
            params,
        }
    }

    /// Process one scan at time `now`.
    ///
    /// `Ok(ScanOutcome)` means the credential was judged; `Err(ScanError)`
    /// means storage failed before a judgement (or commit) could complete,
    /// and nothing was recorded.
    pub fn process_scan(
        &self,
        tenant: &TenantId,
        raw: &str,
        now: Timestamp,
    ) -> Result<ScanOutcome, ScanError> {
        let credential = match Credential::decode(raw) {
            Ok(c) => c,
            Err(_) => return Ok(self.reject(tenant, RejectReason::MalformedCredential)),
        };

        if credential.tenant_id != *tenant {
            return Ok(self.reject(tenant, RejectReason::WrongTenant));
        }

        if credential
            .issued_at
            .has_expired(self.params.credential_ttl_ms, now)
        {
            return Ok(self.reject(tenant, RejectReason::Expired));
        }

        self.locks.with_tenant(tenant, || {
            if self.guard.is_consumed(tenant, &credential.token)? {
                return Ok(self.reject(tenant, RejectReason::AlreadyUsed));
            }

            let customer = match self.store.get_customer(tenant, &credential.customer_id)? {
                Some(c) => c,
                None => return Ok(self.reject(tenant, RejectReason::UnknownCustomer)),
            };

            let committed = self.commit(tenant, &credential, customer, now)?;
            let prompt_redemption = committed.coffees >= self.params.max_coffees;
            tracing::info!(
                %tenant,
                customer = %committed.id,
                coffees = committed.coffees,
                prompt_redemption,
                "scan accepted"
            );
            Ok(ScanOutcome::Accepted {
                customer: committed,
                prompt_redemption,
            })
        })
    }

    /// Token mark, accrual and history append as one logical unit. Writes
    /// are ordered so the history append is the last fallible step; if any
    /// write after the mark fails, the mark and the customer record are
    /// rolled back, leaving no trace of the scan and the credential
    /// spendable on retry.
    fn commit(
        &self,
        tenant: &TenantId,
        credential: &Credential,
        customer: Customer,
        now: Timestamp,
    ) -> Result<Customer, ScanError> {
        self.guard.mark_consumed(tenant, &credential.token, now)?;

        // A full card accrues nothing; the scan still counts as a visit.
        let updated = match points::accrue(&customer, self.params.max_coffees) {
            Ok(updated) => updated,
            Err(_) => customer.clone(),
        };

        let result = (|| {
            self.store.put_customer(tenant, &updated)?;
            self.store
                .append_scan(tenant, &ScanRecord::new(customer.id.clone(), now))?;
            Ok::<(), ScanError>(())
        })();

        match result {
            Ok(()) => Ok(updated),
            Err(e) => {
                if let Err(rollback) = self.guard.unmark(tenant, &credential.token) {
                    tracing::error!(%tenant, error = %rollback, "token rollback failed");
                }
                if let Err(rollback) = self.store.put_customer(tenant, &customer) {
                    tracing::error!(%tenant, error = %rollback, "customer rollback failed");
                }
                Err(e)
            }
        }
    }

    fn reject(&self, tenant: &TenantId, reason: RejectReason) -> ScanOutcome {
        tracing::warn!(%tenant, %reason, "scan rejected");
        ScanOutcome::Rejected(reason)
    }
}
