//! Consumed-token guard with opportunistic garbage collection.

use std::sync::Arc;

use timbro_store::{StoreError, TokenStore};
use timbro_types::{LoyaltyParams, ScanToken, TenantId, Timestamp};

/// Tracks which scan tokens have already been accepted.
///
/// Entries are kept for `token_retention_ms` after consumption; the retention
/// window is validated to be at least the credential acceptance window, so an
/// entry can never be collected while its credential would still pass the
/// freshness gate. GC runs inline on every mark, keeping the set bounded by
/// recent traffic without a background task.
pub struct TokenGuard<S> {
    store: Arc<S>,
    retention_ms: u64,
}

impl<S: TokenStore> TokenGuard<S> {
    pub fn new(store: Arc<S>, params: &LoyaltyParams) -> Self {
        Self {
            store,
            retention_ms: params.token_retention_ms,
        }
    }

    /// Whether this token has already been accepted.
    pub fn is_consumed(&self, tenant: &TenantId, token: &ScanToken) -> Result<bool, StoreError> {
        Ok(self.store.get_consumed(tenant, token)?.is_some())
    }

    /// Record the token as consumed, sweeping out entries past retention.
    ///
    /// Callers hold the tenant lock across the preceding `is_consumed` check
    /// and this call.
    pub fn mark_consumed(
        &self,
        tenant: &TenantId,
        token: &ScanToken,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        self.sweep(tenant, now)?;
        self.store.put_consumed(tenant, token, now)
    }

    /// Undo a consumption mark after a failed commit.
    pub fn unmark(&self, tenant: &TenantId, token: &ScanToken) -> Result<(), StoreError> {
        self.store.delete_consumed(tenant, token)
    }

    fn sweep(&self, tenant: &TenantId, now: Timestamp) -> Result<(), StoreError> {
        let mut swept = 0u64;
        for (token, consumed_at) in self.store.iter_consumed(tenant)? {
            if consumed_at.has_expired(self.retention_ms, now) {
                self.store.delete_consumed(tenant, &token)?;
                swept += 1;
            }
        }
        if swept > 0 {
            tracing::debug!(%tenant, swept, "collected expired token entries");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timbro_nullables::NullStore;

    fn guard() -> (Arc<NullStore>, TokenGuard<NullStore>) {
        let store = Arc::new(NullStore::new());
        let guard = TokenGuard::new(store.clone(), &LoyaltyParams::loyalty_defaults());
        (store, guard)
    }

    fn tenant() -> TenantId {
        TenantId::new("bar-sole")
    }

    #[test]
    fn mark_then_check() {
        let (_, guard) = guard();
        let token = ScanToken::generate();
        assert!(!guard.is_consumed(&tenant(), &token).unwrap());

        guard
            .mark_consumed(&tenant(), &token, Timestamp::new(1_000))
            .unwrap();
        assert!(guard.is_consumed(&tenant(), &token).unwrap());
    }

    #[test]
    fn unmark_reverts_a_mark() {
        let (_, guard) = guard();
        let token = ScanToken::generate();
        guard
            .mark_consumed(&tenant(), &token, Timestamp::new(1_000))
            .unwrap();
        guard.unmark(&tenant(), &token).unwrap();
        assert!(!guard.is_consumed(&tenant(), &token).unwrap());
    }

    #[test]
    fn entries_survive_the_retention_window() {
        let (_, guard) = guard();
        let old = ScanToken::new("old");
        guard
            .mark_consumed(&tenant(), &old, Timestamp::new(0))
            .unwrap();

        // Exactly at retention: still present.
        guard
            .mark_consumed(&tenant(), &ScanToken::new("mid"), Timestamp::new(300_000))
            .unwrap();
        assert!(guard.is_consumed(&tenant(), &old).unwrap());

        // One past retention: swept by the next mark.
        guard
            .mark_consumed(&tenant(), &ScanToken::new("new"), Timestamp::new(300_001))
            .unwrap();
        assert!(!guard.is_consumed(&tenant(), &old).unwrap());
        assert!(guard.is_consumed(&tenant(), &ScanToken::new("mid")).unwrap());
    }

    #[test]
    fn retention_outlasts_credential_acceptance() {
        let (_, guard) = guard();
        let token = ScanToken::generate();
        guard
            .mark_consumed(&tenant(), &token, Timestamp::new(0))
            .unwrap();

        // Well past the 30s acceptance window, entry is still held.
        guard
            .mark_consumed(&tenant(), &ScanToken::generate(), Timestamp::new(31_000))
            .unwrap();
        assert!(guard.is_consumed(&tenant(), &token).unwrap());
    }
}
