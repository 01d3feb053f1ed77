//! Integration tests exercising the full loyalty pipeline:
//! registration → credential issuance → scan validation → ledger commit →
//! LMDB persistence → backup round-trip.
//!
//! These tests wire together components that are normally only connected
//! inside the terminal application, verifying the system works end-to-end —
//! not just in isolation.

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate};
use timbro_credential::CredentialIssuer;
use timbro_ledger::{Ledger, TenantBackup};
use timbro_nullables::NullClock;
use timbro_scan::{RejectReason, ScanOutcome, ScanValidator};
use timbro_store::TenantLocks;
use timbro_store_lmdb::LmdbStore;
use timbro_types::{LoyaltyParams, TenantId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Terminal {
    _dir: tempfile::TempDir,
    store: Arc<LmdbStore>,
    ledger: Ledger<LmdbStore>,
    validator: ScanValidator<LmdbStore>,
    issuer: CredentialIssuer,
    clock: NullClock,
    tenant: TenantId,
}

fn terminal() -> Terminal {
    timbro_utils::try_init_tracing();
    let dir = tempfile::tempdir().expect("temp dir");
    let store = Arc::new(LmdbStore::open(dir.path()).expect("open store"));
    let locks = Arc::new(TenantLocks::new());
    let params = LoyaltyParams::loyalty_defaults();
    Terminal {
        ledger: Ledger::with_locks(store.clone(), locks.clone(), params.clone()),
        validator: ScanValidator::with_locks(store.clone(), locks, params),
        issuer: CredentialIssuer::default(),
        clock: NullClock::new(1_710_064_800_000), // 2024-03-10T10:00:00Z
        store,
        _dir: dir,
        tenant: TenantId::new("bar-sole"),
    }
}

impl Terminal {
    fn scan_for(&self, customer_id: &timbro_types::CustomerId) -> ScanOutcome {
        let customer = self
            .ledger
            .customer(&self.tenant, customer_id)
            .unwrap()
            .expect("registered customer");
        let raw = self
            .issuer
            .issue(&customer, &self.tenant, self.clock.now())
            .encode();
        self.validator
            .process_scan(&self.tenant, &raw, self.clock.now())
            .unwrap()
    }
}

// ---------------------------------------------------------------------------
// 1. A customer's full card lifecycle over LMDB
// ---------------------------------------------------------------------------

#[test]
fn full_card_lifecycle_persists() {
    let t = terminal();
    let customer = t.ledger.register(&t.tenant, "Mario Rossi").unwrap();

    for visit in 1..=10u8 {
        match t.scan_for(&customer.id) {
            ScanOutcome::Accepted {
                customer: updated,
                prompt_redemption,
            } => {
                assert_eq!(updated.coffees, visit);
                assert_eq!(prompt_redemption, visit == 10);
            }
            other => panic!("visit {visit} rejected: {other:?}"),
        }
        t.clock.advance(60_000);
    }

    let redeemed = t.ledger.redeem(&t.tenant, &customer.id).unwrap();
    assert_eq!(redeemed.coffees, 0);

    // Ten visits stay in history through the redemption.
    let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let utc = FixedOffset::east_opt(0).unwrap();
    let scanned = t.ledger.customers_scanned_on(&t.tenant, day, utc).unwrap();
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].coffees, 0);
}

// ---------------------------------------------------------------------------
// 2. Replay defense holds across validator instances
// ---------------------------------------------------------------------------

#[test]
fn replayed_credential_is_refused_by_a_fresh_validator() {
    let t = terminal();
    let customer = t.ledger.register(&t.tenant, "Mario Rossi").unwrap();
    let raw = t
        .issuer
        .issue(&customer, &t.tenant, t.clock.now())
        .encode();

    assert!(t
        .validator
        .process_scan(&t.tenant, &raw, t.clock.now())
        .unwrap()
        .is_accepted());

    // A second validator over the same store sees the consumed token.
    let other = ScanValidator::new(t.store.clone(), LoyaltyParams::loyalty_defaults());
    assert_eq!(
        other.process_scan(&t.tenant, &raw, t.clock.now()).unwrap(),
        ScanOutcome::Rejected(RejectReason::AlreadyUsed)
    );
}

// ---------------------------------------------------------------------------
// 3. Reissue keeps a customer scannable while stale codes die
// ---------------------------------------------------------------------------

#[test]
fn stale_credential_expires_but_a_reissued_one_passes() {
    let t = terminal();
    let customer = t.ledger.register(&t.tenant, "Mario Rossi").unwrap();

    let stale = t
        .issuer
        .issue(&customer, &t.tenant, t.clock.now())
        .encode();
    t.clock.advance(45_000);

    assert_eq!(
        t.validator
            .process_scan(&t.tenant, &stale, t.clock.now())
            .unwrap(),
        ScanOutcome::Rejected(RejectReason::Expired)
    );
    assert!(t.scan_for(&customer.id).is_accepted());
}

// ---------------------------------------------------------------------------
// 4. Backup round-trip through a second environment
// ---------------------------------------------------------------------------

#[test]
fn backup_migrates_a_tenant_between_environments() {
    let t = terminal();
    let customer = t.ledger.register(&t.tenant, "Mario Rossi").unwrap();
    for _ in 0..3 {
        assert!(t.scan_for(&customer.id).is_accepted());
        t.clock.advance(60_000);
    }

    let backup =
        TenantBackup::export_tenant(t.store.as_ref(), &t.tenant, t.clock.now()).unwrap();
    let json = backup.to_json().unwrap();

    let dir = tempfile::tempdir().expect("temp dir");
    let restored_store = Arc::new(LmdbStore::open(dir.path()).expect("open store"));
    TenantBackup::from_json(&json)
        .unwrap()
        .import_tenant(restored_store.as_ref(), &t.tenant)
        .unwrap();

    let restored = Ledger::new(restored_store.clone(), LoyaltyParams::loyalty_defaults());
    let migrated = restored
        .customer(&t.tenant, &customer.id)
        .unwrap()
        .expect("migrated customer");
    assert_eq!(migrated.coffees, 3);

    // The guard state travelled too: three consumed tokens, and a fresh
    // credential still scans in the new environment.
    let validator =
        ScanValidator::new(restored_store.clone(), LoyaltyParams::loyalty_defaults());
    let fresh = t
        .issuer
        .issue(&migrated, &t.tenant, t.clock.now())
        .encode();
    assert!(validator
        .process_scan(&t.tenant, &fresh, t.clock.now())
        .unwrap()
        .is_accepted());

    let after =
        TenantBackup::export_tenant(restored_store.as_ref(), &t.tenant, t.clock.now()).unwrap();
    assert_eq!(after.consumed_tokens.len(), 4);
    assert_eq!(after.scan_history.len(), 4);
}
