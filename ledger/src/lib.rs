//! Point ledger for the Timbro loyalty protocol.
//!
//! The ledger owns the accrual and redemption rules applied to customer
//! records, customer registration, the day-bucketed scan history query, and
//! the tenant backup surface. Storage is injected through the traits in
//! `timbro-store`, so the ledger itself has no hidden global state.

pub mod error;
pub mod history;
pub mod ledger;
pub mod points;
pub mod snapshot;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use snapshot::TenantBackup;
