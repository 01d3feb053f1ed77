//! Scan-side validation for the Timbro loyalty protocol.
//!
//! The terminal hands raw scanned bytes to the [`ScanValidator`], which runs
//! a fixed gate sequence and, on acceptance, commits exactly one stamp: the
//! token is marked consumed, a scan record is appended, and the customer's
//! card is updated — all under the tenant's lock. Every rejection is a
//! [`RejectReason`] and performs no mutation.

pub mod error;
pub mod guard;
pub mod outcome;
pub mod validator;

pub use error::ScanError;
pub use guard::TokenGuard;
pub use outcome::{RejectReason, ScanOutcome};
pub use validator::ScanValidator;
