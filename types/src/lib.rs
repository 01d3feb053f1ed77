//! Fundamental types for the Timbro loyalty protocol.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: tenant and customer identifiers, the customer record, scan
//! tokens, timestamps, and the tunable loyalty parameters.

pub mod customer;
pub mod params;
pub mod scan;
pub mod tenant;
pub mod time;
pub mod token;

pub use customer::{Customer, CustomerId, MAX_COFFEES};
pub use params::LoyaltyParams;
pub use scan::ScanRecord;
pub use tenant::TenantId;
pub use time::Timestamp;
pub use token::ScanToken;
