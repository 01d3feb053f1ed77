//! Abstract storage traits for the Timbro loyalty protocol.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits, and every
//! operation is scoped to a single tenant — there is no way to read or write
//! across tenant boundaries through this interface.

pub mod customer;
pub mod error;
pub mod locks;
pub mod scan;
pub mod token;

pub use customer::CustomerStore;
pub use error::StoreError;
pub use locks::TenantLocks;
pub use scan::ScanStore;
pub use token::TokenStore;
