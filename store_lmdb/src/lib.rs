//! LMDB storage backend for the Timbro loyalty protocol.
//!
//! Implements all storage traits from `timbro-store` using the `heed` LMDB
//! bindings. Each logical collection maps to one LMDB database within a
//! single environment; tenant partitioning is encoded in the keys.

pub mod customer;
pub mod environment;
pub mod error;
pub mod scan;
pub mod token;

pub use environment::LmdbStore;
pub use error::LmdbError;
