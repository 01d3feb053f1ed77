//! LMDB environment setup and key layout.

use std::path::Path;

use heed::types::{SerdeBincode, Str};
use heed::{Database, Env, EnvOpenOptions};
use timbro_types::{Customer, ScanRecord, TenantId, Timestamp};

use crate::error::LmdbError;

/// Unit separator between the tenant prefix and the entry key.
///
/// Tenant ids are opaque slugs and never contain control characters, so a
/// prefix scan on `"{tenant}\x1f"` sees exactly that tenant's entries.
pub(crate) const KEY_SEP: char = '\u{1f}';

/// Wraps the LMDB environment and all database handles.
pub struct LmdbStore {
    pub(crate) env: Env,
    /// customer id -> customer record
    pub(crate) customers: Database<Str, SerdeBincode<Customer>>,
    /// scan token -> consumption timestamp
    pub(crate) consumed: Database<Str, SerdeBincode<Timestamp>>,
    /// zero-padded sequence -> scan record (lexicographic key order == append order)
    pub(crate) scans: Database<Str, SerdeBincode<ScanRecord>>,
    /// tenant -> next scan sequence number
    pub(crate) scan_seq: Database<Str, SerdeBincode<u64>>,
}

impl LmdbStore {
    /// Default map size: 256 MiB, far beyond realistic single-tenant traffic.
    pub const DEFAULT_MAP_SIZE: usize = 256 * 1024 * 1024;

    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path) -> Result<Self, LmdbError> {
        Self::open_with_map_size(path, Self::DEFAULT_MAP_SIZE)
    }

    pub fn open_with_map_size(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // Safety: nothing else maps this environment path in-process.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(4)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let customers = env.create_database(&mut wtxn, Some("customers"))?;
        let consumed = env.create_database(&mut wtxn, Some("consumed_tokens"))?;
        let scans = env.create_database(&mut wtxn, Some("scan_history"))?;
        let scan_seq = env.create_database(&mut wtxn, Some("scan_seq"))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), "opened LMDB environment");

        Ok(Self {
            env,
            customers,
            consumed,
            scans,
            scan_seq,
        })
    }

    /// Compose the storage key for an entry within a tenant's partition.
    pub(crate) fn tenant_key(tenant: &TenantId, key: &str) -> String {
        format!("{}{}{}", tenant.as_str(), KEY_SEP, key)
    }

    /// Prefix that covers every entry of a tenant.
    pub(crate) fn tenant_prefix(tenant: &TenantId) -> String {
        format!("{}{}", tenant.as_str(), KEY_SEP)
    }
}
