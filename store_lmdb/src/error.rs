use thiserror::Error;
use timbro_store::StoreError;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(#[from] heed::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map a heed failure onto the backend-agnostic store error.
pub(crate) fn store_err(e: heed::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}
