use thiserror::Error;
use timbro_store::StoreError;

/// Infrastructure failure during scan processing.
///
/// Distinct from every [`crate::RejectReason`]: a rejection means the
/// credential was judged and refused, a `ScanError` means no judgement could
/// be made. Callers should tell the operator to retry; nothing is retried
/// automatically.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}
