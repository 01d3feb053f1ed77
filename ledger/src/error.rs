use thiserror::Error;
use timbro_store::StoreError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("customer not found: {0}")]
    UnknownCustomer(String),

    #[error("card is already full")]
    CardFull,

    #[error("not enough stamps to redeem")]
    NotRedeemable,

    #[error("backup belongs to tenant '{found}', not '{expected}'")]
    TenantMismatch { expected: String, found: String },

    #[error("invalid backup: {0}")]
    InvalidBackup(String),

    #[error("date out of range for this timezone offset")]
    InvalidDate,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
