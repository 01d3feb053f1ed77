use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("malformed credential: {0}")]
    Malformed(String),
}
