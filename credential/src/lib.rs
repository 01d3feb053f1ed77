//! Presentation credentials — the short-lived, single-use payload a customer
//! device shows to the scanning terminal.
//!
//! The issuer is stateless: the presenting side calls [`CredentialIssuer::issue`]
//! every re-issuance interval and renders the encoded result as a visual code.
//! Nothing is persisted here; consumption tracking lives in the token guard.

pub mod error;
pub mod issuer;
pub mod wire;

pub use error::CredentialError;
pub use issuer::CredentialIssuer;
pub use wire::Credential;
