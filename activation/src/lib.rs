//! Remote tenant-activation client.
//!
//! The vendor publishes a small JSON allow-list mapping tenant ids to an
//! activation record: `{"bar-sole": {"status": "active", "expires":
//! "2025-12-31"}, ...}`. The client fetches it once per session and reports
//! one of four states. It never panics and never blocks a scan: network or
//! parse trouble reports [`ActivationStatus::Error`] and the caller decides
//! what to do with it.

pub mod client;
pub mod status;

pub use client::ActivationClient;
pub use status::{ActivationInfo, ActivationStatus};
