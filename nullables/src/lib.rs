//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (clock, storage) are abstracted behind traits or
//! explicit arguments. This crate provides test-friendly implementations that
//! return deterministic values, can be controlled programmatically, and never
//! touch the filesystem.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::NullStore;
