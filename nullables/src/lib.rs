//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies of the contract (clock, randomness, ledger) sit
//! behind traits or explicit parameters. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod ledger;
pub mod random;

pub use clock::NullClock;
pub use ledger::NullLedger;
pub use random::NullRandom;
