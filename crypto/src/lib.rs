//! Hashing primitives for the DNN protocol.
//!
//! - **Blake2b-256** for article content hashes, voter selection scores and
//!   seeded randomness.

pub mod hash;

pub use hash::{blake2b_256, blake2b_256_multi, hash_content};
