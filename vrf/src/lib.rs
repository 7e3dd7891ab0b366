//! Verifiable randomness for fair voter selection.
//!
//! Two providers:
//! - **Chain seed**: randomness derived from a block hash and the request
//!   context, reproducible by anyone who knows the chain state.
//! - **Commit-reveal**: participants commit hashed values, then reveal them;
//!   the combined reveals seed the output. Unpredictable as long as one
//!   participant is honest.

pub mod commit_reveal;
pub mod error;
pub mod seeded;

pub use commit_reveal::{Commitment, CommitRevealVrf, Reveal};
pub use error::VrfError;
pub use seeded::ChainSeedVrf;

/// Trait for providing verifiable randomness.
pub trait VrfProvider: Send + Sync {
    /// Get randomness for a given context (e.g., a voter-selection request).
    fn get_randomness(&self, context: &[u8]) -> Result<RandomOutput, VrfError>;

    /// Verify that a randomness output was correctly generated.
    fn verify(&self, context: &[u8], output: &RandomOutput) -> Result<bool, VrfError>;

    /// Human-readable name of this VRF provider.
    fn name(&self) -> &str;
}

/// The output of a VRF: a random value with its proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomOutput {
    /// The random bytes (32 bytes).
    pub value: [u8; 32],
    /// Proof that the value was correctly generated.
    pub proof: Vec<u8>,
    /// Round number or epoch the value belongs to.
    pub round: u64,
}
