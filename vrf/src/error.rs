//! Randomness provider failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VrfError {
    #[error("randomness failed verification: {0}")]
    VerificationFailed(String),

    /// The proof was produced from different chain state than the verifier holds.
    #[error("proof does not belong to this provider")]
    ForeignProof,

    #[error("randomness unavailable: {0}")]
    Unavailable(String),

    #[error("commit-reveal round: {0}")]
    CommitReveal(String),

    #[error("provider state lock poisoned")]
    Poisoned,
}
