//! Commit-reveal randomness.
//!
//! Participants first commit `Blake2b(value)`, then reveal `value`. Once every
//! committed participant has revealed, the values are combined into the seed.
//! A participant who never reveals blocks the round; `missing_reveals` names
//! them so the caller can penalise non-revealers.

use std::collections::BTreeMap;

use crate::{RandomOutput, VrfError, VrfProvider};
use dnn_types::Address;

/// A commitment from a participant.
#[derive(Clone, Debug)]
pub struct Commitment {
    pub participant: Address,
    /// Hash of the random value (commitment).
    pub hash: [u8; 32],
}

impl Commitment {
    /// Build the commitment for a secret value.
    pub fn for_value(participant: Address, value: &[u8; 32]) -> Self {
        Self {
            participant,
            hash: dnn_crypto::blake2b_256(value),
        }
    }
}

/// A reveal from a participant.
#[derive(Clone, Debug)]
pub struct Reveal {
    pub participant: Address,
    /// The actual random value.
    pub value: [u8; 32],
}

/// Commit-reveal VRF provider.
#[derive(Debug, Default)]
pub struct CommitRevealVrf {
    commitments: BTreeMap<Address, [u8; 32]>,
    reveals: BTreeMap<Address, [u8; 32]>,
    round: u64,
}

impl CommitRevealVrf {
    pub fn new(round: u64) -> Self {
        Self {
            commitments: BTreeMap::new(),
            reveals: BTreeMap::new(),
            round,
        }
    }

    /// Record a commitment. Commitments close as soon as the first reveal lands.
    pub fn record_commitment(&mut self, commitment: Commitment) -> Result<(), VrfError> {
        if !self.reveals.is_empty() {
            return Err(VrfError::CommitReveal("commit phase is closed".into()));
        }
        if self.commitments.contains_key(&commitment.participant) {
            return Err(VrfError::CommitReveal(format!(
                "{} already committed",
                commitment.participant
            )));
        }
        self.commitments
            .insert(commitment.participant, commitment.hash);
        Ok(())
    }

    /// Record a reveal and check it matches the commitment.
    pub fn record_reveal(&mut self, reveal: Reveal) -> Result<(), VrfError> {
        let committed = self.commitments.get(&reveal.participant).ok_or_else(|| {
            VrfError::CommitReveal(format!("{} never committed", reveal.participant))
        })?;
        if self.reveals.contains_key(&reveal.participant) {
            return Err(VrfError::CommitReveal(format!(
                "{} already revealed",
                reveal.participant
            )));
        }
        if dnn_crypto::blake2b_256(&reveal.value) != *committed {
            return Err(VrfError::VerificationFailed(format!(
                "reveal from {} does not match its commitment",
                reveal.participant
            )));
        }
        self.reveals.insert(reveal.participant, reveal.value);
        Ok(())
    }

    /// Participants that committed but have not revealed yet.
    pub fn missing_reveals(&self) -> Vec<&Address> {
        self.commitments
            .keys()
            .filter(|p| !self.reveals.contains_key(*p))
            .collect()
    }

    /// Combine all reveals into a single random seed.
    ///
    /// Values are hashed in participant order, so the seed does not depend on
    /// the order reveals arrived in.
    pub fn combine_reveals(&self) -> Result<[u8; 32], VrfError> {
        if self.commitments.is_empty() {
            return Err(VrfError::Unavailable("no commitments recorded".into()));
        }
        let missing = self.missing_reveals();
        if !missing.is_empty() {
            return Err(VrfError::CommitReveal(format!(
                "{} participant(s) have not revealed",
                missing.len()
            )));
        }
        let parts: Vec<&[u8]> = self.reveals.values().map(|v| v.as_slice()).collect();
        Ok(dnn_crypto::blake2b_256_multi(&parts))
    }
}

impl VrfProvider for CommitRevealVrf {
    fn get_randomness(&self, context: &[u8]) -> Result<RandomOutput, VrfError> {
        let combined = self.combine_reveals()?;
        Ok(RandomOutput {
            value: dnn_crypto::blake2b_256_multi(&[&combined, context]),
            proof: combined.to_vec(),
            round: self.round,
        })
    }

    fn verify(&self, context: &[u8], output: &RandomOutput) -> Result<bool, VrfError> {
        let combined = self.combine_reveals()?;
        if output.proof.as_slice() != combined.as_slice() {
            return Ok(false);
        }
        Ok(output.value == dnn_crypto::blake2b_256_multi(&[&combined, context]))
    }

    fn name(&self) -> &str {
        "commit-reveal"
    }
}
