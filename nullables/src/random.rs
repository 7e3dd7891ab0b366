//! Nullable random: deterministic random number generation.

use dnn_vrf::{RandomOutput, VrfError, VrfProvider};
use std::sync::Mutex;

/// A deterministic VRF provider for testing.
///
/// Returns pre-configured values in order, or fails every call when built
/// with [`NullRandom::failing`].
pub struct NullRandom {
    outputs: Vec<[u8; 32]>,
    index: Mutex<usize>,
    reject_proofs: bool,
}

impl NullRandom {
    /// Create with a sequence of deterministic random values.
    pub fn new(outputs: Vec<[u8; 32]>) -> Self {
        Self {
            outputs,
            index: Mutex::new(0),
            reject_proofs: false,
        }
    }

    /// Create with a single value that will be returned for every call.
    pub fn constant(value: [u8; 32]) -> Self {
        Self::new(vec![value])
    }

    /// A provider whose randomness source is unavailable.
    pub fn failing() -> Self {
        Self::new(Vec::new())
    }

    /// A provider that hands out values but refuses to verify them.
    pub fn unverifiable(value: [u8; 32]) -> Self {
        Self {
            reject_proofs: true,
            ..Self::constant(value)
        }
    }
}

impl VrfProvider for NullRandom {
    fn get_randomness(&self, _context: &[u8]) -> Result<RandomOutput, VrfError> {
        if self.outputs.is_empty() {
            return Err(VrfError::Unavailable("null random has no outputs".into()));
        }
        let mut idx = self
            .index
            .lock()
            .map_err(|_| VrfError::Poisoned)?;
        let current = *idx % self.outputs.len();
        *idx += 1;
        Ok(RandomOutput {
            value: self.outputs[current],
            proof: Vec::new(),
            round: current as u64,
        })
    }

    fn verify(&self, _context: &[u8], _output: &RandomOutput) -> Result<bool, VrfError> {
        Ok(!self.reject_proofs)
    }

    fn name(&self) -> &str {
        "null-random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_outputs() {
        let rng = NullRandom::new(vec![[1u8; 32], [2u8; 32]]);
        assert_eq!(rng.get_randomness(b"").unwrap().value, [1u8; 32]);
        assert_eq!(rng.get_randomness(b"").unwrap().value, [2u8; 32]);
        assert_eq!(rng.get_randomness(b"").unwrap().value, [1u8; 32]);
    }

    #[test]
    fn failing_provider_is_unavailable() {
        assert!(matches!(
            NullRandom::failing().get_randomness(b"ctx"),
            Err(VrfError::Unavailable(_))
        ));
    }
}
