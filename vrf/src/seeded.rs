//! Chain-seeded randomness.
//!
//! `value = Blake2b(DOMAIN || block_hash || context)`. The block hash doubles
//! as the proof: any party holding the same chain state recomputes the value.

use crate::{RandomOutput, VrfError, VrfProvider};
use dnn_types::BlockHash;

const DOMAIN: &[u8] = b"dnn/chain-seed-vrf";

/// Deterministic provider seeded by a block hash.
#[derive(Clone, Debug)]
pub struct ChainSeedVrf {
    block_hash: BlockHash,
    round: u64,
}

impl ChainSeedVrf {
    pub fn new(block_hash: BlockHash, round: u64) -> Self {
        Self { block_hash, round }
    }

    pub fn block_hash(&self) -> BlockHash {
        self.block_hash
    }

    fn derive(&self, context: &[u8]) -> [u8; 32] {
        dnn_crypto::blake2b_256_multi(&[DOMAIN, self.block_hash.as_bytes(), context])
    }
}

impl VrfProvider for ChainSeedVrf {
    fn get_randomness(&self, context: &[u8]) -> Result<RandomOutput, VrfError> {
        Ok(RandomOutput {
            value: self.derive(context),
            proof: self.block_hash.as_bytes().to_vec(),
            round: self.round,
        })
    }

    fn verify(&self, context: &[u8], output: &RandomOutput) -> Result<bool, VrfError> {
        if output.proof.as_slice() != self.block_hash.as_bytes() {
            return Err(VrfError::ForeignProof);
        }
        Ok(output.round == self.round && output.value == self.derive(context))
    }

    fn name(&self) -> &str {
        "chain-seed"
    }
}
