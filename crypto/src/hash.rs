//! Blake2b-256, the only hash in the protocol.
//!
//! Used for article content hashes, voter selection scores, and the
//! seeded randomness providers.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use dnn_types::ContentHash;

type Blake2b256 = Blake2b<U32>;

pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash the concatenation of `parts` without building it.
///
/// Part boundaries are not encoded: `["ab", "c"]` and `["a", "bc"]` collide.
/// Callers mixing variable-length inputs must keep all but the last fixed-size.
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let digest = parts
        .iter()
        .fold(Blake2b256::new(), |hasher, part| hasher.chain_update(*part))
        .finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Content hash recorded for a submitted article body.
pub fn hash_content(content: &[u8]) -> ContentHash {
    ContentHash::new(blake2b_256(content))
}
