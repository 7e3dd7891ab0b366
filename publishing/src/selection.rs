//! Voter panel selection using VRF randomness.

use std::collections::BTreeSet;

use dnn_types::{Address, ArticleId, DnnParams, Timestamp};
use dnn_vrf::{VrfError, VrfProvider};

use crate::article::VoterAssignment;
use crate::error::DnnError;

const SELECTION_DOMAIN: &[u8] = b"dnn/voter-selection";

/// VRF context for an article's draw: domain tag followed by the big-endian id.
pub fn selection_context(article: ArticleId) -> Vec<u8> {
    let mut context = Vec::with_capacity(SELECTION_DOMAIN.len() + 8);
    context.extend_from_slice(SELECTION_DOMAIN);
    context.extend_from_slice(&article.to_be_bytes());
    context
}

/// Draws voter panels from the eligible pool.
pub struct VoterSelector;

impl VoterSelector {
    /// Draw `params.required_voters` distinct voters for `article`.
    ///
    /// The selection is deterministic given the same randomness, so anyone can
    /// independently check which voters were drawn.
    ///
    /// Algorithm: for each candidate compute `Hash(seed || address)` and keep
    /// the `required_voters` lowest scores. Duplicate candidates are collapsed
    /// first, so no address can appear twice on a panel.
    pub fn select(
        &self,
        vrf: &dyn VrfProvider,
        article: ArticleId,
        candidates: &[Address],
        params: &DnnParams,
        now: Timestamp,
    ) -> Result<VoterAssignment, DnnError> {
        let pool: BTreeSet<&Address> = candidates.iter().collect();
        let need = params.required_voter_requests as usize;
        if pool.len() < need {
            return Err(DnnError::InsufficientVoters {
                have: pool.len(),
                need,
            });
        }

        let context = selection_context(article);
        let output = vrf.get_randomness(&context)?;
        if !vrf.verify(&context, &output)? {
            return Err(DnnError::Randomness(VrfError::VerificationFailed(format!(
                "{} output for article {article} failed verification",
                vrf.name()
            ))));
        }

        let mut scored: Vec<([u8; 32], &Address)> = pool
            .into_iter()
            .map(|addr| {
                let score =
                    dnn_crypto::blake2b_256_multi(&[&output.value, addr.as_str().as_bytes()]);
                (score, addr)
            })
            .collect();

        // Address breaks score ties so the order never depends on the input order.
        scored.sort();
        scored.truncate(params.required_voters as usize);

        Ok(VoterAssignment {
            article,
            voters: scored.into_iter().map(|(_, addr)| addr.clone()).collect(),
            round: output.round,
            assigned_at: now,
        })
    }
}
