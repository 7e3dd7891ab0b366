//! Deployment parameters.
//!
//! Fixed when the contract is deployed; nothing in the core mutates them
//! afterwards.

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// Minimum number of eligible candidates before voters can be drawn.
pub const REQUIRED_VOTER_REQUESTS: u32 = 10;
/// Voters drawn per article; also the quorum for early resolution.
pub const REQUIRED_VOTERS: u32 = 7;
/// Fee (raw token units) paid to the writer of an accepted article.
pub const WRITER_FEE: u64 = 100;
/// Length of the voting window in seconds (3 days).
pub const VOTING_PERIOD_DURATION: u64 = 3 * 24 * 3600;

/// All deployment parameters of a DNN contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnnParams {
    /// Candidate pool size required before a voter assignment is drawn.
    #[serde(default = "default_required_voter_requests")]
    pub required_voter_requests: u32,

    /// Voters assigned per article (the quorum).
    #[serde(default = "default_required_voters")]
    pub required_voters: u32,

    /// Fee paid to the writer when an article is accepted.
    #[serde(default = "default_writer_fee")]
    pub writer_fee: u64,

    /// Voting window, starting when voters are assigned.
    #[serde(default = "default_voting_period_secs")]
    pub voting_period_secs: u64,
}

fn default_required_voter_requests() -> u32 {
    REQUIRED_VOTER_REQUESTS
}

fn default_required_voters() -> u32 {
    REQUIRED_VOTERS
}

fn default_writer_fee() -> u64 {
    WRITER_FEE
}

fn default_voting_period_secs() -> u64 {
    VOTING_PERIOD_DURATION
}

impl DnnParams {
    /// The production configuration.
    pub fn dnn_defaults() -> Self {
        Self {
            required_voter_requests: REQUIRED_VOTER_REQUESTS,
            required_voters: REQUIRED_VOTERS,
            writer_fee: WRITER_FEE,
            voting_period_secs: VOTING_PERIOD_DURATION,
        }
    }

    /// Reject parameter sets the lifecycle cannot run under.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.required_voters == 0 {
            return Err(TypesError::InvalidParams(
                "required_voters must be at least 1".into(),
            ));
        }
        if self.required_voters > self.required_voter_requests {
            return Err(TypesError::InvalidParams(format!(
                "required_voters ({}) exceeds required_voter_requests ({})",
                self.required_voters, self.required_voter_requests
            )));
        }
        if self.voting_period_secs == 0 {
            return Err(TypesError::InvalidParams(
                "voting_period_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for DnnParams {
    fn default() -> Self {
        Self::dnn_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol_constants() {
        let p = DnnParams::default();
        assert_eq!(p.required_voter_requests, 10);
        assert_eq!(p.required_voters, 7);
        assert_eq!(p.writer_fee, 100);
        assert_eq!(p.voting_period_secs, 259_200);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn zero_quorum_is_invalid() {
        let p = DnnParams {
            required_voters: 0,
            ..DnnParams::default()
        };
        assert!(matches!(p.validate(), Err(TypesError::InvalidParams(_))));
    }

    #[test]
    fn quorum_larger_than_pool_is_invalid() {
        let p = DnnParams {
            required_voters: 11,
            ..DnnParams::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn zero_voting_period_is_invalid() {
        let p = DnnParams {
            voting_period_secs: 0,
            ..DnnParams::default()
        };
        assert!(p.validate().is_err());
    }
}
