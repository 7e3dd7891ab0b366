use dnn_ledger::LedgerError;
use dnn_types::{ArticleId, ArticleStatus, TypesError};
use dnn_vrf::VrfError;
use thiserror::Error;

/// Every way a contract operation can be rejected.
///
/// A returned error always means the operation changed nothing.
#[derive(Debug, Error)]
pub enum DnnError {
    #[error("{0} is not authorized for this operation")]
    Unauthorized(String),

    #[error("article {article} is in state {status}, operation not allowed")]
    InvalidState {
        article: ArticleId,
        status: ArticleStatus,
    },

    #[error("voter {voter} has already voted on article {article}")]
    AlreadyVoted { article: ArticleId, voter: String },

    #[error("{address} already holds role {role}")]
    AlreadyRegistered { address: String, role: String },

    #[error("not enough eligible voters: have {have}, need {need}")]
    InsufficientVoters { have: usize, need: usize },

    #[error("voting on article {0} is closed")]
    VotingClosed(ArticleId),

    #[error("article {0} cannot be resolved yet: quorum not reached and voting still open")]
    NotReady(ArticleId),

    #[error("randomness error: {0}")]
    Randomness(#[from] VrfError),

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] TypesError),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
