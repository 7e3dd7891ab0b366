//! State enums for articles, votes, and account roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of an article.
///
/// Variants are declared in lifecycle order, so the derived `Ord` is the
/// progression order: an article's status only ever moves to a greater value.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ArticleStatus {
    /// Unknown article id.
    #[default]
    None,
    /// Submitted; no voters assigned yet.
    WaitingForVoters,
    /// Voters assigned; ballots are being collected.
    Voting,
    /// Resolved. Terminal.
    Done,
}

impl ArticleStatus {
    /// Whether moving from `self` to `next` is a legal single-step transition.
    pub fn can_transition_to(&self, next: ArticleStatus) -> bool {
        match (self, next) {
            (Self::None, Self::WaitingForVoters) => true,
            (Self::WaitingForVoters, Self::Voting) => true,
            (Self::Voting, Self::Done) => true,
            (Self::None, _) | (Self::WaitingForVoters, _) | (Self::Voting, _) | (Self::Done, _) => {
                false
            }
        }
    }

    /// Whether the article has reached its terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::WaitingForVoters => "waitingForVoters",
            Self::Voting => "voting",
            Self::Done => "done",
        };
        f.write_str(s)
    }
}

/// Outcome tag of a completed tally. `None` until the article is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteStatus {
    #[default]
    None,
    Accept,
    Reject,
}

impl fmt::Display for VoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Accept => "accept",
            Self::Reject => "reject",
        };
        f.write_str(s)
    }
}

/// A single voter's ballot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Accept,
    Reject,
}

impl Choice {
    /// The resolution this ballot argues for.
    pub fn as_vote_status(&self) -> VoteStatus {
        match self {
            Self::Accept => VoteStatus::Accept,
            Self::Reject => VoteStatus::Reject,
        }
    }
}

/// Roles an address may hold. An address may hold several at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Writer,
    Reviewer,
    Publisher,
    Reader,
    /// Eligible to be drawn into an article's voter assignment.
    Voter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Writer => "writer",
            Self::Reviewer => "reviewer",
            Self::Publisher => "publisher",
            Self::Reader => "reader",
            Self::Voter => "voter",
        };
        f.write_str(s)
    }
}
