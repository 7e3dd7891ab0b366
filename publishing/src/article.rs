//! Article state: the record the lifecycle owns for every submission.

use dnn_types::{Address, ArticleId, ArticleStatus, Choice, ContentHash, Timestamp, VoteStatus};
use serde::{Deserialize, Serialize};

/// A submitted article and everything recorded about its review.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub writer: Address,
    pub content_hash: ContentHash,
    /// Current lifecycle phase; only ever moves forward.
    pub status: ArticleStatus,
    pub created_at: Timestamp,
    /// Last instant a ballot is accepted. Set when voters are assigned.
    pub voting_deadline: Option<Timestamp>,
    /// The voter panel. Set exactly once, when voting opens.
    pub assignment: Option<VoterAssignment>,
    /// Ballots in the order they were cast.
    pub votes: Vec<VoteRecord>,
    pub tally: VoteTally,
    /// `VoteStatus::None` until the article is done.
    pub resolution: VoteStatus,
    pub resolved_at: Option<Timestamp>,
}

impl Article {
    pub(crate) fn new(
        id: ArticleId,
        writer: Address,
        content_hash: ContentHash,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            writer,
            content_hash,
            status: ArticleStatus::WaitingForVoters,
            created_at: now,
            voting_deadline: None,
            assignment: None,
            votes: Vec::new(),
            tally: VoteTally::default(),
            resolution: VoteStatus::None,
            resolved_at: None,
        }
    }

    /// Whether `voter` sits on this article's panel.
    pub fn is_assigned(&self, voter: &Address) -> bool {
        self.assignment
            .as_ref()
            .is_some_and(|a| a.voters.contains(voter))
    }

    /// Whether `voter` already has a ballot recorded.
    pub fn has_voted(&self, voter: &Address) -> bool {
        self.votes.iter().any(|v| &v.voter == voter)
    }

    /// The ballot `voter` cast, if any.
    pub fn vote_of(&self, voter: &Address) -> Option<Choice> {
        self.votes
            .iter()
            .find(|v| &v.voter == voter)
            .map(|v| v.choice)
    }

    /// Size of the voter panel (zero before voting opens).
    pub fn panel_size(&self) -> usize {
        self.assignment.as_ref().map_or(0, |a| a.voters.len())
    }
}

/// The voter panel drawn for one article. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterAssignment {
    pub article: ArticleId,
    /// Panel members in draw order (lowest selection score first).
    pub voters: Vec<Address>,
    /// Randomness round the draw was seeded from.
    pub round: u64,
    pub assigned_at: Timestamp,
}

/// A single recorded ballot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub article: ArticleId,
    pub voter: Address,
    pub choice: Choice,
    pub timestamp: Timestamp,
}

/// Running accept/reject counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub accept: u32,
    pub reject: u32,
}

impl VoteTally {
    pub fn total(&self) -> u32 {
        self.accept + self.reject
    }

    pub(crate) fn record(&mut self, choice: Choice) {
        match choice {
            Choice::Accept => self.accept += 1,
            Choice::Reject => self.reject += 1,
        }
    }
}
