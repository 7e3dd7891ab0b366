//! Resolution outcome: who gets paid and how each panel member voted.
//!
//! After an article resolves, this module computes:
//! - The writer payout (the writer fee on accept, nothing on reject)
//! - Per-voter records: the ballot cast (or none, for voters who dropped out)
//!   and whether it agreed with the resolution
//!
//! Voters are neither rewarded nor penalised here; the record exists so the
//! caller can identify dissenters and no-shows.

use dnn_types::{Address, ArticleId, Choice, TokenAmount, VoteStatus};
use serde::{Deserialize, Serialize};

use crate::article::Article;

/// Outcome of a resolved article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    pub article: ArticleId,
    pub writer: Address,
    /// `Accept` or `Reject`; never `None`.
    pub resolution: VoteStatus,
    /// Amount transferred to the writer.
    pub writer_payout: TokenAmount,
    /// One entry per panel member, in panel order.
    pub voters: Vec<VoterOutcome>,
}

impl ResolutionOutcome {
    /// Panel members who never voted.
    pub fn no_shows(&self) -> impl Iterator<Item = &Address> {
        self.voters
            .iter()
            .filter(|v| v.choice.is_none())
            .map(|v| &v.address)
    }

    /// Panel members who voted against the resolution.
    pub fn dissenters(&self) -> impl Iterator<Item = &Address> {
        self.voters
            .iter()
            .filter(|v| v.choice.is_some() && !v.voted_with_outcome)
            .map(|v| &v.address)
    }
}

/// Outcome for a single panel member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterOutcome {
    pub address: Address,
    /// The ballot cast, `None` if the voter never voted.
    pub choice: Option<Choice>,
    /// Whether the ballot matched the resolution. False for no-shows.
    pub voted_with_outcome: bool,
}

/// Compute the outcome of resolving `article` as `resolution`.
pub fn compute_resolution_outcome(
    article: &Article,
    resolution: VoteStatus,
    writer_fee: TokenAmount,
) -> ResolutionOutcome {
    let writer_payout = match resolution {
        VoteStatus::Accept => writer_fee,
        VoteStatus::Reject | VoteStatus::None => TokenAmount::ZERO,
    };

    let voters = article
        .assignment
        .iter()
        .flat_map(|a| a.voters.iter())
        .map(|address| {
            let choice = article.vote_of(address);
            VoterOutcome {
                address: address.clone(),
                choice,
                voted_with_outcome: choice.is_some_and(|c| c.as_vote_status() == resolution),
            }
        })
        .collect();

    ResolutionOutcome {
        article: article.id,
        writer: article.writer.clone(),
        resolution,
        writer_payout,
        voters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{VoteRecord, VoterAssignment};
    use dnn_types::{ArticleStatus, ContentHash, Timestamp};

    fn addr(i: usize) -> Address {
        Address::new(format!("0xvoter{i}"))
    }

    fn article_with_votes(panel: usize, votes: &[(usize, Choice)]) -> Article {
        let id = ArticleId::new(4);
        let mut article = Article::new(id, Address::new("0xwriter"), ContentHash::ZERO, Timestamp::new(0));
        article.status = ArticleStatus::Voting;
        article.assignment = Some(VoterAssignment {
            article: id,
            voters: (0..panel).map(addr).collect(),
            round: 0,
            assigned_at: Timestamp::new(0),
        });
        for (i, choice) in votes {
            article.tally.record(*choice);
            article.votes.push(VoteRecord {
                article: id,
                voter: addr(*i),
                choice: *choice,
                timestamp: Timestamp::new(1),
            });
        }
        article
    }

    #[test]
    fn accepted_article_pays_writer_fee() {
        let article = article_with_votes(3, &[(0, Choice::Accept), (1, Choice::Accept)]);
        let outcome = compute_resolution_outcome(&article, VoteStatus::Accept, TokenAmount::new(100));

        assert_eq!(outcome.writer_payout, TokenAmount::new(100));
        assert_eq!(outcome.writer, Address::new("0xwriter"));
        assert_eq!(outcome.article, ArticleId::new(4));
    }

    #[test]
    fn rejected_article_pays_nothing() {
        let article = article_with_votes(3, &[(0, Choice::Reject)]);
        let outcome = compute_resolution_outcome(&article, VoteStatus::Reject, TokenAmount::new(100));
        assert!(outcome.writer_payout.is_zero());
    }

    #[test]
    fn voter_outcomes_cover_whole_panel() {
        let article = article_with_votes(
            4,
            &[(0, Choice::Accept), (1, Choice::Reject), (2, Choice::Accept)],
        );
        let outcome = compute_resolution_outcome(&article, VoteStatus::Accept, TokenAmount::new(100));

        assert_eq!(outcome.voters.len(), 4);
        assert!(outcome.voters[0].voted_with_outcome);
        assert!(!outcome.voters[1].voted_with_outcome);
        assert_eq!(outcome.voters[3].choice, None);

        assert_eq!(outcome.dissenters().collect::<Vec<_>>(), vec![&addr(1)]);
        assert_eq!(outcome.no_shows().collect::<Vec<_>>(), vec![&addr(3)]);
    }

    #[test]
    fn timeout_with_no_votes_marks_everyone_absent() {
        let article = article_with_votes(7, &[]);
        let outcome = compute_resolution_outcome(&article, VoteStatus::Reject, TokenAmount::new(100));

        assert_eq!(outcome.no_shows().count(), 7);
        assert_eq!(outcome.dissenters().count(), 0);
    }
}
