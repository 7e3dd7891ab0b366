//! Vote tally engine: panel members cast ballots on an article.

use dnn_types::{Address, ArticleStatus, Choice, Timestamp, VoteStatus};

use crate::article::{Article, VoteRecord};
use crate::error::DnnError;

/// Engine for recording and tallying ballots.
pub struct VoteTallyEngine;

impl VoteTallyEngine {
    /// Record `voter`'s ballot on `article`.
    ///
    /// Checks, in order: voting is open (status and deadline), the voter sits
    /// on the panel, the voter has not voted yet. Nothing is written unless
    /// every check passes.
    pub fn cast_vote(
        &self,
        article: &mut Article,
        voter: Address,
        choice: Choice,
        now: Timestamp,
    ) -> Result<(), DnnError> {
        if article.status != ArticleStatus::Voting || self.deadline_passed(article, now) {
            return Err(DnnError::VotingClosed(article.id));
        }
        if !article.is_assigned(&voter) {
            return Err(DnnError::Unauthorized(voter.to_string()));
        }
        if article.has_voted(&voter) {
            return Err(DnnError::AlreadyVoted {
                article: article.id,
                voter: voter.to_string(),
            });
        }
        article.tally.record(choice);
        article.votes.push(VoteRecord {
            article: article.id,
            voter,
            choice,
            timestamp: now,
        });
        Ok(())
    }

    /// Whether `now` is strictly after the article's voting deadline.
    ///
    /// An article without a deadline (voters not yet assigned) has nothing to
    /// pass.
    pub fn deadline_passed(&self, article: &Article, now: Timestamp) -> bool {
        article.voting_deadline.is_some_and(|deadline| now.is_past(deadline))
    }

    /// Whether every panel member has voted.
    pub fn quorum_reached(&self, article: &Article) -> bool {
        let panel = article.panel_size();
        panel > 0 && article.votes.len() >= panel
    }

    /// Whether `resolve` may run: the article is voting and either the full
    /// panel has voted or the deadline has passed.
    pub fn is_resolvable(&self, article: &Article, now: Timestamp) -> bool {
        article.status == ArticleStatus::Voting
            && (self.quorum_reached(article) || self.deadline_passed(article, now))
    }

    /// Tally ballots: a strict accept majority accepts; ties and an empty
    /// ballot box reject.
    pub fn tally(&self, article: &Article) -> VoteStatus {
        if article.tally.accept > article.tally.reject {
            VoteStatus::Accept
        } else {
            VoteStatus::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::VoterAssignment;
    use dnn_types::{ArticleId, ContentHash};

    fn addr(i: usize) -> Address {
        Address::new(format!("0xvoter{i}"))
    }

    fn voting_article(panel: usize, deadline: u64) -> Article {
        let id = ArticleId::new(1);
        let mut article = Article::new(id, Address::new("0xwriter"), ContentHash::ZERO, Timestamp::new(0));
        article.status = ArticleStatus::Voting;
        article.voting_deadline = Some(Timestamp::new(deadline));
        article.assignment = Some(VoterAssignment {
            article: id,
            voters: (0..panel).map(addr).collect(),
            round: 0,
            assigned_at: Timestamp::new(0),
        });
        article
    }

    #[test]
    fn records_vote_and_counts_it() {
        let engine = VoteTallyEngine;
        let mut article = voting_article(3, 100);
        engine.cast_vote(&mut article, addr(0), Choice::Accept, Timestamp::new(10)).unwrap();

        assert_eq!(article.tally.accept, 1);
        assert_eq!(article.vote_of(&addr(0)), Some(Choice::Accept));
        assert_eq!(article.votes[0].timestamp, Timestamp::new(10));
    }

    #[test]
    fn rejects_voter_outside_panel() {
        let engine = VoteTallyEngine;
        let mut article = voting_article(3, 100);
        let err = engine
            .cast_vote(&mut article, addr(99), Choice::Accept, Timestamp::new(10))
            .unwrap_err();
        assert!(matches!(err, DnnError::Unauthorized(_)));
        assert!(article.votes.is_empty());
    }

    #[test]
    fn second_ballot_from_same_voter_is_rejected() {
        let engine = VoteTallyEngine;
        let mut article = voting_article(3, 100);
        engine.cast_vote(&mut article, addr(1), Choice::Accept, Timestamp::new(10)).unwrap();
        let err = engine
            .cast_vote(&mut article, addr(1), Choice::Reject, Timestamp::new(11))
            .unwrap_err();

        assert!(matches!(err, DnnError::AlreadyVoted { .. }));
        assert_eq!(article.tally, crate::article::VoteTally { accept: 1, reject: 0 });
    }

    #[test]
    fn vote_at_deadline_counts_but_after_is_closed() {
        let engine = VoteTallyEngine;
        let mut article = voting_article(3, 100);
        engine.cast_vote(&mut article, addr(0), Choice::Reject, Timestamp::new(100)).unwrap();
        let err = engine
            .cast_vote(&mut article, addr(1), Choice::Reject, Timestamp::new(101))
            .unwrap_err();
        assert!(matches!(err, DnnError::VotingClosed(_)));
    }

    #[test]
    fn closed_voting_dominates_duplicate_check() {
        let engine = VoteTallyEngine;
        let mut article = voting_article(3, 100);
        engine.cast_vote(&mut article, addr(0), Choice::Accept, Timestamp::new(1)).unwrap();
        article.status = ArticleStatus::Done;
        let err = engine
            .cast_vote(&mut article, addr(0), Choice::Accept, Timestamp::new(2))
            .unwrap_err();
        assert!(matches!(err, DnnError::VotingClosed(_)));
    }

    #[test]
    fn tally_rules() {
        let engine = VoteTallyEngine;
        let mut article = voting_article(7, 100);
        assert_eq!(engine.tally(&article), VoteStatus::Reject, "no votes rejects");

        for (i, choice) in [Choice::Accept, Choice::Reject].into_iter().enumerate() {
            engine.cast_vote(&mut article, addr(i), choice, Timestamp::new(1)).unwrap();
        }
        assert_eq!(engine.tally(&article), VoteStatus::Reject, "tie rejects");

        engine.cast_vote(&mut article, addr(2), Choice::Accept, Timestamp::new(1)).unwrap();
        assert_eq!(engine.tally(&article), VoteStatus::Accept);
    }

    #[test]
    fn resolvable_on_quorum_or_timeout() {
        let engine = VoteTallyEngine;
        let mut article = voting_article(2, 100);
        assert!(!engine.is_resolvable(&article, Timestamp::new(50)));
        assert!(!engine.is_resolvable(&article, Timestamp::new(100)));
        assert!(engine.is_resolvable(&article, Timestamp::new(101)));

        engine.cast_vote(&mut article, addr(0), Choice::Accept, Timestamp::new(1)).unwrap();
        engine.cast_vote(&mut article, addr(1), Choice::Accept, Timestamp::new(1)).unwrap();
        assert!(engine.quorum_reached(&article));
        assert!(engine.is_resolvable(&article, Timestamp::new(50)));
    }
}
