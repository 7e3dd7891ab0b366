//! The DNN contract: article lifecycle.
//!
//! Connects the role registry, voter selection, voting, and outcomes into
//! the single `none → waitingForVoters → voting → done` workflow. Every
//! operation validates first and writes last, so a rejected call leaves the
//! contract exactly as it found it.

use std::collections::BTreeMap;

use dnn_ledger::Ledger;
use dnn_types::{
    Address, ArticleId, ArticleStatus, Choice, DnnParams, Role, Timestamp, TokenAmount,
    VoteStatus,
};
use dnn_vrf::VrfProvider;
use serde::{Deserialize, Serialize};

use crate::article::{Article, VoteTally, VoterAssignment};
use crate::config::DnnConfig;
use crate::error::DnnError;
use crate::outcomes::{compute_resolution_outcome, ResolutionOutcome};
use crate::registry::{deployment_id, AdminCapability, DeploymentId, RoleRegistry};
use crate::selection::VoterSelector;
use crate::voting::VoteTallyEngine;

/// Events emitted by the contract for observers (indexers, front-ends).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DnnEvent {
    /// A writer submitted a new article.
    ArticleSubmitted { article: ArticleId, writer: Address },
    /// A voter panel was drawn and voting opened.
    VotersSelected {
        article: ArticleId,
        voters: Vec<Address>,
        deadline: Timestamp,
    },
    /// A panel member cast a ballot.
    VoteCast {
        article: ArticleId,
        voter: Address,
        choice: Choice,
    },
    /// The article was resolved; the writer was paid if it was accepted.
    ArticleResolved {
        article: ArticleId,
        outcome: ResolutionOutcome,
    },
}

/// The publishing contract.
pub struct Dnn {
    selector: VoterSelector,
    voting: VoteTallyEngine,
    registry: RoleRegistry,
    articles: BTreeMap<ArticleId, Article>,
    next_article: ArticleId,
    params: DnnParams,
    ledger: Box<dyn Ledger>,
    vrf: Box<dyn VrfProvider>,
    /// Pending events for observers to drain.
    pending_events: Vec<DnnEvent>,
}

impl std::fmt::Debug for Dnn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dnn")
            .field("owner", self.registry.owner())
            .field("articles", &self.articles.len())
            .field("params", &self.params)
            .field("vrf", &self.vrf.name())
            .finish()
    }
}

impl Dnn {
    /// Deploy a contract owned by `owner`.
    ///
    /// Every contract built this way for the same owner has the same
    /// deployment identity; use [`Dnn::deploy`] with distinct
    /// `deployment_nonce`s to keep their admin capabilities apart.
    pub fn new(
        owner: Address,
        params: DnnParams,
        ledger: Box<dyn Ledger>,
        vrf: Box<dyn VrfProvider>,
    ) -> Result<Self, DnnError> {
        let deployment = deployment_id(&owner, &dnn_types::BlockHash::ZERO, 0);
        Self::with_deployment(owner, deployment, params, ledger, vrf)
    }

    fn with_deployment(
        owner: Address,
        deployment: DeploymentId,
        params: DnnParams,
        ledger: Box<dyn Ledger>,
        vrf: Box<dyn VrfProvider>,
    ) -> Result<Self, DnnError> {
        params.validate()?;
        tracing::info!(
            %owner,
            required_voters = params.required_voters,
            required_voter_requests = params.required_voter_requests,
            voting_period = %dnn_utils::format_duration(params.voting_period_secs),
            vrf = vrf.name(),
            deployment = %hex::encode(&deployment[..4]),
            "DNN contract deployed"
        );
        Ok(Self {
            selector: VoterSelector,
            voting: VoteTallyEngine,
            registry: RoleRegistry::new(owner, deployment),
            articles: BTreeMap::new(),
            next_article: ArticleId::FIRST,
            params,
            ledger,
            vrf,
            pending_events: Vec::new(),
        })
    }

    /// Deploy from a configuration, using its chain-seeded randomness.
    pub fn deploy(
        config: &DnnConfig,
        owner: Address,
        ledger: Box<dyn Ledger>,
    ) -> Result<Self, DnnError> {
        config.validate()?;
        let vrf = config.randomness()?;
        let deployment = deployment_id(&owner, &config.chain_seed_hash()?, config.deployment_nonce);
        Self::with_deployment(owner, deployment, config.params.clone(), ledger, Box::new(vrf))
    }

    // ── Roles ───────────────────────────────────────────────────────────

    pub fn owner(&self) -> &Address {
        self.registry.owner()
    }

    pub fn deployment_id(&self) -> &DeploymentId {
        self.registry.deployment()
    }

    pub fn is_owner(&self, address: &Address) -> bool {
        self.registry.is_owner(address)
    }

    /// Mint an admin capability; fails with `Unauthorized` unless `caller` owns the contract.
    pub fn admin(&self, caller: &Address) -> Result<AdminCapability, DnnError> {
        self.registry.admin(caller)
    }

    pub fn register_voter(
        &mut self,
        admin: &AdminCapability,
        address: Address,
    ) -> Result<(), DnnError> {
        self.registry.register_voter(admin, address)
    }

    pub fn grant_role(
        &mut self,
        admin: &AdminCapability,
        address: Address,
        role: Role,
    ) -> Result<(), DnnError> {
        self.registry.grant_role(admin, address, role)
    }

    pub fn revoke_role(
        &mut self,
        admin: &AdminCapability,
        address: &Address,
        role: Role,
    ) -> Result<bool, DnnError> {
        self.registry.revoke_role(admin, address, role)
    }

    pub fn transfer_ownership(
        &mut self,
        admin: &AdminCapability,
        new_owner: Address,
    ) -> Result<(), DnnError> {
        self.registry.transfer_ownership(admin, new_owner)
    }

    pub fn has_role(&self, address: &Address, role: Role) -> bool {
        self.registry.has_role(address, role)
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Submit an article. The writer must hold the writer role.
    pub fn submit_article(
        &mut self,
        writer: &Address,
        content: &[u8],
        now: Timestamp,
    ) -> Result<ArticleId, DnnError> {
        if !self.registry.has_role(writer, Role::Writer) {
            return Err(DnnError::Unauthorized(writer.to_string()));
        }

        let id = self.next_article;
        let article = Article::new(id, writer.clone(), dnn_crypto::hash_content(content), now);
        tracing::info!(article = %id, %writer, content_hash = %article.content_hash, "article submitted");

        self.articles.insert(id, article);
        self.next_article = id.next();
        self.pending_events.push(DnnEvent::ArticleSubmitted {
            article: id,
            writer: writer.clone(),
        });
        Ok(id)
    }

    /// Draw the voter panel and open voting. Callable once per article.
    ///
    /// The writer is never a candidate for their own article's panel. The
    /// voting deadline counts from submission, so a late request opens a
    /// shorter window, or one that is already expired.
    pub fn request_voting(
        &mut self,
        id: ArticleId,
        now: Timestamp,
    ) -> Result<VoterAssignment, DnnError> {
        let article = self.articles.get_mut(&id).ok_or(DnnError::InvalidState {
            article: id,
            status: ArticleStatus::None,
        })?;
        match article.status {
            ArticleStatus::WaitingForVoters => {}
            status @ (ArticleStatus::None | ArticleStatus::Voting | ArticleStatus::Done) => {
                return Err(DnnError::InvalidState { article: id, status });
            }
        }

        let candidates: Vec<Address> = self
            .registry
            .eligible_voters()
            .into_iter()
            .filter(|addr| **addr != article.writer)
            .cloned()
            .collect();
        let assignment =
            self.selector
                .select(self.vrf.as_ref(), id, &candidates, &self.params, now)?;
        let deadline = article.created_at.plus_secs(self.params.voting_period_secs);

        advance(article, ArticleStatus::Voting)?;
        article.voting_deadline = Some(deadline);
        article.assignment = Some(assignment.clone());

        tracing::info!(
            article = %id,
            pool = candidates.len(),
            panel = assignment.voters.len(),
            round = assignment.round,
            %deadline,
            "voters selected, voting open"
        );
        self.pending_events.push(DnnEvent::VotersSelected {
            article: id,
            voters: assignment.voters.clone(),
            deadline,
        });
        Ok(assignment)
    }

    /// Record a panel member's ballot.
    pub fn cast_vote(
        &mut self,
        id: ArticleId,
        voter: &Address,
        choice: Choice,
        now: Timestamp,
    ) -> Result<(), DnnError> {
        let article = self
            .articles
            .get_mut(&id)
            .ok_or(DnnError::VotingClosed(id))?;
        self.voting.cast_vote(article, voter.clone(), choice, now)?;

        tracing::debug!(
            article = %id,
            %voter,
            ?choice,
            votes = article.votes.len(),
            panel = article.panel_size(),
            "vote recorded"
        );
        self.pending_events.push(DnnEvent::VoteCast {
            article: id,
            voter: voter.clone(),
            choice,
        });
        Ok(())
    }

    /// Resolve a voting article once its panel has fully voted or its
    /// deadline has passed. Callable by anyone, succeeds exactly once.
    ///
    /// On accept the writer fee is transferred before the article is marked
    /// done; if the transfer fails the article stays in `voting`.
    pub fn resolve(&mut self, id: ArticleId, now: Timestamp) -> Result<ResolutionOutcome, DnnError> {
        let article = self.articles.get_mut(&id).ok_or(DnnError::InvalidState {
            article: id,
            status: ArticleStatus::None,
        })?;
        if article.status != ArticleStatus::Voting {
            return Err(DnnError::InvalidState {
                article: id,
                status: article.status,
            });
        }
        if !self.voting.is_resolvable(article, now) {
            return Err(DnnError::NotReady(id));
        }

        let resolution = self.voting.tally(article);
        let fee = TokenAmount::from(self.params.writer_fee);
        let outcome = compute_resolution_outcome(article, resolution, fee);

        if !outcome.writer_payout.is_zero() {
            if let Err(e) = self.ledger.transfer(&outcome.writer, outcome.writer_payout) {
                tracing::warn!(article = %id, writer = %outcome.writer, error = %e, "writer payout failed, article left in voting");
                return Err(e.into());
            }
        }

        advance(article, ArticleStatus::Done)?;
        article.resolution = resolution;
        article.resolved_at = Some(now);

        let open_for = article
            .assignment
            .as_ref()
            .map_or(0, |a| a.assigned_at.elapsed_since(now));
        tracing::info!(
            article = %id,
            %resolution,
            open_for = %dnn_utils::format_duration(open_for),
            accept = article.tally.accept,
            reject = article.tally.reject,
            payout = %outcome.writer_payout,
            by_timeout = !self.voting.quorum_reached(article),
            "article resolved"
        );
        self.pending_events.push(DnnEvent::ArticleResolved {
            article: id,
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Lifecycle phase of `id`; `None` for ids never submitted.
    pub fn article_status(&self, id: ArticleId) -> ArticleStatus {
        self.articles
            .get(&id)
            .map_or(ArticleStatus::None, |a| a.status)
    }

    /// Accept/reject counters for `id`; zero for ids never submitted.
    pub fn vote_tally(&self, id: ArticleId) -> VoteTally {
        self.articles
            .get(&id)
            .map_or_else(VoteTally::default, |a| a.tally)
    }

    /// Final resolution of `id`; `None` until it is done.
    pub fn resolution(&self, id: ArticleId) -> VoteStatus {
        self.articles
            .get(&id)
            .map_or(VoteStatus::None, |a| a.resolution)
    }

    pub fn article(&self, id: ArticleId) -> Option<&Article> {
        self.articles.get(&id)
    }

    pub fn assignment(&self, id: ArticleId) -> Option<&VoterAssignment> {
        self.articles.get(&id).and_then(|a| a.assignment.as_ref())
    }

    pub fn articles_by_writer(&self, writer: &Address) -> Vec<ArticleId> {
        self.articles
            .values()
            .filter(|a| &a.writer == writer)
            .map(|a| a.id)
            .collect()
    }

    /// Voting articles whose deadline has passed, i.e. resolvable by timeout.
    pub fn expired_articles(&self, now: Timestamp) -> Vec<ArticleId> {
        self.articles
            .values()
            .filter(|a| a.status == ArticleStatus::Voting && self.voting.deadline_passed(a, now))
            .map(|a| a.id)
            .collect()
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }

    pub fn params(&self) -> &DnnParams {
        &self.params
    }

    pub fn ledger(&self) -> &dyn Ledger {
        self.ledger.as_ref()
    }

    /// Drain pending events for observers to process.
    pub fn drain_events(&mut self) -> Vec<DnnEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Capture registry and article state for persistence.
    pub fn snapshot(&self) -> DnnSnapshot {
        DnnSnapshot {
            registry: self.registry.clone(),
            articles: self.articles.clone(),
            next_article: self.next_article,
            params: self.params.clone(),
        }
    }

    /// Rebuild a contract from a snapshot. The ledger and randomness source
    /// are external collaborators and are supplied again by the caller.
    pub fn restore(
        snapshot: DnnSnapshot,
        ledger: Box<dyn Ledger>,
        vrf: Box<dyn VrfProvider>,
    ) -> Result<Self, DnnError> {
        snapshot.params.validate()?;
        Ok(Self {
            selector: VoterSelector,
            voting: VoteTallyEngine,
            registry: snapshot.registry,
            articles: snapshot.articles,
            next_article: snapshot.next_article,
            params: snapshot.params,
            ledger,
            vrf,
            pending_events: Vec::new(),
        })
    }
}

/// Serializable snapshot of contract state for persistence across restarts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DnnSnapshot {
    pub registry: RoleRegistry,
    pub articles: BTreeMap<ArticleId, Article>,
    pub next_article: ArticleId,
    pub params: DnnParams,
}

impl DnnSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, DnnError> {
        bincode::serialize(self).map_err(|e| DnnError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DnnError> {
        bincode::deserialize(bytes).map_err(|e| DnnError::Snapshot(e.to_string()))
    }
}

/// Move `article` one step along the lifecycle. The only place status is written.
fn advance(article: &mut Article, next: ArticleStatus) -> Result<(), DnnError> {
    if !article.status.can_transition_to(next) {
        return Err(DnnError::InvalidState {
            article: article.id,
            status: article.status,
        });
    }
    article.status = next;
    Ok(())
}
