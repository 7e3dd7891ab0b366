//! The DNN publishing contract.
//!
//! Writers submit articles; a pseudo-randomly drawn panel of voters accepts or
//! rejects each one inside a fixed voting window; accepted articles pay the
//! writer a fee out of the contract treasury.
//!
//! Lifecycle per article: `none → waitingForVoters → voting → done`.
//!
//! - [`RoleRegistry`]: who may write, and who may be drawn as a voter.
//! - [`VoterSelector`]: verifiable, seeded draw of the voter panel.
//! - [`VoteTallyEngine`]: one ballot per panel member, deadline enforcement,
//!   accept-majority tally.
//! - [`Dnn`]: the contract itself. Owns articles and drives every transition.

pub mod article;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod outcomes;
pub mod registry;
pub mod selection;
pub mod voting;

pub use article::{Article, VoteRecord, VoteTally, VoterAssignment};
pub use config::DnnConfig;
pub use error::DnnError;
pub use lifecycle::{Dnn, DnnEvent, DnnSnapshot};
pub use outcomes::{ResolutionOutcome, VoterOutcome};
pub use registry::{deployment_id, AdminCapability, DeploymentId, RoleRegistry};
pub use selection::VoterSelector;
pub use voting::VoteTallyEngine;
