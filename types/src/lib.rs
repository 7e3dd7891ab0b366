//! Fundamental types for the DNN publishing protocol.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, article ids, hashes, token amounts, timestamps, deployment
//! parameters, and the lifecycle enums.

pub mod address;
pub mod amount;
pub mod article;
pub mod error;
pub mod hash;
pub mod params;
pub mod state;
pub mod time;

pub use address::Address;
pub use amount::TokenAmount;
pub use article::ArticleId;
pub use error::TypesError;
pub use hash::{BlockHash, ContentHash};
pub use params::{
    DnnParams, REQUIRED_VOTERS, REQUIRED_VOTER_REQUESTS, VOTING_PERIOD_DURATION, WRITER_FEE,
};
pub use state::{ArticleStatus, Choice, Role, VoteStatus};
pub use time::Timestamp;
