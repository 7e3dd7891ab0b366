//! Token ledger consumed by the publishing contract.
//!
//! The contract only needs two capabilities: pay out of its own treasury
//! (`transfer`) and read balances (`balance_of`). Everything else about the
//! token is outside this workspace; `TokenLedger` is the in-memory
//! implementation used for deployments without an external token.

pub mod error;
pub mod ledger;
pub mod token;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use token::TokenLedger;
