//! Errors raised while constructing or validating fundamental types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}
