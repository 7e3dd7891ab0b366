use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("balance overflow crediting {0}")]
    Overflow(String),

    #[error("transfer rejected: {0}")]
    Rejected(String),
}
