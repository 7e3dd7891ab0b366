//! The ledger capability trait.

use crate::error::LedgerError;
use dnn_types::{Address, TokenAmount};

/// Balance-holding collaborator the contract pays writers through.
///
/// `transfer` always debits the account the ledger was handed to (the
/// contract treasury). A failed transfer must leave every balance unchanged.
pub trait Ledger: Send {
    /// Move `amount` from the treasury to `to`.
    fn transfer(&mut self, to: &Address, amount: TokenAmount) -> Result<(), LedgerError>;

    /// Current balance of `address`; unknown addresses hold zero.
    fn balance_of(&self, address: &Address) -> TokenAmount;
}
