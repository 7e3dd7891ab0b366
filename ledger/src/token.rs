//! In-memory token ledger with a single treasury account.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ledger::Ledger;
use dnn_types::{Address, TokenAmount};

/// Balances keyed by address. `transfer` pays out of `treasury`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    treasury: Address,
    balances: HashMap<Address, TokenAmount>,
}

impl TokenLedger {
    pub fn new(treasury: Address) -> Self {
        Self {
            treasury,
            balances: HashMap::new(),
        }
    }

    /// A ledger whose treasury starts with `initial` tokens.
    pub fn with_treasury(treasury: Address, initial: TokenAmount) -> Self {
        let mut ledger = Self::new(treasury.clone());
        ledger.balances.insert(treasury, initial);
        ledger
    }

    pub fn treasury(&self) -> &Address {
        &self.treasury
    }

    /// Credit `amount` to `to` out of thin air (deployment funding, tests).
    pub fn mint(&mut self, to: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        let current = self.balance_of(to);
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(to.to_string()))?;
        self.balances.insert(to.clone(), updated);
        Ok(())
    }

    /// Sum of every balance, treasury included.
    pub fn total_supply(&self) -> u128 {
        self.balances.values().map(|b| b.raw()).sum()
    }
}

impl Ledger for TokenLedger {
    fn transfer(&mut self, to: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        if *to == self.treasury {
            return Err(LedgerError::Rejected("transfer to the treasury itself".into()));
        }
        let available = self.balance_of(&self.treasury);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount.raw(),
                available: available.raw(),
            })?;
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(to.to_string()))?;

        // Both sides validated; commit together.
        self.balances.insert(self.treasury.clone(), remaining);
        self.balances.insert(to.clone(), credited);
        tracing::debug!(%to, %amount, "treasury transfer");
        Ok(())
    }

    fn balance_of(&self, address: &Address) -> TokenAmount {
        self.balances
            .get(address)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }
}
