//! Nullable ledger: records payouts and can be told to fail.

use std::collections::HashMap;

use dnn_ledger::{Ledger, LedgerError};
use dnn_types::{Address, TokenAmount};

/// An unlimited-treasury ledger that records every successful transfer.
#[derive(Debug, Default)]
pub struct NullLedger {
    balances: HashMap<Address, TokenAmount>,
    transfers: Vec<(Address, TokenAmount)>,
    fail_transfers: bool,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger that rejects every transfer.
    pub fn failing() -> Self {
        Self {
            fail_transfers: true,
            ..Self::default()
        }
    }

    /// Toggle transfer failure at runtime.
    pub fn set_failing(&mut self, fail: bool) {
        self.fail_transfers = fail;
    }

    /// Every successful transfer, in order.
    pub fn transfers(&self) -> &[(Address, TokenAmount)] {
        &self.transfers
    }
}

impl Ledger for NullLedger {
    fn transfer(&mut self, to: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        if self.fail_transfers {
            return Err(LedgerError::Rejected("null ledger configured to fail".into()));
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Overflow(to.to_string()))?;
        self.balances.insert(to.clone(), credited);
        self.transfers.push((to.clone(), amount));
        Ok(())
    }

    fn balance_of(&self, address: &Address) -> TokenAmount {
        self.balances
            .get(address)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_transfers_and_can_fail() {
        let to = Address::new("0xwriter");
        let mut ledger = NullLedger::new();
        ledger.transfer(&to, TokenAmount::new(5)).unwrap();
        assert_eq!(ledger.transfers(), &[(to.clone(), TokenAmount::new(5))]);

        ledger.set_failing(true);
        assert!(ledger.transfer(&to, TokenAmount::new(5)).is_err());
        assert_eq!(ledger.balance_of(&to), TokenAmount::new(5));
    }
}
