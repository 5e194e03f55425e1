//! Custody token seam and the in-memory fungible token behind it.
//!
//! The vault never creates or destroys value: deposits pull tokens from the
//! depositor into the vault's custody account and withdrawals push them back.

use std::collections::HashMap;

use crate::address::Address;
use crate::ledger::Amount;

/// Errors raised by a [`CustodyToken`]. A failed call moves nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("insufficient funds in account {account}: balance {balance}, needed {needed}")]
    InsufficientFunds {
        account: Address,
        balance: Amount,
        needed: Amount,
    },
    #[error("token supply overflow")]
    Overflow,
}

/// The external fungible ledger the vault delegates fund movement to.
pub trait CustodyToken {
    fn balance_of(&self, account: &Address) -> Amount;

    /// Move `amount` out of the caller's own account (`from`).
    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount)
        -> Result<(), TokenError>;

    /// Move `amount` out of `from` on behalf of a spender.
    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError>;
}

/// In-memory ERC20-like balance token.
///
/// Spending allowances are not modelled: `transfer_from` succeeds whenever
/// `from` holds enough.
#[derive(Debug, Default)]
pub struct BalanceToken {
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
}

impl BalanceToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Create `amount` new tokens in `to`'s account.
    pub fn mint(&mut self, to: &Address, amount: Amount) -> Result<(), TokenError> {
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        // Cannot overflow: every balance is bounded by total_supply.
        *self.balances.entry(*to).or_default() += amount;
        tracing::debug!(%to, amount, total_supply = self.total_supply, "Minted tokens");
        Ok(())
    }

    fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let balance = self.balance_of(from);
        if balance < amount {
            return Err(TokenError::InsufficientFunds {
                account: *from,
                balance,
                needed: amount,
            });
        }
        if from == to || amount == 0 {
            return Ok(());
        }
        self.balances.insert(*from, balance - amount);
        *self.balances.entry(*to).or_default() += amount;
        Ok(())
    }
}

impl CustodyToken for BalanceToken {
    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.move_balance(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        self.move_balance(from, to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_increases_balance_and_supply() {
        let mut token = BalanceToken::new();
        let alice = Address::from_seed(1);

        token.mint(&alice, 100).unwrap();
        token.mint(&alice, 50).unwrap();

        assert_eq!(token.balance_of(&alice), 150);
        assert_eq!(token.total_supply(), 150);
        assert_eq!(token.balance_of(&Address::from_seed(2)), 0);
    }

    #[test]
    fn test_mint_overflow() {
        let mut token = BalanceToken::new();
        token.mint(&Address::from_seed(1), Amount::MAX).unwrap();
        assert_eq!(
            token.mint(&Address::from_seed(2), 1),
            Err(TokenError::Overflow)
        );
        assert_eq!(token.total_supply(), Amount::MAX);
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut token = BalanceToken::new();
        let alice = Address::from_seed(1);
        let bob = Address::from_seed(2);
        token.mint(&alice, 100).unwrap();

        token.transfer(&alice, &bob, 30).unwrap();
        token.transfer_from(&alice, &bob, 20).unwrap();

        assert_eq!(token.balance_of(&alice), 50);
        assert_eq!(token.balance_of(&bob), 50);
        assert_eq!(token.total_supply(), 100);
    }

    #[test]
    fn test_transfer_insufficient_funds_moves_nothing() {
        let mut token = BalanceToken::new();
        let alice = Address::from_seed(1);
        let bob = Address::from_seed(2);
        token.mint(&alice, 10).unwrap();

        let err = token.transfer_from(&alice, &bob, 11).unwrap_err();
        assert_eq!(
            err,
            TokenError::InsufficientFunds {
                account: alice,
                balance: 10,
                needed: 11
            }
        );
        assert_eq!(token.balance_of(&alice), 10);
        assert_eq!(token.balance_of(&bob), 0);
    }

    #[test]
    fn test_self_transfer_is_no_op() {
        let mut token = BalanceToken::new();
        let alice = Address::from_seed(1);
        token.mint(&alice, 10).unwrap();

        token.transfer(&alice, &alice, 10).unwrap();
        assert_eq!(token.balance_of(&alice), 10);
        assert!(token.transfer(&alice, &alice, 11).is_err());
    }
}
