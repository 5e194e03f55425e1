//! The vault: a [`Ledger`] paired with the [`CustodyToken`] that holds the
//! deposited funds.

use crate::address::Address;
use crate::config::VaultConfig;
use crate::custody::CustodyToken;
use crate::error::VaultError;
use crate::ledger::{Amount, DepositorId, Funder, Ledger};

/// Deposit/withdraw front end over a ranked depositor ledger.
///
/// Each mutating call validates against the ledger, performs the custody
/// transfer, then applies the accounting change. If either step fails the
/// call has no effect.
#[derive(Debug)]
pub struct Vault<T> {
    custody: Address,
    ledger: Ledger,
    token: T,
}

impl<T: CustodyToken> Vault<T> {
    /// Create a vault whose deposits are held by `custody` in `token`.
    pub fn new(custody: Address, token: T) -> Self {
        Self {
            custody,
            ledger: Ledger::new(),
            token,
        }
    }

    pub fn with_config(config: &VaultConfig, token: T) -> Self {
        Self::new(config.custody, token)
    }

    /// Move `amount` from `caller` into custody and credit it to the caller's
    /// record, registering the caller on first deposit.
    pub fn deposit(&mut self, caller: &Address, amount: Amount) -> Result<Funder, VaultError> {
        self.ensure_not_custody(caller)?;
        self.ledger.check_deposit(caller, amount)?;
        self.token.transfer_from(caller, &self.custody, amount)?;
        let funder = self.ledger.deposit(caller, amount)?;

        tracing::info!(
            depositor = %caller,
            amount,
            balance = funder.amount,
            "Deposit recorded"
        );
        Ok(funder)
    }

    /// Return `amount` from custody to `caller`.
    ///
    /// Fails with [`VaultError::UserNotFound`] for an identity that never
    /// deposited and [`VaultError::InsufficientBalance`] when `amount` is more
    /// than the caller's recorded balance. Neither operation accepts the
    /// custody account as caller ([`VaultError::CustodyCaller`]).
    pub fn withdraw(&mut self, caller: &Address, amount: Amount) -> Result<Funder, VaultError> {
        self.ensure_not_custody(caller)
            .and_then(|()| self.ledger.check_withdrawal(caller, amount))
            .inspect_err(|e| {
                tracing::warn!(depositor = %caller, amount, error = %e, "Withdrawal rejected");
            })?;
        self.token.transfer(&self.custody, caller, amount)?;
        let funder = self.ledger.withdraw(caller, amount)?;

        tracing::info!(
            depositor = %caller,
            amount,
            balance = funder.amount,
            "Withdrawal recorded"
        );
        Ok(funder)
    }

    pub fn id(&self, identity: &Address) -> Option<DepositorId> {
        self.ledger.id(identity)
    }

    pub fn funder(&self, id: DepositorId) -> Option<&Funder> {
        self.ledger.funder(id)
    }

    /// The two depositors with the largest current amounts, richest first.
    pub fn top2(&self) -> Result<(Address, Address), VaultError> {
        self.ledger.top2()
    }

    pub fn top(&self, n: usize) -> Vec<Funder> {
        self.ledger.top(n)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The custody account holding deposited funds.
    pub fn custody(&self) -> &Address {
        &self.custody
    }

    /// Custody balance as reported by the token.
    pub fn custody_balance(&self) -> Amount {
        self.token.balance_of(&self.custody)
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    /// Transfers between custody and itself move nothing, so custody must
    /// never hold a record.
    fn ensure_not_custody(&self, caller: &Address) -> Result<(), VaultError> {
        if caller == &self.custody {
            return Err(VaultError::CustodyCaller);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custody::{BalanceToken, TokenError};

    const CUSTODY: Address = Address::from_seed(0xAA);

    fn make_vault(funded: &[(Address, Amount)]) -> Vault<BalanceToken> {
        let mut token = BalanceToken::new();
        for (account, amount) in funded {
            token.mint(account, *amount).unwrap();
        }
        Vault::new(CUSTODY, token)
    }

    #[test_log::test]
    fn test_deposit_moves_tokens_into_custody() {
        let alice = Address::from_seed(1);
        let mut vault = make_vault(&[(alice, 100)]);

        let funder = vault.deposit(&alice, 10).unwrap();

        assert_eq!(funder.amount, 10);
        assert_eq!(vault.custody_balance(), 10);
        assert_eq!(vault.token().balance_of(&alice), 90);
    }

    #[test]
    fn test_failed_transfer_records_nothing() {
        let alice = Address::from_seed(1);
        let mut vault = make_vault(&[(alice, 5)]);

        let err = vault.deposit(&alice, 10).unwrap_err();

        assert!(matches!(
            err,
            VaultError::Custody(TokenError::InsufficientFunds { needed: 10, .. })
        ));
        assert_eq!(vault.id(&alice), None);
        assert_eq!(vault.custody_balance(), 0);
    }

    #[test_log::test]
    fn test_rejected_withdrawal_moves_nothing() {
        let alice = Address::from_seed(1);
        let bob = Address::from_seed(2);
        let mut vault = make_vault(&[(alice, 100), (bob, 100)]);
        vault.deposit(&alice, 10).unwrap();

        assert_eq!(vault.withdraw(&bob, 1), Err(VaultError::UserNotFound));
        assert!(matches!(
            vault.withdraw(&alice, 11),
            Err(VaultError::InsufficientBalance { .. })
        ));
        assert_eq!(vault.custody_balance(), 10);
        assert_eq!(vault.token().balance_of(&alice), 90);
        assert_eq!(vault.token().balance_of(&bob), 100);
    }

    #[test]
    fn test_custody_account_cannot_deposit_or_withdraw() {
        let alice = Address::from_seed(1);
        let mut vault = make_vault(&[(alice, 100)]);
        vault.deposit(&alice, 50).unwrap();

        // Custody holds alice's 50; crediting it back to custody must fail
        assert_eq!(vault.deposit(&CUSTODY, 50), Err(VaultError::CustodyCaller));
        assert_eq!(vault.withdraw(&CUSTODY, 50), Err(VaultError::CustodyCaller));

        assert_eq!(vault.id(&CUSTODY), None);
        assert_eq!(vault.custody_balance(), 50);
        assert_eq!(vault.ledger().total_deposited(), 50);
        assert_eq!(vault.top2(), Err(VaultError::NotEnoughDepositors));
    }

    #[test]
    fn test_zero_deposit_rejected_before_transfer() {
        let alice = Address::from_seed(1);
        let mut vault = make_vault(&[(alice, 100)]);
        assert_eq!(vault.deposit(&alice, 0), Err(VaultError::InvalidAmount));
        assert_eq!(vault.id(&alice), None);
    }

    #[test]
    fn test_with_config_uses_custody_address() {
        let config = VaultConfig {
            custody: Address::from_seed(0x42),
            ..VaultConfig::default()
        };
        let alice = Address::from_seed(1);
        let mut token = BalanceToken::new();
        token.mint(&alice, 10).unwrap();

        let mut vault = Vault::with_config(&config, token);
        vault.deposit(&alice, 4).unwrap();

        assert_eq!(vault.custody(), &Address::from_seed(0x42));
        assert_eq!(vault.token().balance_of(&Address::from_seed(0x42)), 4);
    }
}
