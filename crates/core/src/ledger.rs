//! Depositor ledger: per-identity deposited amounts and the ranking used by
//! the top-2 query.
//!
//! Every identity gets a sequential [`DepositorId`] on its first deposit,
//! starting at 1. Records are never removed; a depositor who withdraws
//! everything keeps its id with an amount of 0.
//!
//! Alongside the records the ledger keeps a ranking set ordered by
//! `(amount, Reverse(id))`. Each mutation moves exactly one entry, so the
//! richest depositors are read from the end of the set without scanning.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::VaultError;

/// Token amount. Always non-negative.
pub type Amount = u128;

/// Sequential identifier assigned on first deposit.
pub type DepositorId = u32;

/// The accounting record for one depositor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Funder {
    pub depositor: Address,
    pub amount: Amount,
}

/// Serializable view of the ledger, depositors in id order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Id the next new depositor will receive.
    pub next_id: DepositorId,
    /// Sum of all recorded amounts.
    pub total: Amount,
    pub funders: Vec<SnapshotEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: DepositorId,
    pub depositor: Address,
    pub amount: Amount,
}

#[derive(Debug, Default)]
pub struct Ledger {
    ids: HashMap<Address, DepositorId>,
    /// Indexed by `id - 1`.
    funders: Vec<Funder>,
    /// Largest amount last; equal amounts put the lower id last.
    ranking: BTreeSet<(Amount, Reverse<DepositorId>)>,
}

fn slot(id: DepositorId) -> usize {
    (id - 1) as usize
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of depositors ever recorded.
    pub fn len(&self) -> usize {
        self.funders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funders.is_empty()
    }

    /// The id assigned to `identity`, or `None` if it never deposited.
    pub fn id(&self, identity: &Address) -> Option<DepositorId> {
        self.ids.get(identity).copied()
    }

    /// The current record for `id`, or `None` if no depositor holds that id.
    pub fn funder(&self, id: DepositorId) -> Option<&Funder> {
        id.checked_sub(1)
            .and_then(|index| self.funders.get(index as usize))
    }

    /// Sum of all recorded amounts.
    pub fn total_deposited(&self) -> Amount {
        self.funders
            .iter()
            .fold(0, |acc: Amount, f| acc.saturating_add(f.amount))
    }

    /// All depositors in id order.
    pub fn depositors(&self) -> impl Iterator<Item = (DepositorId, &Funder)> + '_ {
        (1..).zip(self.funders.iter())
    }

    /// Validate a deposit without applying it.
    pub fn check_deposit(&self, caller: &Address, amount: Amount) -> Result<(), VaultError> {
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }
        match self.id(caller) {
            Some(id) => {
                self.funders[slot(id)]
                    .amount
                    .checked_add(amount)
                    .ok_or(VaultError::Overflow)?;
            }
            None => {
                self.next_id()?;
            }
        }
        Ok(())
    }

    /// Record a deposit, registering `caller` if it is new.
    ///
    /// Returns the updated record.
    pub fn deposit(&mut self, caller: &Address, amount: Amount) -> Result<Funder, VaultError> {
        self.check_deposit(caller, amount)?;

        let id = match self.id(caller) {
            Some(id) => id,
            None => self.register(*caller)?,
        };

        let funder = &mut self.funders[slot(id)];
        let updated = funder
            .amount
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;
        self.ranking.remove(&(funder.amount, Reverse(id)));
        self.ranking.insert((updated, Reverse(id)));
        funder.amount = updated;

        Ok(*funder)
    }

    /// Validate a withdrawal without applying it, returning the caller's id.
    pub fn check_withdrawal(
        &self,
        caller: &Address,
        amount: Amount,
    ) -> Result<DepositorId, VaultError> {
        let id = self.id(caller).ok_or(VaultError::UserNotFound)?;
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }
        let available = self.funders[slot(id)].amount;
        if amount > available {
            return Err(VaultError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        Ok(id)
    }

    /// Record a withdrawal. The amount is rejected, never clamped, when it
    /// exceeds the recorded balance.
    pub fn withdraw(&mut self, caller: &Address, amount: Amount) -> Result<Funder, VaultError> {
        let id = self.check_withdrawal(caller, amount)?;

        let funder = &mut self.funders[slot(id)];
        let updated = funder.amount - amount;
        self.ranking.remove(&(funder.amount, Reverse(id)));
        self.ranking.insert((updated, Reverse(id)));
        funder.amount = updated;

        Ok(*funder)
    }

    /// Up to `n` records, richest first. Equal amounts rank the earlier
    /// depositor first.
    pub fn top(&self, n: usize) -> Vec<Funder> {
        self.ranking
            .iter()
            .rev()
            .take(n)
            .map(|&(_, Reverse(id))| self.funders[slot(id)])
            .collect()
    }

    /// The two depositors with the largest current amounts, richest first.
    pub fn top2(&self) -> Result<(Address, Address), VaultError> {
        match self.top(2).as_slice() {
            [richest, second] => Ok((richest.depositor, second.depositor)),
            _ => Err(VaultError::NotEnoughDepositors),
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            next_id: (self.funders.len() as DepositorId).saturating_add(1),
            total: self.total_deposited(),
            funders: self
                .depositors()
                .map(|(id, f)| SnapshotEntry {
                    id,
                    depositor: f.depositor,
                    amount: f.amount,
                })
                .collect(),
        }
    }

    fn next_id(&self) -> Result<DepositorId, VaultError> {
        DepositorId::try_from(self.funders.len() + 1).map_err(|_| VaultError::Overflow)
    }

    fn register(&mut self, depositor: Address) -> Result<DepositorId, VaultError> {
        let id = self.next_id()?;
        self.funders.push(Funder {
            depositor,
            amount: 0,
        });
        self.ids.insert(depositor, id);
        self.ranking.insert((0, Reverse(id)));
        tracing::debug!(%depositor, id, "Registered new depositor");
        Ok(id)
    }
}
