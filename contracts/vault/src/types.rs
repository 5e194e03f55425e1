use soroban_sdk::{contracterror, contracttype, Address};

/// Storage keys for the contract.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Custody token contract address (persistent storage).
    Token,
    /// Number of depositors registered so far; also the last id handed out.
    DepositorCount,
    /// Depositor address → sequential id.
    Id(Address),
    /// Sequential id → funder record.
    Funder(u32),
}

/// Accounting record for one depositor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Funder {
    pub depositor: Address,
    /// Current deposited amount. Never negative.
    pub amount: i128,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    /// "user doesn't exist": withdrawal by an address that never deposited.
    UserNotFound = 1,
    /// "Withdrawal amount too big".
    InsufficientBalance = 2,
    /// "Less than two depositors".
    NotEnoughDepositors = 3,
    /// Deposit or withdrawal of a non-positive amount.
    InvalidAmount = 4,
}
