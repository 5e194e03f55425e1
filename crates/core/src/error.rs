use crate::custody::TokenError;
use crate::ledger::Amount;

/// Errors returned by ledger and vault operations.
///
/// A call that returns an error has no effect: neither the ledger nor the
/// custody token is modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VaultError {
    /// Withdrawal attempted by an identity with no deposit history.
    #[error("user doesn't exist")]
    UserNotFound,
    /// Withdrawal larger than the caller's recorded amount.
    #[error("Withdrawal amount too big")]
    InsufficientBalance { requested: Amount, available: Amount },
    /// Top-2 query with fewer than two recorded depositors.
    #[error("Less than two depositors")]
    NotEnoughDepositors,
    #[error("amount must be positive")]
    InvalidAmount,
    /// The vault's own custody account tried to deposit or withdraw.
    #[error("custody account cannot act as a depositor")]
    CustodyCaller,
    #[error("deposit would overflow the recorded amount")]
    Overflow,
    #[error("custody transfer failed: {0}")]
    Custody(#[from] TokenError),
}

/// Failure to parse an [`Address`](crate::Address) from text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressParseError {
    #[error("invalid hex in address: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("address must be exactly 20 bytes (40 hex chars), got {0}")]
    Length(usize),
}
