//! Depositor vault: custody of a fungible token plus a ranked depositor ledger.
//!
//! Depositors move value into the vault with [`Vault::deposit`] and take it
//! back with [`Vault::withdraw`]. The [`Ledger`] behind the vault tracks one
//! [`Funder`] record per depositor and answers the top-2 query
//! ([`Vault::top2`]) against current amounts.
//!
//! Funds never move inside this crate: every transfer is delegated to a
//! [`CustodyToken`] collaborator. [`BalanceToken`] is the in-memory one.

pub mod address;
pub mod config;
pub mod custody;
pub mod error;
pub mod ledger;
#[cfg(feature = "trace")]
pub mod tracer;
pub mod vault;

pub use address::Address;
pub use config::VaultConfig;
pub use custody::{BalanceToken, CustodyToken, TokenError};
pub use error::VaultError;
pub use ledger::{Amount, DepositorId, Funder, Ledger, LedgerSnapshot};
pub use vault::Vault;
