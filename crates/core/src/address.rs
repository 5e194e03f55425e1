//! External account identity.
//!
//! Addresses are opaque 20-byte identifiers written as `0x` followed by 40
//! lowercase hex digits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AddressParseError;

/// Number of raw bytes in an [`Address`].
pub const ADDRESS_LEN: usize = 20;

/// An external identity that can hold token balances and deposit into the vault.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Deterministic address whose every byte is `seed`. Handy for fixtures.
    pub const fn from_seed(seed: u8) -> Self {
        Self([seed; ADDRESS_LEN])
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits)?;
        let len = bytes.len();
        let arr: [u8; ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| AddressParseError::Length(len))?;
        Ok(Self(arr))
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_prefixed_lowercase_hex() {
        let address = Address::from_seed(0xAB);
        assert_eq!(address.to_string(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn test_parse_accepts_with_and_without_prefix() {
        let hex_str = "01".repeat(20);
        let with_prefix: Address = format!("0x{hex_str}").parse().unwrap();
        let without_prefix: Address = hex_str.parse().unwrap();
        assert_eq!(with_prefix, without_prefix);
        assert_eq!(with_prefix, Address::from_seed(1));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = "0xabcd".parse::<Address>().unwrap_err();
        assert!(matches!(err, AddressParseError::Length(2)));
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        let err = format!("0x{}", "zz".repeat(20)).parse::<Address>().unwrap_err();
        assert!(matches!(err, AddressParseError::Hex(_)));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let address = Address::from_seed(7);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "07".repeat(20)));
        let decoded: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, address);
    }
}
