//! Vault configuration from environment variables.

use tracing::level_filters::LevelFilter;

use crate::address::Address;

/// Env var holding the hex address of the vault's custody account.
pub const CUSTODY_ADDRESS_ENV: &str = "VAULT_CUSTODY_ADDRESS";
/// Env var holding the log level used by the tracer.
pub const LOG_LEVEL_ENV: &str = "VAULT_LOG";

/// Custody account used when none is configured.
pub const DEFAULT_CUSTODY_ADDRESS: Address = Address::from_seed(0xAA);

#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Account that holds deposited tokens.
    pub custody: Address,
    /// Log level for [`init_tracer`](crate::tracer::init_tracer). `None`
    /// leaves the choice to `RUST_LOG`.
    pub log_level: Option<LevelFilter>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            custody: DEFAULT_CUSTODY_ADDRESS,
            log_level: None,
        }
    }
}

impl VaultConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Invalid values are logged
    /// and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(CUSTODY_ADDRESS_ENV) {
            match raw.parse::<Address>() {
                Ok(address) => config.custody = address,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "{CUSTODY_ADDRESS_ENV} is not a valid address, using default custody account"
                    );
                }
            }
        }
        if let Some(raw) = lookup(LOG_LEVEL_ENV) {
            match raw.trim().parse::<LevelFilter>() {
                Ok(level) => config.log_level = Some(level),
                Err(e) => {
                    tracing::warn!(error = %e, value = %raw, "{LOG_LEVEL_ENV} is not a log level");
                }
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = VaultConfig::from_lookup(lookup(&[]));
        assert_eq!(config.custody, DEFAULT_CUSTODY_ADDRESS);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_reads_custody_and_level() {
        let custody = format!("0x{}", "12".repeat(20));
        let config = VaultConfig::from_lookup(lookup(&[
            (CUSTODY_ADDRESS_ENV, custody.as_str()),
            (LOG_LEVEL_ENV, "debug"),
        ]));
        assert_eq!(config.custody, Address::from_seed(0x12));
        assert_eq!(config.log_level, Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = VaultConfig::from_lookup(lookup(&[
            (CUSTODY_ADDRESS_ENV, "0x1234"),
            (LOG_LEVEL_ENV, "loud"),
        ]));
        assert_eq!(config.custody, DEFAULT_CUSTODY_ADDRESS);
        assert_eq!(config.log_level, None);
    }
}
