//! # Router Configuration
//!
//! Defaults carry the production constants. `from_env` overlays `ORBITER_*`
//! variables on top of the defaults.

use crate::domain::params::Params;
use crate::domain::pending::{DEFAULT_PENDING_TTL_SECS, DEFAULT_SWEEP_LIMIT};
use serde::{Deserialize, Serialize};
use shared_types::OrbiterError;
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required value is empty.
    #[error("configuration value {0} is empty")]
    Missing(&'static str),

    /// A value is out of range or malformed.
    #[error("invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<ConfigError> for OrbiterError {
    fn from(err: ConfigError) -> Self {
        OrbiterError::Validation(err.to_string())
    }
}

/// Complete router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbiterConfig {
    /// Account allowed to run administrative operations.
    pub authority: String,
    /// Accounts owned by the router.
    pub accounts: AccountsConfig,
    /// Initial parameters written at genesis.
    pub params: Params,
    /// Pending payload store.
    pub pending: PendingPayloadConfig,
}

impl Default for OrbiterConfig {
    fn default() -> Self {
        Self {
            authority: "orbiter-authority".to_string(),
            accounts: AccountsConfig::default(),
            params: Params::default(),
            pending: PendingPayloadConfig::default(),
        }
    }
}

/// Router-owned accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsConfig {
    /// Receives inbound transfers and pays outbound ones.
    pub holding: String,
    /// Receives residue swept out of the holding account.
    pub dust: String,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            holding: "orbiter-holding".to_string(),
            dust: "orbiter-dust".to_string(),
        }
    }
}

/// Pending payload expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPayloadConfig {
    /// Entries older than this are swept.
    pub ttl_secs: u64,
    /// Maximum entries removed per sweep.
    pub sweep_limit: usize,
}

impl Default for PendingPayloadConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_PENDING_TTL_SECS,
            sweep_limit: DEFAULT_SWEEP_LIMIT,
        }
    }
}

impl OrbiterConfig {
    /// Defaults overlaid with environment variables.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `ORBITER_AUTHORITY` | `authority` |
    /// | `ORBITER_HOLDING_ACCOUNT` | `accounts.holding` |
    /// | `ORBITER_DUST_ACCOUNT` | `accounts.dust` |
    /// | `ORBITER_MAX_PASSTHROUGH_PAYLOAD_SIZE` | `params.max_passthrough_payload_size` |
    /// | `ORBITER_PENDING_TTL_SECS` | `pending.ttl_secs` |
    /// | `ORBITER_PENDING_SWEEP_LIMIT` | `pending.sweep_limit` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(authority) = lookup("ORBITER_AUTHORITY") {
            config.authority = authority;
        }
        if let Some(holding) = lookup("ORBITER_HOLDING_ACCOUNT") {
            config.accounts.holding = holding;
        }
        if let Some(dust) = lookup("ORBITER_DUST_ACCOUNT") {
            config.accounts.dust = dust;
        }
        if let Some(size) = parse_var(
            &lookup,
            "ORBITER_MAX_PASSTHROUGH_PAYLOAD_SIZE",
            "params.max_passthrough_payload_size",
        )? {
            config.params.max_passthrough_payload_size = size;
        }
        if let Some(ttl) = parse_var(&lookup, "ORBITER_PENDING_TTL_SECS", "pending.ttl_secs")? {
            config.pending.ttl_secs = ttl;
        }
        if let Some(limit) =
            parse_var(&lookup, "ORBITER_PENDING_SWEEP_LIMIT", "pending.sweep_limit")?
        {
            config.pending.sweep_limit = limit;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.authority.is_empty() {
            return Err(ConfigError::Missing("authority"));
        }
        if self.accounts.holding.is_empty() {
            return Err(ConfigError::Missing("accounts.holding"));
        }
        if self.accounts.dust.is_empty() {
            return Err(ConfigError::Missing("accounts.dust"));
        }
        if self.accounts.holding == self.accounts.dust {
            return Err(ConfigError::Invalid {
                field: "accounts.dust",
                reason: "must differ from the holding account".to_string(),
            });
        }
        if self.params.max_passthrough_payload_size == 0 {
            return Err(ConfigError::Invalid {
                field: "params.max_passthrough_payload_size",
                reason: "must be positive".to_string(),
            });
        }
        if self.pending.sweep_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "pending.sweep_limit",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T, F>(
    lookup: &F,
    name: &'static str,
    field: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid {
                field,
                reason: format!("{}={}: {}", name, raw, e),
            }),
        None => Ok(None),
    }
}
