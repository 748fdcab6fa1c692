//! Ledger configuration, loaded from environment variables.

use std::{env, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::{DEFAULT_BRANCH, WithdrawalLimits};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Branch code printed on every account.
    pub branch: String,

    /// Limits applied to every newly opened account.
    pub withdrawal_limits: WithdrawalLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            withdrawal_limits: WithdrawalLimits::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: `{value}`")]
    InvalidValue { name: &'static str, value: String },
}

impl Config {
    /// Reads `BANK_BRANCH`, `BANK_WITHDRAWAL_CEILING` and
    /// `BANK_DAILY_WITHDRAWALS`. Unset variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let branch = match lookup("BANK_BRANCH") {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    name: "BANK_BRANCH",
                    value,
                });
            }
            Some(value) => value.trim().to_string(),
            None => defaults.branch,
        };

        let per_transaction: Decimal = parse_var(
            &lookup,
            "BANK_WITHDRAWAL_CEILING",
            defaults.withdrawal_limits.per_transaction,
        )?;
        if per_transaction <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                name: "BANK_WITHDRAWAL_CEILING",
                value: per_transaction.to_string(),
            });
        }

        let daily_withdrawals = parse_var(
            &lookup,
            "BANK_DAILY_WITHDRAWALS",
            defaults.withdrawal_limits.daily_withdrawals,
        )?;

        Ok(Self {
            branch,
            withdrawal_limits: WithdrawalLimits {
                per_transaction,
                daily_withdrawals,
            },
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}
