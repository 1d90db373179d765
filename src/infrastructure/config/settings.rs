//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! falls back to the defaults documented on each field.
//!
//! # Example
//!
//! ```no_run
//! use squidbet::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::currency::{CurrencyConfig, MAX_DECIMALS};
use super::logging::LoggingConfig;
use super::market::MarketConfig;
use super::randomness::RandomnessConfig;
use super::roles::RolesConfig;
use super::tournament::TournamentConfig;
use crate::application::tournament::TournamentSettings;
use crate::domain::{Amount, FeeRate};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Minor-unit scale used for parsing and display.
    #[serde(default)]
    pub currency: CurrencyConfig,

    /// Market fee settings.
    #[serde(default)]
    pub market: MarketConfig,

    /// Round count and registration settings.
    #[serde(default)]
    pub tournament: TournamentConfig,

    /// Who holds the owner, admin and oracle roles.
    #[serde(default)]
    pub roles: RolesConfig,

    /// Randomness coordinator settings.
    #[serde(default)]
    pub randomness: RandomnessConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        if self.currency.decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue {
                field: "decimals",
                reason: format!("must be at most {MAX_DECIMALS}"),
            }
            .into());
        }
        if self.market.fee_rate().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "fee_bps",
                reason: "must be at most 10000".to_string(),
            }
            .into());
        }
        if self.tournament.rounds < 2 {
            return Err(ConfigError::InvalidValue {
                field: "rounds",
                reason: "must be at least 2".to_string(),
            }
            .into());
        }
        if FeeRate::from_bps(self.tournament.treasury_cut_bps).is_none() {
            return Err(ConfigError::InvalidValue {
                field: "treasury_cut_bps",
                reason: "must be at most 10000".to_string(),
            }
            .into());
        }
        if self.entry_fee()?.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "entry_fee",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.randomness.values_per_request == 0 {
            return Err(ConfigError::InvalidValue {
                field: "values_per_request",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        for name in self
            .roles
            .owner
            .iter()
            .chain(&self.roles.admins)
            .chain(&self.roles.oracles)
        {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "roles",
                    reason: "principal names cannot be empty".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Non-fatal issues worth reporting to an operator.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.roles.has_administrator() {
            warnings.push("no owner or admin configured; admin operations will be refused".into());
        }
        if !self.roles.has_reporter() {
            warnings.push("no owner or oracle configured; results cannot be reported".into());
        }
        if self.market.fee_bps == 0 {
            warnings.push("fee_bps is 0; fee withdrawals will always fail".into());
        }
        warnings
    }

    /// Entry fee converted to minor units.
    #[allow(clippy::result_large_err)]
    pub fn entry_fee(&self) -> Result<Amount> {
        Amount::from_decimal(self.tournament.entry_fee, self.currency.decimals).map_err(|e| {
            ConfigError::InvalidValue {
                field: "entry_fee",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Market fee rate.
    #[must_use]
    pub fn fee_rate(&self) -> FeeRate {
        self.market.fee_rate().unwrap_or_default()
    }

    /// Settings for a tournament built from this configuration.
    #[allow(clippy::result_large_err)]
    pub fn tournament_settings(&self) -> Result<TournamentSettings> {
        let treasury_cut = FeeRate::from_bps(self.tournament.treasury_cut_bps).ok_or(
            ConfigError::InvalidValue {
                field: "treasury_cut_bps",
                reason: "must be at most 10000".to_string(),
            },
        )?;
        Ok(TournamentSettings {
            rounds: self.tournament.rounds,
            fee_rate: self.fee_rate(),
            entry_fee: self.entry_fee()?,
            treasury_cut,
            values_per_request: self.randomness.values_per_request,
        })
    }
}
