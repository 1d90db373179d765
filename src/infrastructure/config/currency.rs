//! Display scale for amounts.

use serde::{Deserialize, Serialize};

/// Largest scale `rust_decimal` can represent.
pub const MAX_DECIMALS: u32 = 28;

/// Currency configuration.
///
/// Settlement runs on integer minor units; `decimals` only decides how many
/// of them make one major unit when parsing config values and printing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

const fn default_decimals() -> u32 {
    2
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}
