//! Market fee configuration.

use serde::{Deserialize, Serialize};

use crate::domain::FeeRate;

/// Fee settings shared by every market.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketConfig {
    /// Protocol fee in basis points (default: 200, i.e. 2%).
    #[serde(default = "default_fee_bps")]
    pub fee_bps: u32,
}

const fn default_fee_bps() -> u32 {
    200
}

impl MarketConfig {
    /// The configured fee, or `None` if it exceeds 100%.
    #[must_use]
    pub fn fee_rate(&self) -> Option<FeeRate> {
        FeeRate::from_bps(self.fee_bps)
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            fee_bps: default_fee_bps(),
        }
    }
}
