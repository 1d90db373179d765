//! Tournament configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Round count, entry fee and registration split.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TournamentConfig {
    /// Number of chained rounds (default: 5, minimum: 2).
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Registration fee in major units (default: 1.0).
    #[serde(default = "default_entry_fee")]
    pub entry_fee: Decimal,
    /// Share of each entry fee sent to the treasury, in basis points
    /// (default: 1000, i.e. 10%).
    #[serde(default = "default_treasury_cut_bps")]
    pub treasury_cut_bps: u32,
}

const fn default_rounds() -> usize {
    5
}

fn default_entry_fee() -> Decimal {
    Decimal::ONE
}

const fn default_treasury_cut_bps() -> u32 {
    1_000
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds: default_rounds(),
            entry_fee: default_entry_fee(),
            treasury_cut_bps: default_treasury_cut_bps(),
        }
    }
}
