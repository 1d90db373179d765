//! Market lifecycle states and staking policy.

use std::fmt;

use serde::Serialize;

use crate::domain::money::Amount;
use crate::domain::outcome::Outcome;

/// Lifecycle state of a market.
///
/// ```text
/// Open --stop--> Stopped --report--> Resolved
/// Open --report--> Resolved
/// Open|Stopped --cancel--> Cancelled
/// ```
///
/// `Resolved` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketState {
    Open,
    Stopped,
    Resolved,
    Cancelled,
}

impl MarketState {
    /// Returns true for `Resolved` and `Cancelled`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Cancelled)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Stopped => "stopped",
            Self::Resolved => "resolved",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a principal may stake more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StakePolicy {
    /// One stake per principal. Used by every chained round.
    Single,
    /// Repeated stakes accumulate, on either side.
    Accumulate,
}

/// Outcome recorded by the oracle, with the fee earmarked at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub winner: Outcome,
    pub loser: Outcome,
    pub fee: Amount,
}
