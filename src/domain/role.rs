//! Roles and the privileged operations they unlock.
//!
//! The capability table lives in [`Operation::roles`]; whoever answers
//! `has_role` (see the `Authority` port) never needs to know which
//! operations exist.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Administrative role held by a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Oracle,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Oracle => "oracle",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const OWNER_OR_ADMIN: &[Role] = &[Role::Owner, Role::Admin];
const ANY_ROLE: &[Role] = &[Role::Owner, Role::Admin, Role::Oracle];

/// Every entry point that requires a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    StopMarket,
    ReportResult,
    CancelMarket,
    WithdrawFees,
    EmergencyWithdraw,
    CloseRegistration,
    ForwardRegistrations,
    StopVote,
    ResultVote,
    RequestDraw,
    SetWinners,
    ClaimAll,
    SettlePrizePool,
}

impl Operation {
    /// Roles allowed to perform this operation; holding any one suffices.
    #[must_use]
    pub const fn roles(self) -> &'static [Role] {
        match self {
            Self::ReportResult => ANY_ROLE,
            _ => OWNER_OR_ADMIN,
        }
    }

    /// Stable name used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StopMarket => "stop the market",
            Self::ReportResult => "report the result",
            Self::CancelMarket => "cancel the market",
            Self::WithdrawFees => "withdraw earned fees",
            Self::EmergencyWithdraw => "emergency withdraw",
            Self::CloseRegistration => "close registration",
            Self::ForwardRegistrations => "forward registration funds",
            Self::StopVote => "stop the vote",
            Self::ResultVote => "finalize the vote",
            Self::RequestDraw => "request a random draw",
            Self::SetWinners => "set prize pool winners",
            Self::ClaimAll => "pay out all winners",
            Self::SettlePrizePool => "settle the prize pool",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
