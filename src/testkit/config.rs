//! Canonical test configurations.
//!
//! Single source of truth for settings used across tests.

use crate::application::tournament::TournamentSettings;
use crate::domain::{Amount, FeeRate};
use crate::infrastructure::config::roles::RolesConfig;

pub const OWNER: &str = "owner";
pub const ADMIN: &str = "admin";
pub const ORACLE: &str = "oracle";

/// Entry fee used by [`settings`]: 1.00 at two decimals.
pub const ENTRY_FEE: Amount = Amount::new(100);

/// Owner, one admin and one oracle.
pub fn roles() -> RolesConfig {
    RolesConfig {
        owner: Some(OWNER.to_string()),
        admins: vec![ADMIN.to_string()],
        oracles: vec![ORACLE.to_string()],
    }
}

/// Tournament with `rounds` rounds, a 2% fee and a 10% treasury cut.
pub fn settings(rounds: usize) -> TournamentSettings {
    TournamentSettings {
        rounds,
        fee_rate: FeeRate::DEFAULT,
        entry_fee: ENTRY_FEE,
        treasury_cut: FeeRate::from_bps(1_000).unwrap_or(FeeRate::ZERO),
        values_per_request: 1,
    }
}
