//! A fully wired tournament for tests.

use std::sync::Arc;

use super::config::{self, ADMIN, ENTRY_FEE, ORACLE};
use super::ports::{FlakyTreasury, ScriptedRandomness};
use crate::adapter::outbound::RoleTable;
use crate::application::tournament::Tournament;
use crate::domain::{Amount, Outcome, Principal};

/// Tournament plus handles on its test doubles.
pub struct TournamentFixture {
    pub tournament: Tournament,
    pub roles: Arc<RoleTable>,
    pub treasury: Arc<FlakyTreasury>,
    pub randomness: Arc<ScriptedRandomness>,
}

impl TournamentFixture {
    /// Tournament with `rounds` rounds and the canonical roles.
    pub fn new(rounds: usize) -> Self {
        let roles = Arc::new(config::roles().role_table());
        let treasury = Arc::new(FlakyTreasury::new());
        let randomness = Arc::new(ScriptedRandomness::new());
        let tournament = Tournament::new(
            config::settings(rounds),
            roles.clone(),
            treasury.clone(),
            randomness.clone(),
        )
        .unwrap_or_else(|e| panic!("fixture tournament: {e}"));
        Self {
            tournament,
            roles,
            treasury,
            randomness,
        }
    }

    pub fn admin(&self) -> Principal {
        Principal::new(ADMIN)
    }

    pub fn oracle(&self) -> Principal {
        Principal::new(ORACLE)
    }

    /// Register every name with the exact entry fee.
    pub fn register_all(&self, names: &[&str]) {
        for name in names {
            self.tournament
                .register(&Principal::new(*name), ENTRY_FEE)
                .unwrap_or_else(|e| panic!("register {name}: {e}"));
        }
    }

    /// Stake `minor` per player, stop the round and report `winner`.
    pub fn play_round(&self, round: usize, stakes: &[(&str, Outcome)], minor: u128, winner: Outcome) {
        let value = Amount::new(minor);
        for (name, outcome) in stakes {
            self.tournament
                .place_stake(round, &Principal::new(*name), *outcome, value, value)
                .unwrap_or_else(|e| panic!("round {round} stake by {name}: {e}"));
        }
        self.tournament
            .stop_round(&self.admin(), round)
            .unwrap_or_else(|e| panic!("stop round {round}: {e}"));
        self.tournament
            .report_result(&self.oracle(), round, winner, winner.other())
            .unwrap_or_else(|e| panic!("report round {round}: {e}"));
    }
}
