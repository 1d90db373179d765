//! Scripted tournament replay.
//!
//! A scenario file lists the players, the stakes and result of every round,
//! the final ballots and how prizes are claimed. [`Scenario::run`] drives a
//! [`Tournament`] through the whole lifecycle and returns a report.
//!
//! ```toml
//! players = ["alice", "bob", "carol"]
//! stake = "5.0"
//!
//! [[rounds]]
//! winner = "A"
//! stakes = [
//!     { player = "alice", outcome = "A" },
//!     { player = "bob", outcome = "B", amount = "2.5" },
//! ]
//!
//! [votes]
//! alice = 1
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::tournament::{Tournament, TournamentSettings};
use crate::domain::{Amount, Ballot, Decision, DrawState, Outcome, Principal, RequestId};
use crate::error::{Error, Result};
use crate::port::{Fulfillment, Treasury};

/// How prize winners are paid at the end of a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimMode {
    /// Every winner claims their own share.
    #[default]
    Each,
    /// The operator pays everyone in one sweep.
    All,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StakeEntry {
    pub player: String,
    pub outcome: Outcome,
    /// Overrides the scenario-wide stake.
    #[serde(default)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoundScript {
    pub winner: Outcome,
    #[serde(default)]
    pub stakes: Vec<StakeEntry>,
}

/// A complete scripted tournament.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub players: Vec<String>,

    /// Principal used for admin operations.
    #[serde(default = "default_operator")]
    pub operator: String,

    /// Principal used to report results.
    #[serde(default = "default_oracle")]
    pub oracle: String,

    /// Default stake per player per round.
    #[serde(default = "default_stake")]
    pub stake: Decimal,

    /// Randomness seed; overrides the configured one.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub claim: ClaimMode,

    pub rounds: Vec<RoundScript>,

    /// Ballot code per voter: 1 to split, 2 for a random draw.
    #[serde(default)]
    pub votes: BTreeMap<String, u8>,
}

fn default_operator() -> String {
    "owner".to_string()
}

fn default_oracle() -> String {
    "oracle".to_string()
}

fn default_stake() -> Decimal {
    Decimal::new(5, 0)
}

/// Outcome of one replayed round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub round: usize,
    pub winner: Outcome,
    pub pot: String,
    pub fee: String,
    pub survivors: Vec<Principal>,
    pub payouts: Vec<Payout>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Payout {
    pub principal: Principal,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrawReport {
    pub request: RequestId,
    /// Decimal string; the value does not fit a JSON number.
    pub value: String,
    pub index: usize,
    pub winner: Principal,
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub players: usize,
    pub rounds: Vec<RoundReport>,
    pub tally: i64,
    pub decision: Decision,
    pub announcement: &'static str,
    pub draw: Option<DrawReport>,
    pub prizes: Vec<Payout>,
    pub prize_pool_received: String,
    pub residual: String,
    pub treasury: String,
}

impl Scenario {
    /// Parse a scenario from TOML content.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.players.is_empty() {
            return Err(Error::Scenario("at least one player is required".into()));
        }
        if self.rounds.len() < 2 {
            return Err(Error::Scenario("at least two rounds are required".into()));
        }
        Ok(())
    }

    /// Tournament settings with the round count taken from this scenario.
    #[must_use]
    pub fn settings(&self, base: TournamentSettings) -> TournamentSettings {
        TournamentSettings {
            rounds: self.rounds.len(),
            ..base
        }
    }

    /// Replay the scenario.
    ///
    /// `deliver` answers a randomness request; `decimals` is the currency
    /// scale used to read stake amounts and print the report.
    pub fn run(
        &self,
        tournament: &Tournament,
        treasury: &dyn Treasury,
        deliver: impl Fn(RequestId) -> Option<Fulfillment>,
        decimals: u32,
    ) -> Result<ScenarioReport> {
        if tournament.rounds() != self.rounds.len() {
            return Err(Error::Scenario(format!(
                "tournament has {} rounds, scenario scripts {}",
                tournament.rounds(),
                self.rounds.len()
            )));
        }
        let operator = Principal::new(self.operator.as_str());
        let oracle = Principal::new(self.oracle.as_str());
        let show = |amount: Amount| amount.display(decimals);

        let entry_fee = tournament.registration().entry_fee();
        for player in &self.players {
            tournament.register(&Principal::new(player.as_str()), entry_fee)?;
        }
        tournament.close_registration(&operator)?;
        if !tournament.registration().held().is_zero() {
            tournament.forward_registrations(&operator)?;
        }

        let mut rounds = Vec::with_capacity(self.rounds.len());
        for (index, script) in self.rounds.iter().enumerate() {
            rounds.push(self.play_round(tournament, index, script, &operator, &oracle, decimals)?);
        }

        for (voter, code) in &self.votes {
            let ballot = Ballot::from_code(*code)?;
            tournament.vote(&Principal::new(voter.as_str()), ballot)?;
        }
        tournament.stop_vote(&operator)?;
        let decision = tournament.result_vote(&operator)?;

        let draw = match decision {
            Decision::SplitEquallyAmongWinners => None,
            Decision::RandomDrawSingleWinner => {
                let request = tournament.request_draw(&operator)?;
                let fulfillment = deliver(request).ok_or_else(|| {
                    Error::Randomness(format!("no randomness delivered for {request}"))
                })?;
                tournament.fulfill_randomness(&fulfillment)?;
                match tournament.draw_state() {
                    DrawState::Drawn {
                        request,
                        value,
                        index,
                        winner,
                    } => Some(DrawReport {
                        request,
                        value: value.to_string(),
                        index,
                        winner,
                    }),
                    _ => None,
                }
            }
        };

        let winners = tournament.settle_prize_pool(&operator)?;
        let prizes = match self.claim {
            ClaimMode::Each => winners
                .iter()
                .map(|winner| {
                    tournament.claim_prize(winner).map(|amount| Payout {
                        principal: winner.clone(),
                        amount: show(amount),
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            ClaimMode::All => tournament
                .claim_all_prizes(&operator)?
                .into_iter()
                .map(|(principal, amount)| Payout {
                    principal,
                    amount: show(amount),
                })
                .collect(),
        };

        let pool = tournament.prize_pool();
        let report = ScenarioReport {
            players: self.players.len(),
            rounds,
            tally: tournament.tally(),
            decision,
            announcement: decision.announcement(),
            draw,
            prizes,
            prize_pool_received: show(pool.received()),
            residual: show(pool.residual()?),
            treasury: show(treasury.balance()),
        };
        info!(
            decision = %report.decision,
            winners = report.prizes.len(),
            "Scenario complete"
        );
        Ok(report)
    }

    fn play_round(
        &self,
        tournament: &Tournament,
        index: usize,
        script: &RoundScript,
        operator: &Principal,
        oracle: &Principal,
        decimals: u32,
    ) -> Result<RoundReport> {
        for entry in &script.stakes {
            let amount = Amount::from_decimal(entry.amount.unwrap_or(self.stake), decimals)?;
            tournament.place_stake(
                index,
                &Principal::new(entry.player.as_str()),
                entry.outcome,
                amount,
                amount,
            )?;
        }
        tournament.stop_round(operator, index)?;
        tournament.report_result(oracle, index, script.winner, script.winner.other())?;

        let market = tournament.round(index)?;
        if !market.fee().is_zero() {
            tournament.withdraw_round_fees(operator, index)?;
        }

        let survivors = tournament.survivors(index)?;
        let payouts = survivors
            .iter()
            .map(|survivor| {
                tournament.withdraw_gain(survivor, index).map(|gain| Payout {
                    principal: survivor.clone(),
                    amount: gain.display(decimals),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RoundReport {
            round: index,
            winner: script.winner,
            pot: market.total_pot().display(decimals),
            fee: market.fee().display(decimals),
            survivors,
            payouts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapter::outbound::{RngCoordinator, RoleTable, TreasuryVault};
    use crate::domain::FeeRate;

    const SCRIPT: &str = r#"
players = ["alice", "bob", "carol"]
stake = "1"

[[rounds]]
winner = "A"
stakes = [
    { player = "alice", outcome = "A" },
    { player = "bob", outcome = "A" },
    { player = "carol", outcome = "B", amount = "2" },
]

[[rounds]]
winner = "B"
stakes = [
    { player = "alice", outcome = "B" },
    { player = "bob", outcome = "B" },
]

[votes]
alice = 1
bob = 1
"#;

    fn run(script: &str) -> Result<ScenarioReport> {
        let scenario = Scenario::parse_toml(script)?;
        let roles = Arc::new(RoleTable::from_assignments(Some("owner"), Vec::<&str>::new(), ["oracle"]));
        let treasury = Arc::new(TreasuryVault::new());
        let randomness = Arc::new(RngCoordinator::seeded(3));
        let settings = scenario.settings(TournamentSettings {
            entry_fee: Amount::new(100),
            treasury_cut: FeeRate::from_bps(1_000).unwrap(),
            ..TournamentSettings::default()
        });
        let tournament = Tournament::new(settings, roles, treasury.clone(), randomness.clone())?;
        scenario.run(&tournament, treasury.as_ref(), |r| randomness.fulfill(r), 2)
    }

    #[test]
    fn split_scenario_pays_both_finalists() {
        let report = run(SCRIPT).unwrap();

        assert_eq!(report.rounds[0].pot, "4.00");
        assert_eq!(report.rounds[0].fee, "0.08");
        assert_eq!(report.rounds[0].payouts[0].amount, "1.96");
        assert_eq!(report.tally, 2);
        assert_eq!(report.decision, Decision::SplitEquallyAmongWinners);
        assert!(report.draw.is_none());
        assert_eq!(report.prizes.len(), 2);
        // 270 registration + 8 + 4 in fees, split two ways.
        assert_eq!(report.prize_pool_received, "2.82");
        assert_eq!(report.prizes[0].amount, "1.41");
        assert_eq!(report.treasury, "0.30");
    }

    #[test]
    fn tied_vote_goes_to_draw() {
        let script = SCRIPT.replace("bob = 1", "bob = 2");
        let report = run(&script).unwrap();

        assert_eq!(report.decision, Decision::RandomDrawSingleWinner);
        let draw = report.draw.unwrap();
        assert_eq!(report.prizes.len(), 1);
        assert_eq!(report.prizes[0].principal, draw.winner);
        assert_eq!(report.prizes[0].amount, "2.82");
    }

    #[test]
    fn single_round_is_rejected() {
        let result = Scenario::parse_toml("players = [\"a\"]\n[[rounds]]\nwinner = \"A\"\n");
        assert!(matches!(result, Err(Error::Scenario(_))));
    }

    #[test]
    fn unknown_ballot_code_fails() {
        let script = SCRIPT.replace("bob = 1", "bob = 3");
        assert!(matches!(run(&script), Err(Error::Vote(_))));
    }
}
