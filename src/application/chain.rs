//! Ordered chain of round markets.
//!
//! Round 0 admits registered players. Round `i > 0` admits the winners of
//! round `i - 1`, read straight from that market's resolved state, so there
//! is no separate survivor list to keep in sync.

use tracing::debug;

use crate::domain::{
    Amount, FeeRate, Market, MarketId, Outcome, Principal, StakePolicy, WinnerGate,
};
use crate::error::{ChainError, Result};
use crate::port::{Roster, RosterGate};

/// Fixed sequence of single-stake markets.
#[derive(Debug, Clone)]
pub struct RoundChain {
    rounds: Vec<Market>,
}

impl RoundChain {
    /// Create `rounds` open markets sharing `fee_rate`.
    pub fn new(rounds: usize, fee_rate: FeeRate) -> Result<Self> {
        if rounds < 2 {
            return Err(ChainError::TooFewRounds { rounds }.into());
        }
        let rounds = (0..rounds)
            .map(|i| Market::new(MarketId::round(i), StakePolicy::Single, fee_rate))
            .collect();
        Ok(Self { rounds })
    }

    fn check(&self, round: usize) -> Result<()> {
        if round >= self.rounds.len() {
            return Err(ChainError::UnknownRound {
                round,
                rounds: self.rounds.len(),
            }
            .into());
        }
        Ok(())
    }

    fn market_mut(&mut self, round: usize) -> Result<&mut Market> {
        let rounds = self.rounds.len();
        self.rounds
            .get_mut(round)
            .ok_or_else(|| ChainError::UnknownRound { round, rounds }.into())
    }

    /// Stake in `round`, gated by the roster for round 0 and by the
    /// predecessor's winners after that.
    pub fn place_stake(
        &mut self,
        round: usize,
        caller: &Principal,
        outcome: Outcome,
        declared: Amount,
        attached: Amount,
        roster: &dyn Roster,
    ) -> Result<()> {
        self.check(round)?;
        if round == 0 {
            let gate = RosterGate::new(roster);
            self.rounds[0].place_stake(caller, outcome, declared, attached, &gate)?;
        } else {
            let (before, after) = self.rounds.split_at_mut(round);
            let gate = WinnerGate::new(&before[round - 1]);
            after[0].place_stake(caller, outcome, declared, attached, &gate)?;
        }
        debug!(round, principal = %caller, "Round stake accepted");
        Ok(())
    }

    pub fn stop(&mut self, round: usize) -> Result<()> {
        Ok(self.market_mut(round)?.stop()?)
    }

    pub fn report_result(&mut self, round: usize, winner: Outcome, loser: Outcome) -> Result<()> {
        Ok(self.market_mut(round)?.report_result(winner, loser)?)
    }

    pub fn cancel(&mut self, round: usize) -> Result<()> {
        Ok(self.market_mut(round)?.cancel()?)
    }

    pub fn withdraw_gain(&mut self, round: usize, caller: &Principal) -> Result<Amount> {
        Ok(self.market_mut(round)?.withdraw_gain(caller)?)
    }

    pub fn claim_cancelled(&mut self, round: usize, caller: &Principal) -> Result<Amount> {
        Ok(self.market_mut(round)?.claim_cancelled(caller)?)
    }

    pub fn withdraw_fees(&mut self, round: usize) -> Result<Amount> {
        Ok(self.market_mut(round)?.withdraw_fees()?)
    }

    pub fn emergency_withdraw(&mut self, round: usize) -> Result<Amount> {
        Ok(self.market_mut(round)?.emergency_withdraw())
    }

    /// Whether `principal` won `round`.
    pub fn is_winner(&self, round: usize, principal: &Principal) -> Result<bool> {
        Ok(self.market(round)?.is_winner(principal))
    }

    /// Winners of `round`, in the order they first staked.
    pub fn survivors(&self, round: usize) -> Result<Vec<Principal>> {
        Ok(self.market(round)?.winners())
    }

    pub fn market(&self, round: usize) -> Result<&Market> {
        self.rounds.get(round).ok_or_else(|| {
            ChainError::UnknownRound {
                round,
                rounds: self.rounds.len(),
            }
            .into()
        })
    }

    /// The last round, which the final vote builds on.
    #[must_use]
    pub fn terminal(&self) -> &Market {
        // `new` guarantees at least two rounds.
        &self.rounds[self.rounds.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn markets(&self) -> impl Iterator<Item = &Market> {
        self.rounds.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketError, Registration};
    use crate::error::Error;

    fn p(name: &str) -> Principal {
        Principal::new(name)
    }

    fn roster(names: &[&str]) -> Registration {
        let mut registration = Registration::new(Amount::new(100), FeeRate::ZERO);
        for name in names {
            registration.register(&p(name), Amount::new(100)).unwrap();
        }
        registration
    }

    fn stake(chain: &mut RoundChain, round: usize, who: &str, outcome: Outcome, reg: &Registration) {
        chain
            .place_stake(round, &p(who), outcome, Amount::new(500), Amount::new(500), reg)
            .unwrap();
    }

    #[test]
    fn chain_needs_two_rounds() {
        assert!(matches!(
            RoundChain::new(1, FeeRate::DEFAULT),
            Err(Error::Chain(ChainError::TooFewRounds { rounds: 1 }))
        ));
    }

    #[test]
    fn first_round_admits_registered_players_only() {
        let reg = roster(&["alice"]);
        let mut chain = RoundChain::new(2, FeeRate::DEFAULT).unwrap();

        stake(&mut chain, 0, "alice", Outcome::A, &reg);
        let result = chain.place_stake(0, &p("bob"), Outcome::A, Amount::new(500), Amount::new(500), &reg);

        assert!(matches!(
            result,
            Err(Error::Market(MarketError::NotEligible { .. }))
        ));
    }

    #[test]
    fn later_rounds_admit_previous_winners_only() {
        let reg = roster(&["alice", "bob"]);
        let mut chain = RoundChain::new(3, FeeRate::DEFAULT).unwrap();
        stake(&mut chain, 0, "alice", Outcome::A, &reg);
        stake(&mut chain, 0, "bob", Outcome::B, &reg);

        // Nobody won round 0 yet.
        assert!(chain
            .place_stake(1, &p("alice"), Outcome::A, Amount::new(500), Amount::new(500), &reg)
            .is_err());

        chain.stop(0).unwrap();
        chain.report_result(0, Outcome::A, Outcome::B).unwrap();

        stake(&mut chain, 1, "alice", Outcome::B, &reg);
        assert!(matches!(
            chain.place_stake(1, &p("bob"), Outcome::A, Amount::new(500), Amount::new(500), &reg),
            Err(Error::Market(MarketError::NotEligible { .. }))
        ));
        assert_eq!(chain.survivors(0).unwrap(), vec![p("alice")]);
        assert!(chain.is_winner(0, &p("alice")).unwrap());
        assert!(!chain.is_winner(1, &p("alice")).unwrap());
    }

    #[test]
    fn unknown_round_is_rejected() {
        let mut chain = RoundChain::new(2, FeeRate::DEFAULT).unwrap();
        assert!(matches!(
            chain.stop(2),
            Err(Error::Chain(ChainError::UnknownRound { round: 2, rounds: 2 }))
        ));
        assert!(chain.survivors(9).is_err());
    }

    #[test]
    fn terminal_is_last_round() {
        let chain = RoundChain::new(5, FeeRate::DEFAULT).unwrap();
        assert_eq!(chain.terminal().id().as_str(), "round-4");
        assert_eq!(chain.len(), 5);
    }
}
