//! Binary-outcome pari-mutuel market.
//!
//! A [`Market`] accepts stakes on one of two outcomes while open, records
//! the winning outcome, earmarks a protocol fee and pays every winner a
//! share of the remaining pot proportional to their stake on the winning
//! side. Each principal can withdraw at most once, and a cancelled market
//! refunds principal instead.
//!
//! The market is a pure state machine. It does not know who is allowed to
//! stop or resolve it and it does not move funds anywhere; it only keeps
//! track of what it `held`s and returns the amount each withdrawal releases.
//! Authorization and fund routing belong to the application services.
//!
//! Every operation validates first and writes last, so a failed call never
//! leaves a partial mutation behind.

mod payout;
mod state;

pub use payout::{distributable, fee_for, gain_for, remainder};
pub use state::{MarketState, Resolution, StakePolicy};

use std::collections::HashSet;

use tracing::{debug, info};

use super::eligibility::Eligibility;
use super::error::MarketError;
use super::id::{MarketId, Principal};
use super::ledger::{Position, StakeBook};
use super::money::{Amount, FeeRate};
use super::outcome::Outcome;

/// A single binary-outcome settlement unit.
#[derive(Debug, Clone)]
pub struct Market {
    id: MarketId,
    policy: StakePolicy,
    fee_rate: FeeRate,
    state: MarketState,
    ever_stopped: bool,
    resolution: Option<Resolution>,
    book: StakeBook,
    held: Amount,
    fee_withdrawn: bool,
    paid_out: Amount,
    gain_claimed: HashSet<Principal>,
    cancel_claimed: HashSet<Principal>,
}

impl Market {
    /// Create an open market.
    #[must_use]
    pub fn new(id: MarketId, policy: StakePolicy, fee_rate: FeeRate) -> Self {
        Self {
            id,
            policy,
            fee_rate,
            state: MarketState::Open,
            ever_stopped: false,
            resolution: None,
            book: StakeBook::new(),
            held: Amount::ZERO,
            fee_withdrawn: false,
            paid_out: Amount::ZERO,
            gain_claimed: HashSet::new(),
            cancel_claimed: HashSet::new(),
        }
    }

    /// Stake `declared` on `outcome`.
    ///
    /// `attached` is the amount actually transferred with the call and must
    /// equal `declared`. Checks run in this order: market state, caller
    /// eligibility, the single-stake rule, the transferred amount, and a
    /// non-zero stake.
    pub fn place_stake(
        &mut self,
        caller: &Principal,
        outcome: Outcome,
        declared: Amount,
        attached: Amount,
        gate: &dyn Eligibility,
    ) -> Result<(), MarketError> {
        match self.state {
            MarketState::Open => {}
            MarketState::Stopped => return Err(MarketError::MarketStopped),
            MarketState::Resolved | MarketState::Cancelled => {
                return Err(MarketError::MarketFinished)
            }
        }
        if !gate.is_eligible(caller) {
            debug!(market = %self.id, principal = %caller, "Stake rejected: not eligible");
            return Err(MarketError::NotEligible {
                principal: caller.clone(),
            });
        }
        if self.policy == StakePolicy::Single && !self.book.stake_of(caller).is_zero() {
            return Err(MarketError::AlreadyStaked {
                principal: caller.clone(),
            });
        }
        if declared != attached {
            return Err(MarketError::AmountMismatch { declared, attached });
        }
        if declared.is_zero() {
            return Err(MarketError::ZeroAmount);
        }

        let held = self.held.checked_add(declared)?;
        self.book.record(caller, outcome, declared)?;
        self.held = held;

        info!(
            market = %self.id,
            principal = %caller,
            outcome = %outcome,
            amount = %declared,
            "Stake placed"
        );
        Ok(())
    }

    /// Freeze staking.
    ///
    /// On a market that was resolved straight from `Open`, this latches the
    /// "stopped" flag that payouts require without changing the terminal
    /// state.
    pub fn stop(&mut self) -> Result<(), MarketError> {
        match self.state {
            MarketState::Open => self.state = MarketState::Stopped,
            MarketState::Stopped => return Err(MarketError::MarketStopped),
            MarketState::Resolved if !self.ever_stopped => {}
            MarketState::Resolved | MarketState::Cancelled => {
                return Err(MarketError::MarketFinished)
            }
        }
        self.ever_stopped = true;
        info!(market = %self.id, state = %self.state, "Market stopped");
        Ok(())
    }

    /// Record the authoritative result and earmark the fee.
    pub fn report_result(&mut self, winner: Outcome, loser: Outcome) -> Result<(), MarketError> {
        match self.state {
            MarketState::Resolved => return Err(MarketError::AlreadyResolved),
            MarketState::Cancelled => return Err(MarketError::MarketFinished),
            MarketState::Open | MarketState::Stopped => {}
        }
        if winner == loser {
            return Err(MarketError::SameOutcome);
        }

        let fee = fee_for(self.book.pot(), self.fee_rate)?;
        self.resolution = Some(Resolution { winner, loser, fee });
        self.state = MarketState::Resolved;

        info!(
            market = %self.id,
            winner = %winner,
            pot = %self.book.pot(),
            winning_stake = %self.book.outcome_total(winner),
            fee = %fee,
            "Result reported"
        );
        Ok(())
    }

    /// Release the earmarked fee. Can succeed only once.
    pub fn withdraw_fees(&mut self) -> Result<Amount, MarketError> {
        let fee = match self.resolution {
            Some(resolution) if !self.fee_withdrawn && !resolution.fee.is_zero() => resolution.fee,
            _ => return Err(MarketError::NoFees),
        };
        let held = self.debit(fee)?;

        self.held = held;
        self.fee_withdrawn = true;
        info!(market = %self.id, fee = %fee, "Fees withdrawn");
        Ok(fee)
    }

    /// Pay the caller's pari-mutuel share. Can succeed only once per caller.
    pub fn withdraw_gain(&mut self, caller: &Principal) -> Result<Amount, MarketError> {
        let gain = self.quote_gain(caller)?;
        let held = self.debit(gain)?;
        let paid_out = self.paid_out.checked_add(gain)?;

        self.held = held;
        self.paid_out = paid_out;
        self.gain_claimed.insert(caller.clone());
        info!(market = %self.id, principal = %caller, gain = %gain, "Gain withdrawn");
        Ok(gain)
    }

    /// What [`withdraw_gain`](Self::withdraw_gain) would pay, without paying it.
    pub fn quote_gain(&self, caller: &Principal) -> Result<Amount, MarketError> {
        if !self.ever_stopped {
            return Err(MarketError::NotStopped);
        }
        let resolution = match (self.state, self.resolution) {
            (MarketState::Resolved, Some(resolution)) => resolution,
            _ => return Err(MarketError::NotFinished),
        };
        if self.gain_claimed.contains(caller) {
            return Err(MarketError::AlreadyClaimed {
                principal: caller.clone(),
            });
        }

        let contribution = self
            .book
            .position(caller)
            .map_or(Amount::ZERO, |position| position.on(resolution.winner));
        if contribution.is_zero() {
            return Err(MarketError::NoWinningStake {
                principal: caller.clone(),
            });
        }

        let pool = distributable(self.book.pot(), resolution.fee)?;
        Ok(gain_for(
            pool,
            contribution,
            self.book.outcome_total(resolution.winner),
        )?)
    }

    /// Cancel the event. Resolved markets cannot be cancelled.
    pub fn cancel(&mut self) -> Result<(), MarketError> {
        if self.state.is_terminal() {
            return Err(MarketError::MarketFinished);
        }
        self.state = MarketState::Cancelled;
        info!(market = %self.id, pot = %self.book.pot(), "Market cancelled");
        Ok(())
    }

    /// Refund the caller's full cumulative stake after cancellation.
    pub fn claim_cancelled(&mut self, caller: &Principal) -> Result<Amount, MarketError> {
        if self.state != MarketState::Cancelled {
            return Err(MarketError::NotCancelled);
        }
        let stake = self.book.stake_of(caller);
        if stake.is_zero() || self.cancel_claimed.contains(caller) {
            return Err(MarketError::NothingToClaim {
                principal: caller.clone(),
            });
        }
        let held = self.debit(stake)?;

        self.held = held;
        self.cancel_claimed.insert(caller.clone());
        info!(market = %self.id, principal = %caller, refund = %stake, "Stake refunded");
        Ok(stake)
    }

    /// Sweep everything the market holds. State is left untouched.
    pub fn emergency_withdraw(&mut self) -> Amount {
        let swept = self.held;
        self.held = Amount::ZERO;
        info!(market = %self.id, swept = %swept, state = %self.state, "Emergency withdrawal");
        swept
    }

    fn debit(&self, amount: Amount) -> Result<Amount, MarketError> {
        self.held
            .checked_sub(amount)
            .map_err(|_| MarketError::InsufficientBalance {
                requested: amount,
                held: self.held,
            })
    }

    // -- views --

    #[must_use]
    pub fn id(&self) -> &MarketId {
        &self.id
    }

    #[must_use]
    pub fn policy(&self) -> StakePolicy {
        self.policy
    }

    #[must_use]
    pub fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }

    #[must_use]
    pub fn state(&self) -> MarketState {
        self.state
    }

    /// True once `stop` has succeeded at any point.
    #[must_use]
    pub fn ever_stopped(&self) -> bool {
        self.ever_stopped
    }

    #[must_use]
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    #[must_use]
    pub fn winner(&self) -> Option<Outcome> {
        self.resolution.map(|r| r.winner)
    }

    /// Fee earmarked at resolution, zero before.
    #[must_use]
    pub fn fee(&self) -> Amount {
        self.resolution.map_or(Amount::ZERO, |r| r.fee)
    }

    #[must_use]
    pub fn fee_withdrawn(&self) -> bool {
        self.fee_withdrawn
    }

    #[must_use]
    pub fn total_pot(&self) -> Amount {
        self.book.pot()
    }

    #[must_use]
    pub fn outcome_stake(&self, outcome: Outcome) -> Amount {
        self.book.outcome_total(outcome)
    }

    #[must_use]
    pub fn stake_of(&self, principal: &Principal) -> Amount {
        self.book.stake_of(principal)
    }

    #[must_use]
    pub fn side_of(&self, principal: &Principal) -> Option<Outcome> {
        self.book.side_of(principal)
    }

    #[must_use]
    pub fn position(&self, principal: &Principal) -> Option<&Position> {
        self.book.position(principal)
    }

    /// Funds currently custodied by the market.
    #[must_use]
    pub fn held(&self) -> Amount {
        self.held
    }

    /// Sum of gains already withdrawn.
    #[must_use]
    pub fn paid_out(&self) -> Amount {
        self.paid_out
    }

    #[must_use]
    pub fn has_claimed_gain(&self, principal: &Principal) -> bool {
        self.gain_claimed.contains(principal)
    }

    #[must_use]
    pub fn has_claimed_refund(&self, principal: &Principal) -> bool {
        self.cancel_claimed.contains(principal)
    }

    /// Pot minus fee; zero before resolution.
    pub fn distributable(&self) -> Result<Amount, MarketError> {
        Ok(distributable(self.book.pot(), self.fee())?)
    }

    /// Resolved, last staked on the winner, and holds a positive stake.
    #[must_use]
    pub fn is_winner(&self, principal: &Principal) -> bool {
        match (self.state, self.resolution) {
            (MarketState::Resolved, Some(resolution)) => {
                self.book.side_of(principal) == Some(resolution.winner)
                    && !self.book.stake_of(principal).is_zero()
            }
            _ => false,
        }
    }

    /// Winners in the order they first staked.
    #[must_use]
    pub fn winners(&self) -> Vec<Principal> {
        self.book
            .principals()
            .filter(|principal| self.is_winner(principal))
            .cloned()
            .collect()
    }

    /// Principals in the order they first staked.
    pub fn participants(&self) -> impl Iterator<Item = &Principal> {
        self.book.principals()
    }
}

#[cfg(test)]
mod tests;
