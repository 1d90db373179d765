//! Stake bookkeeping for a single market.
//!
//! [`StakeBook`] is the account-keyed mapping from principal to stake. It
//! keeps per-outcome buckets for each principal so that someone who backed
//! both sides only earns on the portion that was placed on the winner, and
//! it remembers the order in which principals first staked, which is the
//! order the tie-break draws from.

use std::collections::HashMap;

use super::error::ArithmeticError;
use super::id::Principal;
use super::money::Amount;
use super::outcome::Outcome;

/// One principal's stake in a market.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    per_outcome: [Amount; 2],
    total: Amount,
    side: Option<Outcome>,
}

impl Position {
    /// Amount staked on `outcome`.
    #[must_use]
    pub fn on(&self, outcome: Outcome) -> Amount {
        self.per_outcome[outcome.index()]
    }

    /// Cumulative amount staked across both outcomes.
    #[must_use]
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Outcome of the most recent stake.
    #[must_use]
    pub fn side(&self) -> Option<Outcome> {
        self.side
    }
}

/// Stake ledger: per-outcome totals plus per-principal positions.
#[derive(Debug, Clone, Default)]
pub struct StakeBook {
    positions: HashMap<Principal, Position>,
    order: Vec<Principal>,
    outcome_totals: [Amount; 2],
    pot: Amount,
}

impl StakeBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `amount` from `principal` on `outcome`.
    ///
    /// All sums are computed before anything is written, so an overflow
    /// leaves the book untouched.
    pub fn record(
        &mut self,
        principal: &Principal,
        outcome: Outcome,
        amount: Amount,
    ) -> Result<(), ArithmeticError> {
        let current = self.positions.get(principal).cloned().unwrap_or_default();

        let bucket = current.on(outcome).checked_add(amount)?;
        let total = current.total.checked_add(amount)?;
        let outcome_total = self.outcome_totals[outcome.index()].checked_add(amount)?;
        let pot = self.pot.checked_add(amount)?;

        let mut next = current;
        next.per_outcome[outcome.index()] = bucket;
        next.total = total;
        next.side = Some(outcome);

        if !self.positions.contains_key(principal) {
            self.order.push(principal.clone());
        }
        self.positions.insert(principal.clone(), next);
        self.outcome_totals[outcome.index()] = outcome_total;
        self.pot = pot;
        Ok(())
    }

    #[must_use]
    pub fn position(&self, principal: &Principal) -> Option<&Position> {
        self.positions.get(principal)
    }

    /// Cumulative stake of `principal`, zero if they never staked.
    #[must_use]
    pub fn stake_of(&self, principal: &Principal) -> Amount {
        self.positions
            .get(principal)
            .map_or(Amount::ZERO, Position::total)
    }

    #[must_use]
    pub fn side_of(&self, principal: &Principal) -> Option<Outcome> {
        self.positions.get(principal).and_then(Position::side)
    }

    /// Total staked on `outcome`.
    #[must_use]
    pub fn outcome_total(&self, outcome: Outcome) -> Amount {
        self.outcome_totals[outcome.index()]
    }

    /// Total staked on both outcomes.
    #[must_use]
    pub fn pot(&self) -> Amount {
        self.pot
    }

    /// Principals in the order they first staked.
    pub fn principals(&self) -> impl Iterator<Item = &Principal> {
        self.order.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
