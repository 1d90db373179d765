//! Custodial prize fund paid out equally to a finalized winner list.
//!
//! The per-head share is `fund / winners` computed when the first claim
//! happens and frozen from then on, so a winner's receipt does not depend on
//! who claimed first or whether they were swept by [`PrizePool::claim_all`].

use std::collections::HashSet;

use tracing::info;

use super::error::{ArithmeticError, PrizePoolError};
use super::id::Principal;
use super::money::Amount;

#[derive(Debug, Clone, Default)]
pub struct PrizePool {
    fund: Amount,
    received: Amount,
    winners: Option<Vec<Principal>>,
    claimed: HashSet<Principal>,
    share: Option<Amount>,
}

impl PrizePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take custody of `amount`.
    pub fn deposit(&mut self, source: &str, amount: Amount) -> Result<(), PrizePoolError> {
        let fund = self.fund.checked_add(amount)?;
        let received = self.received.checked_add(amount)?;
        self.fund = fund;
        self.received = received;
        info!(source, amount = %amount, fund = %fund, "Prize pool funded");
        Ok(())
    }

    /// Finalize the payee list. Duplicates are collapsed, first one wins.
    pub fn set_winners(&mut self, winners: Vec<Principal>) -> Result<(), PrizePoolError> {
        if self.winners.is_some() {
            return Err(PrizePoolError::WinnersAlreadySet);
        }
        let mut seen = HashSet::new();
        let unique: Vec<Principal> = winners
            .into_iter()
            .filter(|winner| seen.insert(winner.clone()))
            .collect();
        if unique.is_empty() {
            return Err(PrizePoolError::EmptyWinners);
        }

        info!(winners = unique.len(), fund = %self.fund, "Prize pool winners set");
        self.winners = Some(unique);
        Ok(())
    }

    /// Pay the caller's share.
    pub fn claim_own(&mut self, caller: &Principal) -> Result<Amount, PrizePoolError> {
        if !self.is_winner(caller) || self.claimed.contains(caller) {
            return Err(PrizePoolError::NotAWinner {
                principal: caller.clone(),
            });
        }
        let share = self.current_share()?;
        let fund = self.debit(share)?;

        self.share = Some(share);
        self.fund = fund;
        self.claimed.insert(caller.clone());
        info!(principal = %caller, amount = %share, "Prize claimed");
        Ok(share)
    }

    /// Pay every winner who has not claimed yet.
    ///
    /// Returns the transfers made, in winner-list order.
    pub fn claim_all(&mut self) -> Result<Vec<(Principal, Amount)>, PrizePoolError> {
        let share = self.current_share()?;
        let pending: Vec<Principal> = self
            .winners
            .iter()
            .flatten()
            .filter(|winner| !self.claimed.contains(*winner))
            .cloned()
            .collect();
        let count = u128::try_from(pending.len()).map_err(|_| ArithmeticError::Overflow)?;
        let total = share.checked_mul(count)?;
        let fund = self.debit(total)?;

        self.share = Some(share);
        self.fund = fund;
        let transfers: Vec<(Principal, Amount)> = pending
            .into_iter()
            .map(|winner| {
                self.claimed.insert(winner.clone());
                (winner, share)
            })
            .collect();
        info!(paid = transfers.len(), share = %share, total = %total, "Prize pool swept");
        Ok(transfers)
    }

    /// Per-head share: frozen after the first claim, otherwise what the
    /// current fund would give.
    pub fn current_share(&self) -> Result<Amount, PrizePoolError> {
        if let Some(share) = self.share {
            return Ok(share);
        }
        let winners = self.winners.as_ref().ok_or(PrizePoolError::WinnersNotSet)?;
        let count = u128::try_from(winners.len()).map_err(|_| ArithmeticError::Overflow)?;
        Ok(self.fund.mul_div_floor(1, count)?)
    }

    /// Funds that no winner will receive: floor-division dust plus anything
    /// deposited after the share was frozen.
    pub fn residual(&self) -> Result<Amount, PrizePoolError> {
        let Some(winners) = self.winners.as_ref() else {
            return Ok(self.fund);
        };
        let share = self.current_share()?;
        let unclaimed = winners
            .iter()
            .filter(|winner| !self.claimed.contains(*winner))
            .count();
        let owed = share.checked_mul(unclaimed as u128)?;
        Ok(self.fund.checked_sub(owed).unwrap_or(Amount::ZERO))
    }

    fn debit(&self, amount: Amount) -> Result<Amount, PrizePoolError> {
        self.fund
            .checked_sub(amount)
            .map_err(|_| PrizePoolError::InsufficientBalance {
                requested: amount,
                held: self.fund,
            })
    }

    #[must_use]
    pub fn is_winner(&self, principal: &Principal) -> bool {
        self.winners
            .as_ref()
            .is_some_and(|winners| winners.contains(principal))
    }

    #[must_use]
    pub fn has_claimed(&self, principal: &Principal) -> bool {
        self.claimed.contains(principal)
    }

    #[must_use]
    pub fn winners(&self) -> &[Principal] {
        self.winners.as_deref().unwrap_or(&[])
    }

    /// Funds currently custodied.
    #[must_use]
    pub fn fund(&self) -> Amount {
        self.fund
    }

    /// Everything ever deposited.
    #[must_use]
    pub fn received(&self) -> Amount {
        self.received
    }

    #[must_use]
    pub fn frozen_share(&self) -> Option<Amount> {
        self.share
    }
}
