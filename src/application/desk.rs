//! Standalone market service.
//!
//! A single open-admission market that lets a principal stake repeatedly.
//! Fees and emergency sweeps go straight to the treasury.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::domain::{
    Amount, FeeRate, Market, MarketId, Operation, Outcome, Principal, StakePolicy, Unrestricted,
};
use crate::error::Result;
use crate::port::{Authority, Treasury};

pub struct MarketDesk {
    market: Mutex<Market>,
    authority: Arc<dyn Authority>,
    treasury: Arc<dyn Treasury>,
}

impl MarketDesk {
    pub fn new(
        id: MarketId,
        fee_rate: FeeRate,
        authority: Arc<dyn Authority>,
        treasury: Arc<dyn Treasury>,
    ) -> Self {
        info!(market = %id, fee = %fee_rate, "Market desk opened");
        Self {
            market: Mutex::new(Market::new(id, StakePolicy::Accumulate, fee_rate)),
            authority,
            treasury,
        }
    }

    fn transact<T>(&self, f: impl FnOnce(&mut Market) -> Result<T>) -> Result<T> {
        let mut guard = self.market.lock();
        let mut next = guard.clone();
        let out = f(&mut next)?;
        *guard = next;
        Ok(out)
    }

    fn authorize(&self, caller: &Principal, operation: Operation) -> Result<()> {
        self.authority.authorize(caller, operation).map_err(|e| {
            warn!(principal = %caller, operation = %operation, "Unauthorized call");
            e.into()
        })
    }

    pub fn place_stake(
        &self,
        caller: &Principal,
        outcome: Outcome,
        declared: Amount,
        attached: Amount,
    ) -> Result<()> {
        self.transact(|market| {
            Ok(market.place_stake(caller, outcome, declared, attached, &Unrestricted)?)
        })
    }

    pub fn stop(&self, caller: &Principal) -> Result<()> {
        self.authorize(caller, Operation::StopMarket)?;
        self.transact(|market| Ok(market.stop()?))
    }

    pub fn report_result(&self, caller: &Principal, winner: Outcome, loser: Outcome) -> Result<()> {
        self.authorize(caller, Operation::ReportResult)?;
        self.transact(|market| Ok(market.report_result(winner, loser)?))
    }

    pub fn cancel(&self, caller: &Principal) -> Result<()> {
        self.authorize(caller, Operation::CancelMarket)?;
        self.transact(|market| Ok(market.cancel()?))
    }

    pub fn withdraw_gain(&self, caller: &Principal) -> Result<Amount> {
        self.transact(|market| Ok(market.withdraw_gain(caller)?))
    }

    pub fn claim_cancelled(&self, caller: &Principal) -> Result<Amount> {
        self.transact(|market| Ok(market.claim_cancelled(caller)?))
    }

    /// Send the earmarked fee to the treasury.
    pub fn withdraw_fees(&self, caller: &Principal) -> Result<Amount> {
        self.authorize(caller, Operation::WithdrawFees)?;
        self.transact(|market| {
            let fee = market.withdraw_fees()?;
            let source = format!("{} fees", market.id());
            self.treasury.deposit(&source, fee)?;
            Ok(fee)
        })
    }

    /// Sweep the whole balance to the treasury.
    pub fn emergency_withdraw(&self, caller: &Principal) -> Result<Amount> {
        self.authorize(caller, Operation::EmergencyWithdraw)?;
        self.transact(|market| {
            let swept = market.emergency_withdraw();
            if !swept.is_zero() {
                let source = format!("{} emergency", market.id());
                self.treasury.deposit(&source, swept)?;
            }
            Ok(swept)
        })
    }

    pub fn quote_gain(&self, caller: &Principal) -> Result<Amount> {
        Ok(self.market.lock().quote_gain(caller)?)
    }

    #[must_use]
    pub fn snapshot(&self) -> Market {
        self.market.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::{RoleTable, TreasuryVault};
    use crate::domain::{MarketError, MarketState};
    use crate::error::Error;

    fn p(name: &str) -> Principal {
        Principal::new(name)
    }

    fn desk() -> (MarketDesk, Arc<TreasuryVault>) {
        let roles = Arc::new(RoleTable::from_assignments(Some("owner"), ["admin"], ["oracle"]));
        let treasury = Arc::new(TreasuryVault::new());
        let desk = MarketDesk::new(
            MarketId::new("derby"),
            FeeRate::DEFAULT,
            roles,
            treasury.clone(),
        );
        (desk, treasury)
    }

    #[test]
    fn repeated_stakes_accumulate() {
        let (desk, _) = desk();
        let amount = Amount::new(100);
        desk.place_stake(&p("alice"), Outcome::A, amount, amount).unwrap();
        desk.place_stake(&p("alice"), Outcome::A, amount, amount).unwrap();

        assert_eq!(desk.snapshot().stake_of(&p("alice")), Amount::new(200));
    }

    #[test]
    fn fees_are_sent_to_treasury() {
        let (desk, treasury) = desk();
        let amount = Amount::new(100);
        desk.place_stake(&p("alice"), Outcome::A, amount, amount).unwrap();
        desk.place_stake(&p("bob"), Outcome::B, amount, amount).unwrap();
        desk.stop(&p("admin")).unwrap();
        desk.report_result(&p("oracle"), Outcome::A, Outcome::B).unwrap();

        assert_eq!(desk.quote_gain(&p("alice")).unwrap(), Amount::new(196));
        assert_eq!(desk.withdraw_fees(&p("owner")).unwrap(), Amount::new(4));
        assert_eq!(treasury.balance(), Amount::new(4));
        assert_eq!(desk.withdraw_gain(&p("alice")).unwrap(), Amount::new(196));
        assert!(desk.snapshot().held().is_zero());
    }

    #[test]
    fn refused_operation_changes_nothing() {
        let (desk, _) = desk();
        let result = desk.cancel(&p("alice"));

        assert!(matches!(result, Err(Error::Authorization(_))));
        assert_eq!(desk.snapshot().state(), MarketState::Open);
    }

    #[test]
    fn cancelled_market_refunds() {
        let (desk, _) = desk();
        let amount = Amount::new(70);
        desk.place_stake(&p("alice"), Outcome::B, amount, amount).unwrap();
        desk.cancel(&p("admin")).unwrap();

        assert_eq!(desk.claim_cancelled(&p("alice")).unwrap(), amount);
        assert!(matches!(
            desk.claim_cancelled(&p("alice")),
            Err(Error::Market(MarketError::NothingToClaim { .. }))
        ));
    }
}
