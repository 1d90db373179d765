//! In-memory treasury.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use crate::domain::Amount;
use crate::error::Result;
use crate::port::Treasury;

/// One deposit into the treasury.
#[derive(Debug, Clone, Serialize)]
pub struct TreasuryEntry {
    pub source: String,
    pub amount: Amount,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Ledger {
    entries: Vec<TreasuryEntry>,
    balance: Amount,
}

/// Treasury that keeps every deposit in memory.
#[derive(Debug, Default)]
pub struct TreasuryVault {
    ledger: RwLock<Ledger>,
}

impl TreasuryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposits in arrival order.
    pub fn entries(&self) -> Vec<TreasuryEntry> {
        self.ledger.read().entries.clone()
    }
}

impl Treasury for TreasuryVault {
    fn deposit(&self, source: &str, amount: Amount) -> Result<()> {
        let mut ledger = self.ledger.write();
        ledger.balance = ledger.balance.checked_add(amount)?;
        ledger.entries.push(TreasuryEntry {
            source: source.to_string(),
            amount,
            received_at: Utc::now(),
        });
        info!(source, amount = %amount, balance = %ledger.balance, "Treasury deposit");
        Ok(())
    }

    fn balance(&self) -> Amount {
        self.ledger.read().balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn deposits_accumulate_in_order() {
        let vault = TreasuryVault::new();
        vault.deposit("fees", Amount::new(8)).unwrap();
        vault.deposit("registration", Amount::new(10)).unwrap();

        assert_eq!(vault.balance(), Amount::new(18));
        let sources: Vec<_> = vault.entries().into_iter().map(|e| e.source).collect();
        assert_eq!(sources, vec!["fees", "registration"]);
    }

    #[test]
    fn overflow_is_rejected_without_recording() {
        let vault = TreasuryVault::new();
        vault.deposit("a", Amount::new(u128::MAX)).unwrap();

        let result = vault.deposit("b", Amount::new(1));

        assert!(matches!(result, Err(Error::Arithmetic(_))));
        assert_eq!(vault.entries().len(), 1);
    }
}
