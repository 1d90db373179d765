//! Registration roster port.

use crate::domain::{Eligibility, Principal};

/// Read side of the registration ledger that feeds the first round.
pub trait Roster: Send + Sync {
    fn is_registered(&self, principal: &Principal) -> bool;

    fn registration_count(&self) -> usize;
}

/// Eligibility gate backed by a roster: registered principals may stake.
pub struct RosterGate<'a, R: Roster + ?Sized> {
    roster: &'a R,
}

impl<'a, R: Roster + ?Sized> RosterGate<'a, R> {
    pub fn new(roster: &'a R) -> Self {
        Self { roster }
    }
}

impl<R: Roster + ?Sized> Eligibility for RosterGate<'_, R> {
    fn is_eligible(&self, principal: &Principal) -> bool {
        self.roster.is_registered(principal)
    }
}
