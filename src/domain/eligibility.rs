//! Who may stake in a market.

use super::id::Principal;
use super::market::Market;

/// Predicate restricting who may stake. Pure lookup, no side effects.
pub trait Eligibility {
    fn is_eligible(&self, principal: &Principal) -> bool;
}

/// Anyone may stake. Used by the free-standing market.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl Eligibility for Unrestricted {
    fn is_eligible(&self, _principal: &Principal) -> bool {
        true
    }
}

/// Eligible iff the principal won the predecessor market.
#[derive(Debug, Clone, Copy)]
pub struct WinnerGate<'a> {
    predecessor: &'a Market,
}

impl<'a> WinnerGate<'a> {
    #[must_use]
    pub const fn new(predecessor: &'a Market) -> Self {
        Self { predecessor }
    }
}

impl Eligibility for WinnerGate<'_> {
    fn is_eligible(&self, principal: &Principal) -> bool {
        self.predecessor.is_winner(principal)
    }
}

impl<F> Eligibility for F
where
    F: Fn(&Principal) -> bool,
{
    fn is_eligible(&self, principal: &Principal) -> bool {
        self(principal)
    }
}
