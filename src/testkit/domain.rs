//! Builders for domain primitives used across tests.

use crate::domain::{
    Amount, FeeRate, Market, MarketId, Outcome, Principal, StakePolicy, Unrestricted,
};

/// Create a [`Principal`] from a string.
pub fn principal(name: &str) -> Principal {
    Principal::new(name)
}

/// Generate `n` principals named `p0`, `p1`, ..., `p{n-1}`.
pub fn principals(n: usize) -> Vec<Principal> {
    (0..n).map(|i| Principal::new(format!("p{i}"))).collect()
}

/// Amount in minor units.
pub const fn amount(minor: u128) -> Amount {
    Amount::new(minor)
}

/// Open market with the default 2% fee.
pub fn market(policy: StakePolicy) -> Market {
    Market::new(MarketId::new("test-market"), policy, FeeRate::DEFAULT)
}

/// Stake on an unrestricted market, panicking on rejection.
pub fn stake(market: &mut Market, who: &str, outcome: Outcome, minor: u128) {
    let value = Amount::new(minor);
    market
        .place_stake(&Principal::new(who), outcome, value, value, &Unrestricted)
        .unwrap_or_else(|e| panic!("stake by {who} rejected: {e}"));
}
