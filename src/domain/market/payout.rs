//! Pari-mutuel payout arithmetic.
//!
//! All functions are pure and exact. Each winner receives
//! `floor(distributable * contribution / winning_stake)`; the floor
//! remainders summed over every winner stay in the market as dust and are
//! always smaller than `winning_stake`.

use crate::domain::error::ArithmeticError;
use crate::domain::money::{Amount, FeeRate};

/// Fee skimmed from the pot at resolution.
pub fn fee_for(pot: Amount, rate: FeeRate) -> Result<Amount, ArithmeticError> {
    rate.fee_on(pot)
}

/// What is left for winners once the fee is taken.
pub fn distributable(pot: Amount, fee: Amount) -> Result<Amount, ArithmeticError> {
    pot.checked_sub(fee)
}

/// A winner's share of the distributable pot.
///
/// `winning_stake == 0` only happens when nobody backed the winner, and
/// then nobody has a contribution either; it is reported as a division by
/// zero rather than a zero payout.
pub fn gain_for(
    distributable: Amount,
    contribution: Amount,
    winning_stake: Amount,
) -> Result<Amount, ArithmeticError> {
    distributable.mul_div_floor(contribution.minor(), winning_stake.minor())
}

/// Dust left after every winner in `contributions` has been paid.
pub fn remainder(
    distributable: Amount,
    contributions: &[Amount],
    winning_stake: Amount,
) -> Result<Amount, ArithmeticError> {
    let mut paid = Amount::ZERO;
    for contribution in contributions {
        paid = paid.checked_add(gain_for(distributable, *contribution, winning_stake)?)?;
    }
    distributable.checked_sub(paid)
}
