use super::*;
use crate::domain::eligibility::Unrestricted;

const UNIT: u128 = 100;

// -- Helpers --------------------------------------------------------------

fn p(name: &str) -> Principal {
    Principal::new(name)
}

fn units(n: u128) -> Amount {
    Amount::new(n * UNIT)
}

fn single() -> Market {
    Market::new(MarketId::new("m"), StakePolicy::Single, FeeRate::DEFAULT)
}

fn multi() -> Market {
    Market::new(MarketId::new("m"), StakePolicy::Accumulate, FeeRate::DEFAULT)
}

fn stake(market: &mut Market, who: &str, outcome: Outcome, amount: Amount) {
    market
        .place_stake(&p(who), outcome, amount, amount, &Unrestricted)
        .unwrap();
}

/// Two winners at 1 unit on A, one loser at 2 units on B, stopped and
/// resolved for A.
fn equal_stake_market() -> Market {
    let mut market = single();
    stake(&mut market, "w1", Outcome::A, units(1));
    stake(&mut market, "w2", Outcome::A, units(1));
    stake(&mut market, "l", Outcome::B, units(2));
    market.stop().unwrap();
    market.report_result(Outcome::A, Outcome::B).unwrap();
    market
}

// -- Staking --------------------------------------------------------------

#[test]
fn test_stake_updates_all_views() {
    let mut market = single();
    stake(&mut market, "alice", Outcome::A, units(3));
    stake(&mut market, "bob", Outcome::B, units(1));

    assert_eq!(market.total_pot(), units(4));
    assert_eq!(market.outcome_stake(Outcome::A), units(3));
    assert_eq!(market.outcome_stake(Outcome::B), units(1));
    assert_eq!(market.stake_of(&p("alice")), units(3));
    assert_eq!(market.side_of(&p("bob")), Some(Outcome::B));
    assert_eq!(market.held(), units(4));
    assert_eq!(market.participants().count(), 2);
}

#[test]
fn test_single_policy_rejects_second_stake() {
    let mut market = single();
    stake(&mut market, "alice", Outcome::A, units(5));

    let result = market.place_stake(&p("alice"), Outcome::B, units(5), units(5), &Unrestricted);

    assert_eq!(
        result,
        Err(MarketError::AlreadyStaked {
            principal: p("alice")
        })
    );
    assert_eq!(market.total_pot(), units(5));
}

#[test]
fn test_accumulate_policy_allows_both_sides() {
    let mut market = multi();
    stake(&mut market, "alice", Outcome::A, units(1));
    stake(&mut market, "alice", Outcome::B, units(2));

    assert_eq!(market.stake_of(&p("alice")), units(3));
    assert_eq!(market.side_of(&p("alice")), Some(Outcome::B));
    let position = market.position(&p("alice")).unwrap();
    assert_eq!(position.on(Outcome::A), units(1));
    assert_eq!(position.on(Outcome::B), units(2));
}

#[test]
fn test_mismatch_is_checked_before_zero() {
    let mut market = multi();

    let result = market.place_stake(&p("a"), Outcome::A, Amount::ZERO, units(1), &Unrestricted);
    assert_eq!(
        result,
        Err(MarketError::AmountMismatch {
            declared: Amount::ZERO,
            attached: units(1)
        })
    );

    let result = market.place_stake(&p("a"), Outcome::A, Amount::ZERO, Amount::ZERO, &Unrestricted);
    assert_eq!(result, Err(MarketError::ZeroAmount));
    assert!(market.total_pot().is_zero());
}

#[test]
fn test_ineligible_caller_is_rejected() {
    let mut market = single();
    let nobody = |_: &Principal| false;

    let result = market.place_stake(&p("eve"), Outcome::A, units(5), units(5), &nobody);

    assert_eq!(
        result,
        Err(MarketError::NotEligible { principal: p("eve") })
    );
}

#[test]
fn test_state_is_checked_before_eligibility() {
    let mut market = single();
    market.stop().unwrap();
    let nobody = |_: &Principal| false;

    let result = market.place_stake(&p("eve"), Outcome::A, units(5), units(5), &nobody);

    assert_eq!(result, Err(MarketError::MarketStopped));
}

#[test]
fn test_stake_after_stop_or_terminal_state() {
    let mut stopped = single();
    stopped.stop().unwrap();
    assert_eq!(
        stopped.place_stake(&p("a"), Outcome::A, units(1), units(1), &Unrestricted),
        Err(MarketError::MarketStopped)
    );

    let mut resolved = single();
    resolved.report_result(Outcome::A, Outcome::B).unwrap();
    assert_eq!(
        resolved.place_stake(&p("a"), Outcome::A, units(1), units(1), &Unrestricted),
        Err(MarketError::MarketFinished)
    );

    let mut cancelled = single();
    cancelled.cancel().unwrap();
    assert_eq!(
        cancelled.place_stake(&p("a"), Outcome::A, units(1), units(1), &Unrestricted),
        Err(MarketError::MarketFinished)
    );
}

// -- Lifecycle ------------------------------------------------------------

#[test]
fn test_stop_twice_fails() {
    let mut market = single();
    market.stop().unwrap();
    assert_eq!(market.stop(), Err(MarketError::MarketStopped));
}

#[test]
fn test_stop_after_resolution_latches_flag_once() {
    let mut market = single();
    stake(&mut market, "a", Outcome::A, units(1));
    market.report_result(Outcome::A, Outcome::B).unwrap();
    assert!(!market.ever_stopped());

    market.stop().unwrap();

    assert!(market.ever_stopped());
    assert_eq!(market.state(), MarketState::Resolved);
    assert_eq!(market.stop(), Err(MarketError::MarketFinished));
}

#[test]
fn test_report_result_rules() {
    let mut market = single();
    assert_eq!(
        market.report_result(Outcome::A, Outcome::A),
        Err(MarketError::SameOutcome)
    );
    market.report_result(Outcome::B, Outcome::A).unwrap();
    assert_eq!(market.winner(), Some(Outcome::B));
    assert_eq!(
        market.report_result(Outcome::A, Outcome::B),
        Err(MarketError::AlreadyResolved)
    );

    let mut cancelled = single();
    cancelled.cancel().unwrap();
    assert_eq!(
        cancelled.report_result(Outcome::A, Outcome::B),
        Err(MarketError::MarketFinished)
    );
}

#[test]
fn test_cancel_is_rejected_once_terminal() {
    let mut resolved = single();
    resolved.report_result(Outcome::A, Outcome::B).unwrap();
    assert_eq!(resolved.cancel(), Err(MarketError::MarketFinished));

    let mut cancelled = single();
    cancelled.stop().unwrap();
    cancelled.cancel().unwrap();
    assert_eq!(cancelled.cancel(), Err(MarketError::MarketFinished));
}

// -- Payouts --------------------------------------------------------------

#[test]
fn test_equal_stake_scenario() {
    let mut market = equal_stake_market();

    assert_eq!(market.fee(), Amount::new(8));
    assert_eq!(market.distributable(), Ok(Amount::new(392)));
    assert_eq!(market.withdraw_gain(&p("w1")), Ok(Amount::new(196)));
    assert_eq!(market.withdraw_gain(&p("w2")), Ok(Amount::new(196)));
    assert_eq!(
        market.withdraw_gain(&p("l")),
        Err(MarketError::NoWinningStake { principal: p("l") })
    );
    assert_eq!(market.held(), Amount::new(8));
}

#[test]
fn test_all_winning_side_scenario() {
    let mut market = single();
    stake(&mut market, "a", Outcome::A, units(1));
    stake(&mut market, "b", Outcome::A, units(1));
    market.stop().unwrap();
    market.report_result(Outcome::A, Outcome::B).unwrap();

    assert_eq!(market.withdraw_gain(&p("a")), Ok(Amount::new(98)));
    assert_eq!(market.withdraw_gain(&p("b")), Ok(Amount::new(98)));
}

#[test]
fn test_payout_requires_stop_then_resolution() {
    let mut market = single();
    stake(&mut market, "a", Outcome::A, units(1));
    market.report_result(Outcome::A, Outcome::B).unwrap();
    assert_eq!(market.withdraw_gain(&p("a")), Err(MarketError::NotStopped));

    let mut open_stopped = single();
    stake(&mut open_stopped, "a", Outcome::A, units(1));
    open_stopped.stop().unwrap();
    assert_eq!(
        open_stopped.withdraw_gain(&p("a")),
        Err(MarketError::NotFinished)
    );

    market.stop().unwrap();
    assert_eq!(market.withdraw_gain(&p("a")), Ok(Amount::new(98)));
}

#[test]
fn test_gain_claimed_only_once() {
    let mut market = equal_stake_market();
    market.withdraw_gain(&p("w1")).unwrap();

    assert_eq!(
        market.withdraw_gain(&p("w1")),
        Err(MarketError::AlreadyClaimed { principal: p("w1") })
    );
    assert!(market.has_claimed_gain(&p("w1")));
    assert_eq!(market.paid_out(), Amount::new(196));
}

#[test]
fn test_quote_matches_withdrawal_without_mutating() {
    let mut market = equal_stake_market();
    let quote = market.quote_gain(&p("w1")).unwrap();

    assert_eq!(market.held(), units(4));
    assert_eq!(market.withdraw_gain(&p("w1")), Ok(quote));
}

#[test]
fn test_multi_stake_only_pays_winning_bucket() {
    // 1000 on A and 1000 on B from one account, 1 on A from another.
    let mut market = multi();
    stake(&mut market, "whale", Outcome::A, units(1000));
    stake(&mut market, "whale", Outcome::B, units(1000));
    stake(&mut market, "minnow", Outcome::A, units(1));
    market.stop().unwrap();
    market.report_result(Outcome::B, Outcome::A).unwrap();

    assert_eq!(market.withdraw_gain(&p("whale")), Ok(Amount::new(196_098)));
    assert_eq!(
        market.withdraw_gain(&p("minnow")),
        Err(MarketError::NoWinningStake {
            principal: p("minnow")
        })
    );
}

#[test]
fn test_hedged_stake_still_earns_on_winner_when_last_side_lost() {
    let mut market = multi();
    stake(&mut market, "a", Outcome::A, units(3));
    stake(&mut market, "a", Outcome::B, units(1));
    stake(&mut market, "b", Outcome::B, units(2));
    market.stop().unwrap();
    market.report_result(Outcome::A, Outcome::B).unwrap();

    // Pot 6, fee 0.12, all 5.88 goes to the only A bucket.
    assert!(!market.is_winner(&p("a")));
    assert_eq!(market.withdraw_gain(&p("a")), Ok(Amount::new(588)));
}

#[test]
fn test_zero_stake_winner_is_unclaimable_but_recoverable() {
    let mut market = single();
    stake(&mut market, "a", Outcome::A, units(2));
    market.stop().unwrap();
    market.report_result(Outcome::B, Outcome::A).unwrap();

    assert!(market.winners().is_empty());
    assert_eq!(
        market.withdraw_gain(&p("a")),
        Err(MarketError::NoWinningStake { principal: p("a") })
    );
    assert_eq!(market.withdraw_fees(), Ok(Amount::new(4)));
    assert_eq!(market.emergency_withdraw(), Amount::new(196));
}

#[test]
fn test_payouts_plus_fee_plus_dust_equal_pot() {
    let mut market = single();
    for (who, minor) in [("a", 7), ("b", 11), ("c", 13)] {
        stake(&mut market, who, Outcome::A, Amount::new(minor));
    }
    stake(&mut market, "d", Outcome::B, Amount::new(1_009));
    market.stop().unwrap();
    market.report_result(Outcome::A, Outcome::B).unwrap();

    let mut paid = 0u128;
    for who in market.winners() {
        paid += market.withdraw_gain(&who).unwrap().minor();
    }
    let fee = market.withdraw_fees().unwrap();
    let dust = market.held();

    assert_eq!(paid + fee.minor() + dust.minor(), market.total_pot().minor());
    assert!(dust < market.outcome_stake(Outcome::A));
}

// -- Fees -----------------------------------------------------------------

#[test]
fn test_fees_unavailable_before_result() {
    let mut market = single();
    stake(&mut market, "a", Outcome::A, units(1));
    assert_eq!(market.withdraw_fees(), Err(MarketError::NoFees));
}

#[test]
fn test_fees_withdrawn_once() {
    let mut market = equal_stake_market();
    assert_eq!(market.withdraw_fees(), Ok(Amount::new(8)));
    assert!(market.fee_withdrawn());
    assert_eq!(market.withdraw_fees(), Err(MarketError::NoFees));
}

#[test]
fn test_zero_fee_is_not_withdrawable() {
    let mut market = Market::new(MarketId::new("m"), StakePolicy::Single, FeeRate::ZERO);
    stake(&mut market, "a", Outcome::A, units(1));
    market.report_result(Outcome::A, Outcome::B).unwrap();
    assert_eq!(market.withdraw_fees(), Err(MarketError::NoFees));
}

// -- Cancellation ---------------------------------------------------------

#[test]
fn test_cancelled_market_refunds_cumulative_stake_once() {
    let mut market = multi();
    stake(&mut market, "a", Outcome::A, units(1));
    stake(&mut market, "a", Outcome::B, units(2));
    market.cancel().unwrap();

    assert_eq!(market.claim_cancelled(&p("a")), Ok(units(3)));
    assert_eq!(
        market.claim_cancelled(&p("a")),
        Err(MarketError::NothingToClaim { principal: p("a") })
    );
    assert_eq!(
        market.claim_cancelled(&p("stranger")),
        Err(MarketError::NothingToClaim {
            principal: p("stranger")
        })
    );
    assert!(market.held().is_zero());
}

#[test]
fn test_refund_requires_cancellation() {
    let mut market = equal_stake_market();
    assert_eq!(
        market.claim_cancelled(&p("w1")),
        Err(MarketError::NotCancelled)
    );
}

#[test]
fn test_cancelled_market_pays_no_gain() {
    let mut market = single();
    stake(&mut market, "a", Outcome::A, units(1));
    market.stop().unwrap();
    market.cancel().unwrap();

    assert_eq!(market.withdraw_gain(&p("a")), Err(MarketError::NotFinished));
}

// -- Emergency ------------------------------------------------------------

#[test]
fn test_emergency_withdraw_sweeps_without_changing_state() {
    let mut market = equal_stake_market();
    assert_eq!(market.emergency_withdraw(), units(4));
    assert_eq!(market.state(), MarketState::Resolved);
    assert!(market.held().is_zero());

    assert_eq!(
        market.withdraw_gain(&p("w1")),
        Err(MarketError::InsufficientBalance {
            requested: Amount::new(196),
            held: Amount::ZERO
        })
    );
    assert!(!market.has_claimed_gain(&p("w1")));
    assert_eq!(market.emergency_withdraw(), Amount::ZERO);
}

// -- Winner predicate -----------------------------------------------------

#[test]
fn test_winners_listed_in_first_stake_order() {
    let mut market = single();
    stake(&mut market, "c", Outcome::A, units(1));
    stake(&mut market, "x", Outcome::B, units(1));
    stake(&mut market, "a", Outcome::A, units(1));
    assert!(market.winners().is_empty());

    market.report_result(Outcome::A, Outcome::B).unwrap();

    assert_eq!(market.winners(), vec![p("c"), p("a")]);
    assert!(market.is_winner(&p("c")));
    assert!(!market.is_winner(&p("x")));
    assert!(!market.is_winner(&p("nobody")));
}
