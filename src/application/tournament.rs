//! Elimination tournament service.
//!
//! Ties together registration, the round chain, the final vote, the
//! tie-break and the prize pool. All state sits behind one mutex so calls
//! are strictly serialized, and every mutating call runs against a copy of
//! the state that is committed only when the whole call succeeds.
//!
//! Fund routing:
//! - registration treasury cut and emergency sweeps go to the treasury;
//! - round fees and forwarded registration funds go to the prize pool.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use super::chain::RoundChain;
use crate::domain::{
    Amount, Ballot, Decision, DrawState, EntrySplit, FeeRate, FinalVote, Market, MarketState,
    Operation, Outcome, Principal, PrizePool, Registration, RequestId, TieBreak, WinnerGate,
};
use crate::error::{Result, TournamentError};
use crate::port::{Authority, Fulfillment, RandomnessSource, Treasury};

/// Static parameters of a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSettings {
    pub rounds: usize,
    pub fee_rate: FeeRate,
    pub entry_fee: Amount,
    pub treasury_cut: FeeRate,
    pub values_per_request: u32,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            rounds: 5,
            fee_rate: FeeRate::DEFAULT,
            entry_fee: Amount::new(100),
            treasury_cut: FeeRate::from_bps(1_000).unwrap_or(FeeRate::ZERO),
            values_per_request: 1,
        }
    }
}

#[derive(Debug, Clone)]
struct TournamentState {
    registration: Registration,
    chain: RoundChain,
    vote: FinalVote,
    tie_break: TieBreak,
    prize_pool: PrizePool,
}

/// Multi-round tournament with a final vote and prize pool.
pub struct Tournament {
    state: Mutex<TournamentState>,
    authority: Arc<dyn Authority>,
    treasury: Arc<dyn Treasury>,
    randomness: Arc<dyn RandomnessSource>,
    values_per_request: u32,
}

impl Tournament {
    pub fn new(
        settings: TournamentSettings,
        authority: Arc<dyn Authority>,
        treasury: Arc<dyn Treasury>,
        randomness: Arc<dyn RandomnessSource>,
    ) -> Result<Self> {
        let state = TournamentState {
            registration: Registration::new(settings.entry_fee, settings.treasury_cut),
            chain: RoundChain::new(settings.rounds, settings.fee_rate)?,
            vote: FinalVote::new(),
            tie_break: TieBreak::new(),
            prize_pool: PrizePool::new(),
        };
        info!(
            rounds = settings.rounds,
            fee = %settings.fee_rate,
            entry_fee = %settings.entry_fee,
            "Tournament created"
        );
        Ok(Self {
            state: Mutex::new(state),
            authority,
            treasury,
            randomness,
            values_per_request: settings.values_per_request,
        })
    }

    /// Run `f` against a copy of the state and commit it only on success.
    ///
    /// External transfers must be the last fallible step inside `f`. The
    /// copy covers every roster and stake book, so each call is O(players).
    fn transact<T>(&self, f: impl FnOnce(&mut TournamentState) -> Result<T>) -> Result<T> {
        let mut guard = self.state.lock();
        let mut next = guard.clone();
        let out = f(&mut next)?;
        *guard = next;
        Ok(out)
    }

    fn read<T>(&self, f: impl FnOnce(&TournamentState) -> T) -> T {
        f(&*self.state.lock())
    }

    fn authorize(&self, caller: &Principal, operation: Operation) -> Result<()> {
        self.authority.authorize(caller, operation).map_err(|e| {
            warn!(principal = %caller, operation = %operation, "Unauthorized call");
            e.into()
        })
    }

    // -- Registration -----------------------------------------------------

    /// Register `caller`, who attached `attached`.
    pub fn register(&self, caller: &Principal, attached: Amount) -> Result<EntrySplit> {
        self.transact(|state| {
            let split = state.registration.register(caller, attached)?;
            if !split.treasury.is_zero() {
                self.treasury.deposit("registration", split.treasury)?;
            }
            Ok(split)
        })
    }

    pub fn close_registration(&self, caller: &Principal) -> Result<()> {
        self.authorize(caller, Operation::CloseRegistration)?;
        self.transact(|state| Ok(state.registration.close()?))
    }

    /// Move the held registration balance into the prize pool.
    pub fn forward_registrations(&self, caller: &Principal) -> Result<Amount> {
        self.authorize(caller, Operation::ForwardRegistrations)?;
        self.transact(|state| {
            let amount = state.registration.forward()?;
            state.prize_pool.deposit("registration", amount)?;
            Ok(amount)
        })
    }

    // -- Rounds -----------------------------------------------------------

    pub fn place_stake(
        &self,
        round: usize,
        caller: &Principal,
        outcome: Outcome,
        declared: Amount,
        attached: Amount,
    ) -> Result<()> {
        self.transact(|state| {
            state.chain.place_stake(
                round,
                caller,
                outcome,
                declared,
                attached,
                &state.registration,
            )
        })
    }

    pub fn stop_round(&self, caller: &Principal, round: usize) -> Result<()> {
        self.authorize(caller, Operation::StopMarket)?;
        self.transact(|state| state.chain.stop(round))
    }

    pub fn report_result(
        &self,
        caller: &Principal,
        round: usize,
        winner: Outcome,
        loser: Outcome,
    ) -> Result<()> {
        self.authorize(caller, Operation::ReportResult)?;
        self.transact(|state| state.chain.report_result(round, winner, loser))
    }

    pub fn cancel_round(&self, caller: &Principal, round: usize) -> Result<()> {
        self.authorize(caller, Operation::CancelMarket)?;
        self.transact(|state| state.chain.cancel(round))
    }

    pub fn withdraw_gain(&self, caller: &Principal, round: usize) -> Result<Amount> {
        self.transact(|state| state.chain.withdraw_gain(round, caller))
    }

    pub fn claim_cancelled(&self, caller: &Principal, round: usize) -> Result<Amount> {
        self.transact(|state| state.chain.claim_cancelled(round, caller))
    }

    /// Move a round's earmarked fee into the prize pool.
    pub fn withdraw_round_fees(&self, caller: &Principal, round: usize) -> Result<Amount> {
        self.authorize(caller, Operation::WithdrawFees)?;
        self.transact(|state| {
            let fee = state.chain.withdraw_fees(round)?;
            let source = format!("round-{round} fees");
            state.prize_pool.deposit(&source, fee)?;
            Ok(fee)
        })
    }

    /// Sweep everything a round holds to the treasury.
    pub fn emergency_withdraw(&self, caller: &Principal, round: usize) -> Result<Amount> {
        self.authorize(caller, Operation::EmergencyWithdraw)?;
        self.transact(|state| {
            let swept = state.chain.emergency_withdraw(round)?;
            if !swept.is_zero() {
                let source = format!("round-{round} emergency");
                self.treasury.deposit(&source, swept)?;
            }
            Ok(swept)
        })
    }

    // -- Final vote -------------------------------------------------------

    /// Cast a ballot. Only winners of the terminal round may vote.
    pub fn vote(&self, caller: &Principal, ballot: Ballot) -> Result<i64> {
        self.transact(|state| {
            let winners = WinnerGate::new(state.chain.terminal());
            Ok(state.vote.vote(caller, ballot, &winners)?)
        })
    }

    /// Close the ballot. The terminal round must have resolved.
    pub fn stop_vote(&self, caller: &Principal) -> Result<()> {
        self.authorize(caller, Operation::StopVote)?;
        self.transact(|state| {
            ensure_terminal_resolved(state)?;
            Ok(state.vote.stop()?)
        })
    }

    pub fn result_vote(&self, caller: &Principal) -> Result<Decision> {
        self.authorize(caller, Operation::ResultVote)?;
        self.transact(|state| {
            ensure_terminal_resolved(state)?;
            Ok(state.vote.finalize()?)
        })
    }

    /// The finalized decision.
    pub fn final_decision(&self) -> Result<Decision> {
        self.read(|state| Ok(state.vote.decision()?))
    }

    // -- Tie-break --------------------------------------------------------

    /// Ask the randomness source for a draw among the terminal winners.
    pub fn request_draw(&self, caller: &Principal) -> Result<RequestId> {
        self.authorize(caller, Operation::RequestDraw)?;
        self.transact(|state| {
            let decision = state.vote.decision()?;
            let survivors = state.chain.terminal().winners();
            state.tie_break.ensure_can_request(decision, &survivors)?;
            let request = self.randomness.request_random(self.values_per_request)?;
            state.tie_break.record_request(decision, survivors, request)?;
            Ok(request)
        })
    }

    /// Apply delivered randomness. The request id is the only credential.
    pub fn fulfill_randomness(&self, fulfillment: &Fulfillment) -> Result<Principal> {
        self.transact(|state| {
            Ok(state
                .tie_break
                .fulfill(fulfillment.request, &fulfillment.values)?)
        })
    }

    // -- Prize pool -------------------------------------------------------

    /// Accept funds into the prize pool.
    pub fn fund_prize_pool(&self, source: &str, amount: Amount) -> Result<()> {
        self.transact(|state| Ok(state.prize_pool.deposit(source, amount)?))
    }

    /// Set the prize pool payees by hand.
    pub fn set_prize_winners(&self, caller: &Principal, winners: Vec<Principal>) -> Result<()> {
        self.authorize(caller, Operation::SetWinners)?;
        self.transact(|state| Ok(state.prize_pool.set_winners(winners)?))
    }

    /// Set the prize pool payees from the final decision.
    ///
    /// A split pays every terminal winner; a draw pays only the drawn one
    /// and fails with `DrawPending` until randomness has been delivered.
    pub fn settle_prize_pool(&self, caller: &Principal) -> Result<Vec<Principal>> {
        self.authorize(caller, Operation::SettlePrizePool)?;
        self.transact(|state| {
            let winners = match state.vote.decision()? {
                Decision::SplitEquallyAmongWinners => state.chain.terminal().winners(),
                Decision::RandomDrawSingleWinner => {
                    let winner = state
                        .tie_break
                        .winner()
                        .cloned()
                        .ok_or(TournamentError::DrawPending)?;
                    vec![winner]
                }
            };
            state.prize_pool.set_winners(winners.clone())?;
            Ok(winners)
        })
    }

    pub fn claim_prize(&self, caller: &Principal) -> Result<Amount> {
        self.transact(|state| Ok(state.prize_pool.claim_own(caller)?))
    }

    pub fn claim_all_prizes(&self, caller: &Principal) -> Result<Vec<(Principal, Amount)>> {
        self.authorize(caller, Operation::ClaimAll)?;
        self.transact(|state| Ok(state.prize_pool.claim_all()?))
    }

    // -- Views ------------------------------------------------------------

    /// Snapshot of one round's market.
    pub fn round(&self, round: usize) -> Result<Market> {
        self.read(|state| state.chain.market(round).cloned())
    }

    pub fn survivors(&self, round: usize) -> Result<Vec<Principal>> {
        self.read(|state| state.chain.survivors(round))
    }

    pub fn is_winner(&self, round: usize, principal: &Principal) -> Result<bool> {
        self.read(|state| state.chain.is_winner(round, principal))
    }

    #[must_use]
    pub fn rounds(&self) -> usize {
        self.read(|state| state.chain.len())
    }

    #[must_use]
    pub fn registration(&self) -> Registration {
        self.read(|state| state.registration.clone())
    }

    #[must_use]
    pub fn prize_pool(&self) -> PrizePool {
        self.read(|state| state.prize_pool.clone())
    }

    #[must_use]
    pub fn tally(&self) -> i64 {
        self.read(|state| state.vote.tally())
    }

    #[must_use]
    pub fn draw_state(&self) -> DrawState {
        self.read(|state| state.tie_break.state().clone())
    }
}

fn ensure_terminal_resolved(state: &TournamentState) -> Result<()> {
    if state.chain.terminal().state() == MarketState::Resolved {
        Ok(())
    } else {
        Err(TournamentError::TerminalNotResolved.into())
    }
}
