//! Settlement domain logic.
//!
//! Pure state machines and exact arithmetic. Nothing in here performs I/O,
//! checks roles or moves funds between components; the application layer
//! does that around these types.

pub mod eligibility;
pub mod error;
pub mod id;
pub mod ledger;
pub mod market;
pub mod money;
pub mod outcome;
pub mod prize_pool;
pub mod registration;
pub mod role;
pub mod tie_break;
pub mod vote;

pub use eligibility::{Eligibility, Unrestricted, WinnerGate};
pub use error::{
    ArithmeticError, AuthorizationError, ErrorKind, MarketError, PrizePoolError,
    RegistrationError, TieBreakError, VoteError,
};
pub use id::{MarketId, Principal, RequestId};
pub use ledger::{Position, StakeBook};
pub use market::{Market, MarketState, Resolution, StakePolicy};
pub use money::{Amount, FeeRate, BPS_DENOMINATOR};
pub use outcome::Outcome;
pub use prize_pool::PrizePool;
pub use registration::{EntrySplit, Registration};
pub use role::{Operation, Role};
pub use tie_break::{select_index, DrawState, TieBreak};
pub use vote::{Ballot, Decision, FinalVote, VotePhase};
