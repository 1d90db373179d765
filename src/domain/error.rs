//! Errors raised by the settlement state machines.
//!
//! Every error maps onto one [`ErrorKind`] so callers can tell a wrong
//! role from a wrong state from a bad argument without matching on every
//! variant. None of these errors are transient: retrying the same call
//! against the same state fails the same way.

use serde::Serialize;
use thiserror::Error;

use super::id::{Principal, RequestId};
use super::money::Amount;
use super::role::Operation;

/// Coarse classification of core errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller lacks the role the operation requires.
    Authorization,
    /// Operation is invalid in the current state.
    State,
    /// Arguments are malformed.
    Validation,
    /// Caller is not allowed to take part.
    Eligibility,
    /// The computation would overflow, underflow or pay nothing.
    Arithmetic,
}

/// Checked-arithmetic failures on [`Amount`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("amount overflow")]
    Overflow,

    #[error("amount underflow")]
    Underflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("amount cannot be negative")]
    Negative,

    #[error("amount has more than {decimals} fractional digits")]
    ExcessPrecision { decimals: u32 },
}

/// Role check failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("{principal} is not allowed to {operation}")]
    Forbidden {
        operation: Operation,
        principal: Principal,
    },
}

impl AuthorizationError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Authorization
    }
}

/// Market state-machine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    #[error("event is finished")]
    MarketFinished,

    #[error("betting is stopped")]
    MarketStopped,

    #[error("event not stopped yet")]
    NotStopped,

    #[error("event not finished yet")]
    NotFinished,

    #[error("event is not cancelled")]
    NotCancelled,

    #[error("result already reported")]
    AlreadyResolved,

    #[error("{principal} has already placed a bet")]
    AlreadyStaked { principal: Principal },

    #[error("{principal} has already withdrawn their gain")]
    AlreadyClaimed { principal: Principal },

    #[error("winner and loser cannot be the same")]
    SameOutcome,

    #[error("place a bet greater than 0")]
    ZeroAmount,

    #[error("amount sent ({attached}) does not equal amount entered ({declared})")]
    AmountMismatch { declared: Amount, attached: Amount },

    #[error("{principal} is not a valid player")]
    NotEligible { principal: Principal },

    #[error("{principal} does not have a winning bet")]
    NoWinningStake { principal: Principal },

    #[error("{principal} has nothing to claim")]
    NothingToClaim { principal: Principal },

    #[error("no fees to withdraw")]
    NoFees,

    #[error("market holds {held}, cannot pay {requested}")]
    InsufficientBalance { requested: Amount, held: Amount },

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

impl MarketError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MarketFinished
            | Self::MarketStopped
            | Self::NotStopped
            | Self::NotFinished
            | Self::NotCancelled
            | Self::AlreadyResolved
            | Self::AlreadyStaked { .. }
            | Self::AlreadyClaimed { .. }
            | Self::NothingToClaim { .. }
            | Self::NoFees => ErrorKind::State,
            Self::SameOutcome | Self::ZeroAmount | Self::AmountMismatch { .. } => {
                ErrorKind::Validation
            }
            Self::NotEligible { .. } => ErrorKind::Eligibility,
            Self::NoWinningStake { .. }
            | Self::InsufficientBalance { .. }
            | Self::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }
}

/// Final-round ballot errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteError {
    #[error("{principal} does not have any winning bet")]
    NotAWinner { principal: Principal },

    #[error("{principal} has already voted")]
    AlreadyVoted { principal: Principal },

    #[error("voting is closed")]
    VoteClosed,

    #[error("voting is still open")]
    VoteStillOpen,

    #[error("vote result has not been finalized")]
    VoteNotFinalized,

    #[error("vote result already finalized")]
    AlreadyFinalized,

    #[error("ballot code {code} is not a valid side")]
    InvalidBallot { code: u8 },
}

impl VoteError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAWinner { .. } => ErrorKind::Eligibility,
            Self::InvalidBallot { .. } => ErrorKind::Validation,
            Self::AlreadyVoted { .. }
            | Self::VoteClosed
            | Self::VoteStillOpen
            | Self::VoteNotFinalized
            | Self::AlreadyFinalized => ErrorKind::State,
        }
    }
}

/// Random-draw protocol errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TieBreakError {
    #[error("final decision does not call for a random draw")]
    NotRandomDraw,

    #[error("no survivors to draw from")]
    NoSurvivors,

    #[error("a random draw was already requested")]
    DrawAlreadyRequested,

    #[error("{request} does not match an outstanding randomness request")]
    UnknownRequest { request: RequestId },

    #[error("{request} was already fulfilled")]
    RequestConsumed { request: RequestId },

    #[error("randomness fulfillment carried no values")]
    EmptyRandomness,
}

impl TieBreakError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyRandomness => ErrorKind::Validation,
            _ => ErrorKind::State,
        }
    }
}

/// Prize pool custody errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrizePoolError {
    #[error("only a winner of the competition can claim the prize pool ({principal})")]
    NotAWinner { principal: Principal },

    #[error("winner list already finalized")]
    WinnersAlreadySet,

    #[error("winner list has not been set")]
    WinnersNotSet,

    #[error("winner list cannot be empty")]
    EmptyWinners,

    #[error("prize pool holds {held}, cannot pay {requested}")]
    InsufficientBalance { requested: Amount, held: Amount },

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

impl PrizePoolError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAWinner { .. } => ErrorKind::Eligibility,
            Self::WinnersAlreadySet | Self::WinnersNotSet => ErrorKind::State,
            Self::EmptyWinners => ErrorKind::Validation,
            Self::InsufficientBalance { .. } | Self::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }
}

/// Registration roster errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{principal} is already registered")]
    AlreadyRegistered { principal: Principal },

    #[error("registration requires {entry_fee}, got {attached}")]
    AmountMismatch { entry_fee: Amount, attached: Amount },

    #[error("registration is closed")]
    RegistrationClosed,

    #[error("no registration funds to forward")]
    NothingToForward,

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

impl RegistrationError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyRegistered { .. } | Self::RegistrationClosed | Self::NothingToForward => {
                ErrorKind::State
            }
            Self::AmountMismatch { .. } => ErrorKind::Validation,
            Self::Arithmetic(_) => ErrorKind::Arithmetic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_errors_follow_taxonomy() {
        assert_eq!(MarketError::MarketStopped.kind(), ErrorKind::State);
        assert_eq!(MarketError::SameOutcome.kind(), ErrorKind::Validation);
        assert_eq!(
            MarketError::NotEligible {
                principal: Principal::new("x")
            }
            .kind(),
            ErrorKind::Eligibility
        );
        assert_eq!(
            MarketError::NoWinningStake {
                principal: Principal::new("x")
            }
            .kind(),
            ErrorKind::Arithmetic
        );
    }

    #[test]
    fn vote_not_a_winner_is_eligibility() {
        let err = VoteError::NotAWinner {
            principal: Principal::new("eve"),
        };
        assert_eq!(err.kind(), ErrorKind::Eligibility);
        assert_eq!(err.to_string(), "eve does not have any winning bet");
    }

    #[test]
    fn mismatch_message_names_both_amounts() {
        let err = MarketError::AmountMismatch {
            declared: Amount::new(300),
            attached: Amount::new(100),
        };
        assert_eq!(
            err.to_string(),
            "amount sent (100) does not equal amount entered (300)"
        );
    }
}
