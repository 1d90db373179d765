use thiserror::Error;

use crate::domain::error::{
    ArithmeticError, AuthorizationError, ErrorKind, MarketError, PrizePoolError,
    RegistrationError, TieBreakError, VoteError,
};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Round chain addressing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("a chain needs at least 2 rounds, got {rounds}")]
    TooFewRounds { rounds: usize },

    #[error("round {round} does not exist (chain has {rounds} rounds)")]
    UnknownRound { round: usize, rounds: usize },
}

/// Tournament orchestration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TournamentError {
    #[error("random draw has not been fulfilled yet")]
    DrawPending,

    #[error("terminal round has not been resolved yet")]
    TerminalNotResolved,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    #[error(transparent)]
    Market(#[from] MarketError),

    #[error(transparent)]
    Vote(#[from] VoteError),

    #[error(transparent)]
    TieBreak(#[from] TieBreakError),

    #[error(transparent)]
    PrizePool(#[from] PrizePoolError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Tournament(#[from] TournamentError),

    #[error("randomness source error: {0}")]
    Randomness(String),

    #[error("treasury error: {0}")]
    Treasury(String),

    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Core error classification, if this error came from the settlement core.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Authorization(e) => Some(e.kind()),
            Self::Market(e) => Some(e.kind()),
            Self::Vote(e) => Some(e.kind()),
            Self::TieBreak(e) => Some(e.kind()),
            Self::PrizePool(e) => Some(e.kind()),
            Self::Registration(e) => Some(e.kind()),
            Self::Arithmetic(_) => Some(ErrorKind::Arithmetic),
            Self::Chain(ChainError::UnknownRound { .. }) => Some(ErrorKind::Validation),
            Self::Tournament(
                TournamentError::DrawPending | TournamentError::TerminalNotResolved,
            ) => Some(ErrorKind::State),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
