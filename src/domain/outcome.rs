//! The two sides of a binary event.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two possible results of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    A,
    B,
}

impl Outcome {
    /// Both outcomes, in index order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Storage index (0 for A, 1 for B).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }

    /// Map a wire index back to an outcome.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::A),
            1 => Some(Self::B),
            _ => None,
        }
    }

    /// The opposite outcome.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_both_sides() {
        for outcome in Outcome::ALL {
            assert_eq!(Outcome::from_index(outcome.index() as u8), Some(outcome));
        }
        assert_eq!(Outcome::from_index(2), None);
    }

    #[test]
    fn other_flips() {
        assert_eq!(Outcome::A.other(), Outcome::B);
        assert_eq!(Outcome::B.other(), Outcome::A);
    }
}
