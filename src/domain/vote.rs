//! Final-round vote among the terminal winners.
//!
//! Each winner of the terminal market casts one ballot. `Side1` adds one
//! to the tally, `Side2` subtracts one. Only a strictly positive tally
//! splits the prize; zero (a tie) and negative tallies both go to a
//! random draw.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use super::eligibility::Eligibility;
use super::error::VoteError;
use super::id::Principal;

/// A survivor's ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ballot {
    /// Split the prize equally.
    Side1,
    /// Let a random draw pick one winner.
    Side2,
}

impl Ballot {
    /// Decode the wire value (`1` or `2`).
    pub const fn from_code(code: u8) -> Result<Self, VoteError> {
        match code {
            1 => Ok(Self::Side1),
            2 => Ok(Self::Side2),
            _ => Err(VoteError::InvalidBallot { code }),
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Side1 => 1,
            Self::Side2 => 2,
        }
    }

    /// Contribution to the tally.
    #[must_use]
    pub const fn weight(self) -> i64 {
        match self {
            Self::Side1 => 1,
            Self::Side2 => -1,
        }
    }
}

/// What happens to the prize pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    SplitEquallyAmongWinners,
    RandomDrawSingleWinner,
}

impl Decision {
    /// Decision for a finalized tally. Ties go to the draw.
    #[must_use]
    pub const fn from_tally(tally: i64) -> Self {
        if tally > 0 {
            Self::SplitEquallyAmongWinners
        } else {
            Self::RandomDrawSingleWinner
        }
    }

    #[must_use]
    pub const fn announcement(self) -> &'static str {
        match self {
            Self::SplitEquallyAmongWinners => {
                "Split The Prize Pool equally between every last final Players remaining in the Squid Bet Competition"
            }
            Self::RandomDrawSingleWinner => {
                "Random Draw will decide the only Winner of the Squid Bet Competition"
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SplitEquallyAmongWinners => "split",
            Self::RandomDrawSingleWinner => "random_draw",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voting lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VotePhase {
    Open,
    Closed,
    Finalized,
}

/// Ballot box for the terminal round.
#[derive(Debug, Clone)]
pub struct FinalVote {
    tally: i64,
    voted: HashSet<Principal>,
    phase: VotePhase,
    decision: Option<Decision>,
}

impl Default for FinalVote {
    fn default() -> Self {
        Self::new()
    }
}

impl FinalVote {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tally: 0,
            voted: HashSet::new(),
            phase: VotePhase::Open,
            decision: None,
        }
    }

    /// Cast `ballot` for `caller`. `winners` admits terminal-round winners.
    ///
    /// Returns the tally after the ballot is counted.
    pub fn vote(
        &mut self,
        caller: &Principal,
        ballot: Ballot,
        winners: &dyn Eligibility,
    ) -> Result<i64, VoteError> {
        if self.phase != VotePhase::Open {
            return Err(VoteError::VoteClosed);
        }
        if !winners.is_eligible(caller) {
            debug!(principal = %caller, "Ballot rejected: not a winner");
            return Err(VoteError::NotAWinner {
                principal: caller.clone(),
            });
        }
        if self.voted.contains(caller) {
            return Err(VoteError::AlreadyVoted {
                principal: caller.clone(),
            });
        }

        self.tally += ballot.weight();
        self.voted.insert(caller.clone());
        info!(principal = %caller, ballot = ballot.code(), tally = self.tally, "Vote cast");
        Ok(self.tally)
    }

    /// Close the ballot box.
    pub fn stop(&mut self) -> Result<(), VoteError> {
        if self.phase != VotePhase::Open {
            return Err(VoteError::VoteClosed);
        }
        self.phase = VotePhase::Closed;
        info!(tally = self.tally, votes = self.voted.len(), "Vote stopped");
        Ok(())
    }

    /// Snapshot the decision from the closed tally.
    pub fn finalize(&mut self) -> Result<Decision, VoteError> {
        match self.phase {
            VotePhase::Open => return Err(VoteError::VoteStillOpen),
            VotePhase::Finalized => return Err(VoteError::AlreadyFinalized),
            VotePhase::Closed => {}
        }
        let decision = Decision::from_tally(self.tally);
        self.phase = VotePhase::Finalized;
        self.decision = Some(decision);
        info!(tally = self.tally, decision = %decision, "{}", decision.announcement());
        Ok(decision)
    }

    /// The finalized decision.
    pub fn decision(&self) -> Result<Decision, VoteError> {
        self.decision.ok_or(VoteError::VoteNotFinalized)
    }

    #[must_use]
    pub fn tally(&self) -> i64 {
        self.tally
    }

    #[must_use]
    pub fn phase(&self) -> VotePhase {
        self.phase
    }

    #[must_use]
    pub fn has_voted(&self, principal: &Principal) -> bool {
        self.voted.contains(principal)
    }

    #[must_use]
    pub fn votes_cast(&self) -> usize {
        self.voted.len()
    }
}
