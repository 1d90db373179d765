//! Random draw of a single final winner.
//!
//! Two phases: a request is recorded with the identifier the randomness
//! source handed out, and a later fulfillment carrying that identifier
//! picks `survivors[values[0] % survivors.len()]`. A fulfillment is
//! accepted exactly once.

use serde::Serialize;
use tracing::{info, warn};

use super::error::TieBreakError;
use super::id::{Principal, RequestId};
use super::vote::Decision;

/// Draw progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DrawState {
    Idle,
    Requested {
        request: RequestId,
        survivors: Vec<Principal>,
    },
    Drawn {
        request: RequestId,
        value: u128,
        index: usize,
        winner: Principal,
    },
}

/// Index chosen by `value` among `count` candidates.
#[must_use]
pub fn select_index(value: u128, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let count = u128::try_from(count).ok()?;
    usize::try_from(value % count).ok()
}

#[derive(Debug, Clone)]
pub struct TieBreak {
    state: DrawState,
}

impl Default for TieBreak {
    fn default() -> Self {
        Self::new()
    }
}

impl TieBreak {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DrawState::Idle,
        }
    }

    /// Check that a draw may be requested, without recording anything.
    pub fn ensure_can_request(
        &self,
        decision: Decision,
        survivors: &[Principal],
    ) -> Result<(), TieBreakError> {
        if decision != Decision::RandomDrawSingleWinner {
            return Err(TieBreakError::NotRandomDraw);
        }
        if !matches!(self.state, DrawState::Idle) {
            return Err(TieBreakError::DrawAlreadyRequested);
        }
        if survivors.is_empty() {
            return Err(TieBreakError::NoSurvivors);
        }
        Ok(())
    }

    /// Record an outstanding request over `survivors` (in winner order).
    pub fn record_request(
        &mut self,
        decision: Decision,
        survivors: Vec<Principal>,
        request: RequestId,
    ) -> Result<(), TieBreakError> {
        self.ensure_can_request(decision, &survivors)?;
        info!(request = %request, candidates = survivors.len(), "Random draw requested");
        self.state = DrawState::Requested { request, survivors };
        Ok(())
    }

    /// Apply the randomness delivered for `request` and pick the winner.
    pub fn fulfill(
        &mut self,
        request: RequestId,
        values: &[u128],
    ) -> Result<Principal, TieBreakError> {
        let survivors = match &self.state {
            DrawState::Requested {
                request: outstanding,
                survivors,
            } if *outstanding == request => survivors,
            DrawState::Drawn {
                request: consumed, ..
            } if *consumed == request => {
                warn!(request = %request, "Replayed randomness fulfillment ignored");
                return Err(TieBreakError::RequestConsumed { request });
            }
            _ => return Err(TieBreakError::UnknownRequest { request }),
        };
        let value = *values.first().ok_or(TieBreakError::EmptyRandomness)?;
        let index = select_index(value, survivors.len()).ok_or(TieBreakError::NoSurvivors)?;
        let winner = survivors
            .get(index)
            .cloned()
            .ok_or(TieBreakError::NoSurvivors)?;

        info!(request = %request, index, winner = %winner, "Random draw fulfilled");
        self.state = DrawState::Drawn {
            request,
            value,
            index,
            winner: winner.clone(),
        };
        Ok(winner)
    }

    #[must_use]
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// The outstanding request, if any.
    #[must_use]
    pub fn pending(&self) -> Option<RequestId> {
        match &self.state {
            DrawState::Requested { request, .. } => Some(*request),
            _ => None,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Principal> {
        match &self.state {
            DrawState::Drawn { winner, .. } => Some(winner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survivors() -> Vec<Principal> {
        ["a", "b", "c"].into_iter().map(Principal::new).collect()
    }

    fn requested() -> (TieBreak, RequestId) {
        let mut draw = TieBreak::new();
        let id = RequestId::generate();
        draw.record_request(Decision::RandomDrawSingleWinner, survivors(), id)
            .unwrap();
        (draw, id)
    }

    #[test]
    fn select_index_wraps_modulo_count() {
        assert_eq!(select_index(7, 3), Some(1));
        assert_eq!(select_index(u128::MAX, 2), Some(1));
        assert_eq!(select_index(5, 0), None);
    }

    #[test]
    fn split_decision_never_draws() {
        let draw = TieBreak::new();
        assert_eq!(
            draw.ensure_can_request(Decision::SplitEquallyAmongWinners, &survivors()),
            Err(TieBreakError::NotRandomDraw)
        );
    }

    #[test]
    fn empty_survivor_set_is_rejected() {
        let draw = TieBreak::new();
        assert_eq!(
            draw.ensure_can_request(Decision::RandomDrawSingleWinner, &[]),
            Err(TieBreakError::NoSurvivors)
        );
    }

    #[test]
    fn second_request_is_rejected() {
        let (mut draw, _) = requested();
        assert_eq!(
            draw.record_request(
                Decision::RandomDrawSingleWinner,
                survivors(),
                RequestId::generate()
            ),
            Err(TieBreakError::DrawAlreadyRequested)
        );
    }

    #[test]
    fn fulfillment_uses_first_value() {
        let (mut draw, id) = requested();

        let winner = draw.fulfill(id, &[5, 0, 0]).unwrap();

        assert_eq!(winner, Principal::new("c"));
        assert_eq!(draw.winner(), Some(&Principal::new("c")));
        assert_eq!(draw.pending(), None);
    }

    #[test]
    fn unknown_request_does_not_mutate() {
        let (mut draw, id) = requested();
        let other = RequestId::generate();

        assert_eq!(
            draw.fulfill(other, &[1]),
            Err(TieBreakError::UnknownRequest { request: other })
        );
        assert_eq!(draw.pending(), Some(id));
    }

    #[test]
    fn replay_is_rejected() {
        let (mut draw, id) = requested();
        draw.fulfill(id, &[0]).unwrap();

        assert_eq!(
            draw.fulfill(id, &[1]),
            Err(TieBreakError::RequestConsumed { request: id })
        );
        assert_eq!(draw.winner(), Some(&Principal::new("a")));
    }

    #[test]
    fn empty_values_keep_request_outstanding() {
        let (mut draw, id) = requested();
        assert_eq!(draw.fulfill(id, &[]), Err(TieBreakError::EmptyRandomness));
        assert_eq!(draw.pending(), Some(id));
    }

    #[test]
    fn fulfillment_without_request_is_unknown() {
        let mut draw = TieBreak::new();
        let id = RequestId::generate();
        assert_eq!(
            draw.fulfill(id, &[1]),
            Err(TieBreakError::UnknownRequest { request: id })
        );
    }
}
