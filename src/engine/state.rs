//! Game lifecycle and turn state.
//!
//! ## GamePhase
//!
//! The coarse lifecycle: Setup (no cards) -> Preview (everything
//! revealed for memorizing) -> Playing -> Finished. Pause and
//! reveal-all are flags on the turn, not phases.
//!
//! ## TurnState
//!
//! Everything about the turn in progress: whose it is, which cards are
//! selected, how long is left. Exactly one team is active at a time.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardId, Team};

/// Coarse game lifecycle stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// No cards dealt; waiting for the host to start.
    Setup,

    /// All cards revealed for the memorize window.
    Preview,

    /// Turns in progress.
    Playing,

    /// Board complete or host-ended; results recorded.
    Finished,
}

/// The turn in progress.
///
/// `selected` holds the active team's picks in click order - never more
/// than two. A pair that fills it is evaluated immediately and the
/// selection cleared when the evaluation resolves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Team whose turn it is.
    pub active_team: Team,

    /// Selected card ids, in click order.
    pub selected: SmallVec<[CardId; 2]>,

    /// Whole seconds left on the turn clock.
    pub seconds_remaining: u32,

    /// Host-frozen countdown? Clicks are gated too; selection state is
    /// untouched.
    pub paused: bool,
}

impl TurnState {
    /// A fresh turn for the given team and clock.
    #[must_use]
    pub fn new(active_team: Team, seconds_remaining: u32) -> Self {
        Self {
            active_team,
            selected: SmallVec::new(),
            seconds_remaining,
            paused: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_turn() {
        let turn = TurnState::new(Team::A, 20);
        assert_eq!(turn.active_team, Team::A);
        assert!(turn.selected.is_empty());
        assert_eq!(turn.seconds_remaining, 20);
        assert!(!turn.paused);
    }

    #[test]
    fn test_selection_stays_inline() {
        let mut turn = TurnState::new(Team::B, 20);
        turn.selected.push(CardId::new(0));
        turn.selected.push(CardId::new(5));
        assert!(!turn.selected.spilled());
    }
}
