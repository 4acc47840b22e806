//! Read-only view of the engine for rendering.
//!
//! The presentation layer is a pure function of a `Snapshot`. Card and
//! history sequences are persistent (`im`) vectors shared structurally
//! with the engine, so taking a snapshot after every mutation is cheap.

use im::Vector;
use serde::Serialize;
use smallvec::SmallVec;

use super::state::{GamePhase, TurnState};
use crate::core::{Card, CardId, Scoreboard};
use crate::history::GameResult;

/// Everything a renderer needs, captured at one instant.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    /// Lifecycle stage.
    pub phase: GamePhase,

    /// Cards in board order. Empty during Setup.
    pub cards: Vector<Card>,

    /// The turn in progress (active team, selection, clock, pause).
    pub turn: TurnState,

    /// Current scores.
    pub scores: Scoreboard,

    /// Completed pair evaluations this game.
    pub move_count: u32,

    /// Pair currently shown as a mismatch, if any. Purely a display
    /// cue; cleared when the pair flips back.
    pub mismatched: SmallVec<[CardId; 2]>,

    /// Host override: all unmatched cards forced face up.
    pub reveal_all: bool,

    /// A completed pair is being evaluated; clicks are ignored.
    pub resolving: bool,

    /// Configured turn duration in seconds (the value the clock resets
    /// to).
    pub turn_duration_secs: u32,

    /// Finished games, newest first.
    pub history: Vector<GameResult>,
}
