//! Timer boundary between the engine and its event loop.
//!
//! The engine never sleeps. When it needs time to pass it pushes a
//! `TimerRequest`; the embedder drains requests, waits out the delay,
//! and hands each one back through `GameEngine::handle_timer`.
//!
//! ## Staleness
//!
//! Every request carries the engine `Generation` captured when it was
//! scheduled. Resetting the game bumps the generation, so a delivery
//! that outlives its game is dropped instead of mutating the next one.
//! Deliveries that merely outlive their purpose (a mismatch finalized
//! early, a finished game) are rejected by phase and sub-state guards
//! at delivery time.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cadence of the turn countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Engine instance counter, bumped on every game reset.
///
/// Compared at timer delivery: a mismatch means the request was
/// scheduled against a game that no longer exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// What a timer delivery means to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// The memorize preview is over; play begins.
    PreviewOver,

    /// The mismatch reveal window is over; flip the pair back.
    MismatchOver,

    /// One second of the turn countdown has elapsed.
    TurnTick,
}

/// A delay the embedder owes the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRequest {
    /// What to deliver when the delay elapses.
    pub kind: TimerKind,

    /// How long to wait before delivering.
    pub delay: Duration,

    /// Engine generation at schedule time.
    pub generation: Generation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_next() {
        let g = Generation::default();
        assert_eq!(g.next(), Generation(1));
        assert_eq!(g.next().next(), Generation(2));
        assert_ne!(g, g.next());
    }
}
