//! Teams and scorekeeping.
//!
//! ## Team
//!
//! The two competing teams. Always matched exhaustively - there is no
//! "third team" escape hatch anywhere in the engine.
//!
//! ## Scoreboard
//!
//! Per-team match counts, indexable by `Team`. Scores are unsigned and
//! deduction saturates at zero.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two competing teams.
///
/// Team A always starts. The active team alternates on mismatches, turn
/// expiry, and host-forced turn ends; it stays put on a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    /// Both teams, A first.
    #[must_use]
    pub const fn both() -> [Team; 2] {
        [Team::A, Team::B]
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "Team A"),
            Team::B => write!(f, "Team B"),
        }
    }
}

/// A host-applied score correction of exactly one point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreDelta {
    /// +1 point.
    Award,
    /// -1 point, saturating at zero.
    Deduct,
}

/// Per-team scores.
///
/// Serializes as `{"A": n, "B": n}`, the shape stored in the history
/// blob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    #[serde(rename = "A")]
    a: u32,
    #[serde(rename = "B")]
    b: u32,
}

impl Scoreboard {
    /// Create a scoreboard with both teams at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a team's score.
    #[must_use]
    pub fn get(&self, team: Team) -> u32 {
        self[team]
    }

    /// Apply a one-point correction to a team's score.
    ///
    /// Deduction at zero leaves the score at zero.
    pub fn adjust(&mut self, team: Team, delta: ScoreDelta) {
        let score = &mut self[team];
        match delta {
            ScoreDelta::Award => *score += 1,
            ScoreDelta::Deduct => *score = score.saturating_sub(1),
        }
    }

    /// The team currently ahead, or `None` on a tie.
    #[must_use]
    pub fn leader(&self) -> Option<Team> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(Team::A),
            std::cmp::Ordering::Less => Some(Team::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Index<Team> for Scoreboard {
    type Output = u32;

    fn index(&self, team: Team) -> &Self::Output {
        match team {
            Team::A => &self.a,
            Team::B => &self.b,
        }
    }
}

impl IndexMut<Team> for Scoreboard {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        match team {
            Team::A => &mut self.a,
            Team::B => &mut self.b,
        }
    }
}
