//! Recorded game outcomes.
//!
//! A `GameResult` is written exactly once, when a game reaches
//! Finished, and never mutated. The serialized shape is the one the
//! game has always stored: `{"winner": "Team A", "scores": {"A": 1,
//! "B": 0}, "date": "..."}` with an ISO 8601 date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Scoreboard, Team};

/// Who took the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "Team A")]
    TeamA,
    #[serde(rename = "Team B")]
    TeamB,
    Tie,
}

impl Winner {
    /// Decide the winner from a final scoreboard.
    #[must_use]
    pub fn from_scores(scores: &Scoreboard) -> Self {
        match scores.leader() {
            Some(Team::A) => Winner::TeamA,
            Some(Team::B) => Winner::TeamB,
            None => Winner::Tie,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::TeamA => write!(f, "Team A"),
            Winner::TeamB => write!(f, "Team B"),
            Winner::Tie => write!(f, "Tie"),
        }
    }
}

/// Outcome of one finished game. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Winning team, or a tie.
    pub winner: Winner,

    /// Final scoreboard snapshot.
    pub scores: Scoreboard,

    /// When the game ended.
    pub date: DateTime<Utc>,
}

impl GameResult {
    /// Record an outcome from a final scoreboard, stamped now.
    #[must_use]
    pub fn from_scores(scores: Scoreboard) -> Self {
        Self {
            winner: Winner::from_scores(&scores),
            scores,
            date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScoreDelta;

    fn scores(a: u32, b: u32) -> Scoreboard {
        let mut scores = Scoreboard::new();
        for _ in 0..a {
            scores.adjust(Team::A, ScoreDelta::Award);
        }
        for _ in 0..b {
            scores.adjust(Team::B, ScoreDelta::Award);
        }
        scores
    }

    #[test]
    fn test_winner_from_scores() {
        assert_eq!(Winner::from_scores(&scores(3, 1)), Winner::TeamA);
        assert_eq!(Winner::from_scores(&scores(1, 3)), Winner::TeamB);
        assert_eq!(Winner::from_scores(&scores(2, 2)), Winner::Tie);
        assert_eq!(Winner::from_scores(&scores(0, 0)), Winner::Tie);
    }

    #[test]
    fn test_result_records_scores() {
        let result = GameResult::from_scores(scores(4, 2));
        assert_eq!(result.winner, Winner::TeamA);
        assert_eq!(result.scores.get(Team::A), 4);
        assert_eq!(result.scores.get(Team::B), 2);
    }

    #[test]
    fn test_wire_shape() {
        let result = GameResult::from_scores(scores(0, 1));
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains(r#""winner":"Team B""#));
        assert!(json.contains(r#""scores":{"A":0,"B":1}"#));
        assert!(json.contains(r#""date":""#));

        let back: GameResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_tie_serializes_plain() {
        let result = GameResult::from_scores(scores(1, 1));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""winner":"Tie""#));
    }
}
