//! Core engine types: teams, cards, configuration, RNG.
//!
//! The fundamental building blocks shared by the board and the engine.

pub mod card;
pub mod config;
pub mod rng;
pub mod team;

pub use card::{Card, CardId, Symbol};
pub use config::{
    clamp_turn_secs, GameConfig, DEFAULT_MISMATCH_DELAY, DEFAULT_PALETTE_SIZE, DEFAULT_PREVIEW,
    DEFAULT_TURN_SECS, MAX_TURN_SECS, MIN_TURN_SECS,
};
pub use rng::GameRng;
pub use team::{ScoreDelta, Scoreboard, Team};
