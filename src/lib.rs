//! # flipmatch
//!
//! A turn-based memory matching game engine for two teams.
//!
//! ## Design Principles
//!
//! 1. **One owner**: `GameEngine` owns every piece of mutable game
//!    state. The presentation layer renders read-only snapshots and
//!    feeds commands back in; nothing else mutates anything.
//!
//! 2. **Sans-IO time**: the engine never sleeps. Delays (the memorize
//!    preview, the mismatch reveal, the one-second turn tick) are
//!    `TimerRequest`s the embedding event loop schedules and delivers
//!    back. Every request carries a generation token, so a delivery
//!    that outlives its game is a no-op instead of a corruption.
//!
//! 3. **No-op over error**: invalid or out-of-phase commands are
//!    silently ignored and out-of-range input is clamped. The game is
//!    always left consistent and playable; only the persistence
//!    collaborator can fail, and that failure is logged and absorbed.
//!
//! ## Modules
//!
//! - `core`: teams, cards, configuration, deterministic RNG
//! - `board`: the dealt grid and its operations
//! - `engine`: the state machine, snapshots, timer boundary
//! - `history`: game results, the key-value persistence seam
//!
//! ## Example
//!
//! ```
//! use flipmatch::{GameEngine, GamePhase};
//!
//! let mut engine = GameEngine::builder().palette_size(4).seed(7).build();
//! engine.start_game();
//!
//! // The embedder owes the engine its scheduled delays.
//! for request in engine.drain_timers() {
//!     engine.handle_timer(request.kind, request.generation);
//! }
//! assert_eq!(engine.phase(), GamePhase::Playing);
//! ```

pub mod board;
pub mod core;
pub mod engine;
pub mod history;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, GameConfig, GameRng, ScoreDelta, Scoreboard, Symbol, Team,
};

pub use crate::board::Board;

pub use crate::engine::{
    EngineBuilder, GameEngine, GamePhase, Generation, Snapshot, TimerKind, TimerRequest,
    TurnState, TICK_INTERVAL,
};

pub use crate::history::{
    FileStore, GameResult, HistoryLog, InMemoryStore, KeyValueStore, StoreError, Winner,
};
