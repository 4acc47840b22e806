//! The game state machine.
//!
//! ## Key Types
//!
//! - `GameEngine`: owns all mutable game state; commands and timer
//!   deliveries are methods on it
//! - `EngineBuilder`: configuration + injected store -> engine
//! - `Snapshot`: read-only rendering view, O(1) to take
//! - `TimerRequest` / `TimerKind` / `Generation`: the sans-IO timer
//!   boundary
//! - `GamePhase` / `TurnState`: lifecycle and turn records

mod game;
pub mod snapshot;
pub mod state;
pub mod timer;

pub use game::{EngineBuilder, GameEngine};
pub use snapshot::Snapshot;
pub use state::{GamePhase, TurnState};
pub use timer::{Generation, TimerKind, TimerRequest, TICK_INTERVAL};
