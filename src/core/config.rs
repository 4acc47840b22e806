//! Game configuration.
//!
//! Timing and board-size knobs, with the defaults the game shipped
//! with: a 10-symbol palette (20 cards), a 3 second memorize preview,
//! a 1.5 second mismatch reveal, and 20 second turns adjustable by the
//! host within 5..=60 seconds.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shortest turn duration the host can set, in seconds.
pub const MIN_TURN_SECS: u32 = 5;

/// Longest turn duration the host can set, in seconds.
pub const MAX_TURN_SECS: u32 = 60;

/// Turn duration a fresh game starts with, in seconds.
pub const DEFAULT_TURN_SECS: u32 = 20;

/// Number of distinct symbols in the default palette.
pub const DEFAULT_PALETTE_SIZE: u8 = 10;

/// How long all cards stay revealed before play starts.
pub const DEFAULT_PREVIEW: Duration = Duration::from_millis(3000);

/// How long a mismatched pair stays revealed before flipping back.
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(1500);

/// Clamp a host-supplied turn duration to the legal range.
#[must_use]
pub fn clamp_turn_secs(secs: u32) -> u32 {
    secs.clamp(MIN_TURN_SECS, MAX_TURN_SECS)
}

/// Engine configuration.
///
/// Nothing here changes mid-game except the turn duration, which the
/// host adjusts through the engine (clamped, never through this
/// struct).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Distinct symbols per deal. The board holds twice this many cards.
    pub palette_size: u8,

    /// Memorize-phase duration.
    pub preview: Duration,

    /// Mismatch reveal window before the pair flips back.
    pub mismatch_delay: Duration,

    /// Starting turn duration in seconds.
    pub turn_secs: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
            preview: DEFAULT_PREVIEW,
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            turn_secs: DEFAULT_TURN_SECS,
        }
    }
}

impl GameConfig {
    /// Create a configuration with the stock defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the palette size.
    #[must_use]
    pub fn with_palette_size(mut self, size: u8) -> Self {
        assert!(size > 0, "Palette must hold at least 1 symbol");
        self.palette_size = size;
        self
    }

    /// Set the starting turn duration, clamped to 5..=60 seconds.
    #[must_use]
    pub fn with_turn_secs(mut self, secs: u32) -> Self {
        self.turn_secs = clamp_turn_secs(secs);
        self
    }

    /// Set the preview duration.
    #[must_use]
    pub fn with_preview(mut self, preview: Duration) -> Self {
        self.preview = preview;
        self
    }

    /// Set the mismatch reveal window.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Number of cards a deal produces.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.palette_size as usize * 2
    }
}
