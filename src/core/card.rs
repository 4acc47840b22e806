//! Card identity and per-card state.
//!
//! ## CardId
//!
//! Stable identifier assigned at deal time. Ids run `0..N` in board
//! order, so a `CardId` doubles as the card's index on the board.
//!
//! ## Symbol
//!
//! Opaque index into the configured symbol palette. The engine never
//! interprets symbols beyond equality - what a symbol looks like is the
//! presentation layer's business.

use serde::{Deserialize, Serialize};

/// Stable card identifier, `0..N` in board order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The card's board index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Opaque palette index. Each symbol appears on exactly two cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u8);

impl Symbol {
    /// Create a new symbol.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }
}

/// A card on the board.
///
/// Created at deal time, mutated by flips and matches, discarded on game
/// reset. A matched card stays face up and is never selectable again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable identifier and board index.
    pub id: CardId,

    /// Palette symbol on the face.
    pub symbol: Symbol,

    /// Currently showing its face?
    pub face_up: bool,

    /// Paired off and out of play?
    pub matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            face_up: false,
            matched: false,
        }
    }

    /// Can this card be picked as part of a selection?
    ///
    /// Face-up cards are either already selected or matched; neither is
    /// selectable.
    #[must_use]
    pub fn selectable(&self) -> bool {
        !self.face_up && !self.matched
    }
}
