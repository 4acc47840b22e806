//! The dealt card grid.
//!
//! A `Board` owns the cards of one game. Dealing produces `2K` cards
//! for a `K`-symbol palette - every symbol on exactly two cards, board
//! order uniformly shuffled, everything face down. Ids are assigned
//! `0..2K` in board order after the shuffle, so `CardId` lookups are
//! O(1) index accesses.
//!
//! The card list is an `im::Vector`, so cloning a board into a snapshot
//! is O(1).

use im::Vector;

use crate::core::{Card, CardId, GameRng, Symbol};

/// The cards of one game, in board order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vector<Card>,
}

impl Board {
    /// Create an empty board (the Setup phase has no cards).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Deal a fresh board.
    ///
    /// Produces two cards per palette symbol, uniformly shuffled, all
    /// face down and unmatched.
    #[must_use]
    pub fn deal(palette_size: u8, rng: &mut GameRng) -> Self {
        let mut symbols: Vec<Symbol> = (0..palette_size)
            .flat_map(|s| [Symbol::new(s), Symbol::new(s)])
            .collect();
        rng.shuffle(&mut symbols);

        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(index, symbol)| Card::new(CardId::new(index as u32), symbol))
            .collect();

        Self { cards }
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the board undealt?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Iterate the cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// The persistent card list, for snapshots.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    // === Mutation ===

    /// Turn a card face up or face down. Unknown ids are ignored.
    pub fn set_face_up(&mut self, id: CardId, face_up: bool) {
        if let Some(card) = self.cards.get_mut(id.index()) {
            card.face_up = face_up;
        }
    }

    /// Mark a card as matched. Matched cards stay face up.
    pub fn mark_matched(&mut self, id: CardId) {
        if let Some(card) = self.cards.get_mut(id.index()) {
            card.matched = true;
            card.face_up = true;
        }
    }

    /// Turn every unmatched card face up (preview, reveal-all).
    pub fn reveal_unmatched(&mut self) {
        for card in self.cards.iter_mut() {
            if !card.matched {
                card.face_up = true;
            }
        }
    }

    /// Turn every unmatched card face down.
    pub fn hide_unmatched(&mut self) {
        for card in self.cards.iter_mut() {
            if !card.matched {
                card.face_up = false;
            }
        }
    }

    // === Queries ===

    /// Has every card been paired off? False for an undealt board.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.matched)
    }
}
