//! A single ordered pile of cards.
//!
//! Index 0 is the bottom, the last element is the top. Backed by
//! `im::Vector` so cloning a whole game is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::error::PileError;
use crate::core::rng::GameRng;

use super::Location;

/// An ordered stack of cards.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pile {
    location: Location,
    cards: Vector<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            location,
            cards: Vector::new(),
        }
    }

    /// Create a pile from cards listed bottom to top.
    #[must_use]
    pub fn from_cards(location: Location, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            location,
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards from bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Card> + ExactSizeIterator + '_ {
        self.cards.iter()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// The top card, without removing it.
    #[must_use]
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Up to `n` cards from the top, topmost first. Non-mutating.
    #[must_use]
    pub fn peek_top_n(&self, n: usize) -> Vec<Card> {
        self.cards.iter().rev().take(n).copied().collect()
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Result<Card, PileError> {
        self.cards.pop_back().ok_or(PileError::Empty(self.location))
    }

    /// Put a card on top.
    pub fn push_top(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Put a card at the bottom.
    pub fn push_bottom(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    /// Remove a specific card wherever it sits.
    pub fn remove(&mut self, id: CardId) -> Result<Card, PileError> {
        let index = self
            .position(id)
            .ok_or(PileError::CardNotFound(id, self.location))?;
        Ok(self.cards.remove(index))
    }

    /// Remove every card, returning them bottom to top.
    pub fn take_all(&mut self) -> Vec<Card> {
        let cards: Vec<Card> = self.cards.iter().copied().collect();
        self.cards.clear();
        cards
    }

    /// Uniformly permute the pile. An empty pile shuffles to itself.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        if self.cards.len() < 2 {
            return;
        }
        let mut cards: Vec<Card> = self.cards.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Move the top card of `self` onto `to`.
    pub fn move_top(&mut self, to: &mut Pile) -> Result<Card, PileError> {
        let card = self.draw()?;
        to.push_top(card);
        Ok(card)
    }

    /// Move a specific card of `self` onto the top of `to`.
    pub fn move_card(&mut self, id: CardId, to: &mut Pile) -> Result<Card, PileError> {
        let card = self.remove(id)?;
        to.push_top(card);
        Ok(card)
    }
}
