//! Every pile of a game, owned in one place.
//!
//! `Piles` is the only owner of cards. Cards move between piles by value,
//! so a card can never be in two locations at once and the total count is
//! conserved by construction.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Color};
use crate::core::error::PileError;
use crate::core::rng::GameRng;

use super::{Location, Pile};

/// All piles of a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piles {
    draw: Pile,
    discard: Pile,
    limbo: Pile,
    hand: Pile,
    labyrinth: Pile,
    doors: [Pile; 4],
}

impl Default for Piles {
    fn default() -> Self {
        Self::new()
    }
}

impl Piles {
    /// Create an empty set of piles.
    #[must_use]
    pub fn new() -> Self {
        Self {
            draw: Pile::new(Location::Draw),
            discard: Pile::new(Location::Discard),
            limbo: Pile::new(Location::Limbo),
            hand: Pile::new(Location::Hand),
            labyrinth: Pile::new(Location::Labyrinth),
            doors: Color::ALL.map(|c| Pile::new(Location::Door(c))),
        }
    }

    /// Create piles with every card in the draw pile, listed bottom to top.
    #[must_use]
    pub fn with_draw_pile(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut piles = Self::new();
        piles.draw = Pile::from_cards(Location::Draw, cards);
        piles
    }

    #[must_use]
    pub fn pile(&self, location: Location) -> &Pile {
        match location {
            Location::Draw => &self.draw,
            Location::Discard => &self.discard,
            Location::Limbo => &self.limbo,
            Location::Hand => &self.hand,
            Location::Labyrinth => &self.labyrinth,
            Location::Door(color) => &self.doors[color.index()],
        }
    }

    pub fn pile_mut(&mut self, location: Location) -> &mut Pile {
        match location {
            Location::Draw => &mut self.draw,
            Location::Discard => &mut self.discard,
            Location::Limbo => &mut self.limbo,
            Location::Hand => &mut self.hand,
            Location::Labyrinth => &mut self.labyrinth,
            Location::Door(color) => &mut self.doors[color.index()],
        }
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Pile {
        &self.draw
    }

    #[must_use]
    pub fn discard(&self) -> &Pile {
        &self.discard
    }

    #[must_use]
    pub fn limbo(&self) -> &Pile {
        &self.limbo
    }

    #[must_use]
    pub fn hand(&self) -> &Pile {
        &self.hand
    }

    #[must_use]
    pub fn labyrinth(&self) -> &Pile {
        &self.labyrinth
    }

    #[must_use]
    pub fn door_pile(&self, color: Color) -> &Pile {
        &self.doors[color.index()]
    }

    /// Draw the top card of `from` and put it on top of `to`.
    pub fn move_top(&mut self, from: Location, to: Location) -> Result<Card, PileError> {
        let card = self.pile_mut(from).draw()?;
        self.pile_mut(to).push_top(card);
        tracing::debug!(card = %card, ?from, ?to, "moved top card");
        Ok(card)
    }

    /// Move a specific card from `from` to the top of `to`.
    pub fn move_card(&mut self, id: CardId, from: Location, to: Location) -> Result<Card, PileError> {
        let card = self.pile_mut(from).remove(id)?;
        self.pile_mut(to).push_top(card);
        tracing::debug!(card = %card, ?from, ?to, "moved card");
        Ok(card)
    }

    /// Shuffle one pile.
    pub fn shuffle(&mut self, location: Location, rng: &mut GameRng) {
        self.pile_mut(location).shuffle(rng);
    }

    /// Put every card in limbo back into the draw pile and shuffle it.
    ///
    /// Returns how many cards came back. An empty limbo leaves the draw
    /// pile's order untouched.
    pub fn return_limbo(&mut self, rng: &mut GameRng) -> usize {
        let cards = self.limbo.take_all();
        if cards.is_empty() {
            return 0;
        }
        let returned = cards.len();
        for card in cards {
            self.draw.push_top(card);
        }
        self.draw.shuffle(rng);
        tracing::info!(returned, "shuffled limbo back into the draw pile");
        returned
    }

    /// Find which pile holds a card.
    #[must_use]
    pub fn locate(&self, id: CardId) -> Option<Location> {
        Location::all().find(|&loc| self.pile(loc).contains(id))
    }

    /// Total number of cards across all piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        Location::all().map(|loc| self.pile(loc).len()).sum()
    }

    /// Every card, in location order then bottom to top.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> + '_ {
        Location::all().flat_map(move |loc| self.pile(loc).iter())
    }

    /// Check that the piles hold exactly `expected` (by identity), each once.
    pub fn verify_conservation(&self, expected: &[Card]) -> Result<(), String> {
        let mut seen = FxHashSet::default();
        for card in self.all_cards() {
            if !seen.insert(card.id) {
                return Err(format!("card {} appears twice", card));
            }
        }

        if seen.len() != expected.len() {
            return Err(format!("expected {} cards, found {}", expected.len(), seen.len()));
        }

        let mut actual: Vec<Card> = self.all_cards().copied().collect();
        actual.sort();
        let mut wanted = expected.to_vec();
        wanted.sort();
        if actual != wanted {
            return Err("card set differs from the deck list".to_string());
        }

        Ok(())
    }
}
