//! Arranged deals.
//!
//! A `Layout` describes a game that starts from a chosen position instead
//! of a random deal: a given hand, given cards on top of the draw pile and
//! doors already open. The cards are always taken from the configured deck
//! list, so card conservation holds exactly as in a dealt game.

use serde::{Deserialize, Serialize};

use super::config::RuleConfig;
use super::error::ConfigError;
use super::state::GameState;
use crate::cards::{Card, CardKind, Color};
use crate::zones::{Location, Piles};

/// Which card to take from the deck, by kind and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSpec {
    pub kind: CardKind,
    pub color: Option<Color>,
}

impl CardSpec {
    #[must_use]
    pub const fn colored(kind: CardKind, color: Color) -> Self {
        Self {
            kind,
            color: Some(color),
        }
    }

    #[must_use]
    pub const fn sun(color: Color) -> Self {
        Self::colored(CardKind::Sun, color)
    }

    #[must_use]
    pub const fn moon(color: Color) -> Self {
        Self::colored(CardKind::Moon, color)
    }

    #[must_use]
    pub const fn key(color: Color) -> Self {
        Self::colored(CardKind::Key, color)
    }

    #[must_use]
    pub const fn door(color: Color) -> Self {
        Self::colored(CardKind::Door, color)
    }

    #[must_use]
    pub const fn nightmare() -> Self {
        Self {
            kind: CardKind::Nightmare,
            color: None,
        }
    }

    fn take_from(self, cards: &mut Vec<Card>) -> Result<Card, ConfigError> {
        let index = cards
            .iter()
            .position(|c| c.kind == self.kind && c.color == self.color)
            .ok_or(ConfigError::LayoutCardUnavailable {
                kind: self.kind,
                color: self.color,
            })?;
        Ok(cards.remove(index))
    }
}

/// A pre-arranged starting position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    hand: Vec<CardSpec>,
    /// Topmost first.
    draw_top: Vec<CardSpec>,
    open_doors: Vec<Color>,
    discard_rest: bool,
}

impl Layout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hand(mut self, cards: impl IntoIterator<Item = CardSpec>) -> Self {
        self.hand.extend(cards);
        self
    }

    /// Cards on top of the draw pile, the first one drawn first.
    #[must_use]
    pub fn with_draw_top(mut self, cards: impl IntoIterator<Item = CardSpec>) -> Self {
        self.draw_top.extend(cards);
        self
    }

    #[must_use]
    pub fn with_open_door(mut self, color: Color) -> Self {
        self.open_doors.push(color);
        self
    }

    /// Send every unplaced card to the discard pile, leaving the draw pile
    /// holding exactly the arranged top cards.
    #[must_use]
    pub fn with_rest_discarded(mut self) -> Self {
        self.discard_rest = true;
        self
    }
}

impl GameState {
    /// Build a game from an arranged position, waiting for the first draw.
    ///
    /// Unplaced cards are shuffled under the arranged top cards with the
    /// game's RNG, or discarded if the layout asks for it.
    pub fn from_layout(config: RuleConfig, layout: Layout, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        if layout.hand.len() > config.hand_limit {
            return Err(ConfigError::LayoutHandOverLimit {
                held: layout.hand.len(),
                limit: config.hand_limit,
            });
        }
        if let Some(spec) = layout.hand.iter().find(|s| !s.kind.is_labyrinth()) {
            return Err(ConfigError::LayoutNotHoldable(spec.kind));
        }

        let mut rest = config.deck.build();

        let mut piles = Piles::new();
        for spec in &layout.hand {
            let card = spec.take_from(&mut rest)?;
            piles.pile_mut(Location::Hand).push_top(card);
        }
        for &color in &layout.open_doors {
            let card = CardSpec::door(color).take_from(&mut rest)?;
            piles.pile_mut(Location::Door(color)).push_top(card);
        }
        let top = layout
            .draw_top
            .iter()
            .map(|spec| spec.take_from(&mut rest))
            .collect::<Result<Vec<_>, _>>()?;

        let mut state = GameState::empty(config, piles, seed);
        let rest_to = if layout.discard_rest {
            Location::Discard
        } else {
            Location::Draw
        };
        for card in rest {
            state.piles.pile_mut(rest_to).push_top(card);
        }
        state.piles.shuffle(Location::Draw, &mut state.rng);
        for card in top.into_iter().rev() {
            state.piles.pile_mut(Location::Draw).push_top(card);
        }

        tracing::debug!(
            hand = state.piles.hand().len(),
            draw = state.piles.draw_pile().len(),
            "arranged game laid out"
        );
        Ok(state)
    }
}
