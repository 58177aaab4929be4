//! Ruleset configuration.
//!
//! Every threshold the rules depend on is a named field here rather than a
//! literal in the engine. `RuleConfig::default()` is the official ruleset;
//! variants and tests adjust it with the `with_*` builders.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::{CardKind, Color, DeckList};

/// Largest prophecy. Every return order is a legal intent, so the intent
/// list grows with the factorial of this.
pub const MAX_PROPHECY_SIZE: usize = 6;

/// Ruleset constants plus the deck the game is played with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Cards held at rest. The draw phase fills one past this.
    pub hand_limit: usize,

    /// Consecutive same-color labyrinth cards needed to open a door.
    pub run_length: usize,

    /// Cards revealed when a key is discarded from hand.
    pub prophecy_size: usize,

    /// Cards discarded from the draw pile by the "reveal top" nightmare escape.
    pub nightmare_reveal: usize,

    /// How many nightmares may be endured without any other escape.
    /// Zero in the official rules.
    pub nightmare_tolerance: u32,

    /// The card set.
    pub deck: DeckList,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            hand_limit: 5,
            run_length: 3,
            prophecy_size: 5,
            nightmare_reveal: 5,
            nightmare_tolerance: 0,
            deck: DeckList::standard(),
        }
    }
}

impl RuleConfig {
    /// The official ruleset.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hand_limit(mut self, limit: usize) -> Self {
        self.hand_limit = limit;
        self
    }

    #[must_use]
    pub fn with_run_length(mut self, length: usize) -> Self {
        self.run_length = length;
        self
    }

    #[must_use]
    pub fn with_prophecy_size(mut self, size: usize) -> Self {
        self.prophecy_size = size;
        self
    }

    #[must_use]
    pub fn with_nightmare_reveal(mut self, count: usize) -> Self {
        self.nightmare_reveal = count;
        self
    }

    #[must_use]
    pub fn with_nightmare_tolerance(mut self, tolerance: u32) -> Self {
        self.nightmare_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: DeckList) -> Self {
        self.deck = deck;
        self
    }

    /// Doors that must be opened for one color.
    #[must_use]
    pub fn doors_of(&self, color: Color) -> usize {
        self.deck.doors_of(color)
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_limit == 0 {
            return Err(ConfigError::ZeroLimit("hand_limit"));
        }
        if self.run_length == 0 {
            return Err(ConfigError::ZeroLimit("run_length"));
        }
        if self.prophecy_size == 0 {
            return Err(ConfigError::ZeroLimit("prophecy_size"));
        }
        if self.prophecy_size > MAX_PROPHECY_SIZE {
            return Err(ConfigError::ProphecyTooLarge {
                size: self.prophecy_size,
                max: MAX_PROPHECY_SIZE,
            });
        }
        if self.nightmare_reveal == 0 {
            return Err(ConfigError::ZeroLimit("nightmare_reveal"));
        }

        for entry in self.deck.entries() {
            let colorless = entry.kind == CardKind::Nightmare;
            if colorless != entry.color.is_none() {
                return Err(ConfigError::BadDeckEntry {
                    kind: entry.kind,
                    color: entry.color,
                });
            }
        }

        if self.deck.total_doors() == 0 {
            return Err(ConfigError::NoDoors);
        }
        if self.deck.total() > u16::MAX as usize {
            return Err(ConfigError::DeckTooLarge(self.deck.total()));
        }

        Ok(())
    }
}
