//! Deck composition.
//!
//! A `DeckList` is the fixed multiset of cards a game is played with.
//! Building it is deterministic: entries are expanded in order and ids are
//! handed out sequentially from zero.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardKind, Color};

/// `count` copies of one kind/color combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckEntry {
    pub kind: CardKind,
    pub color: Option<Color>,
    pub count: u16,
}

impl DeckEntry {
    #[must_use]
    pub const fn colored(kind: CardKind, color: Color, count: u16) -> Self {
        Self {
            kind,
            color: Some(color),
            count,
        }
    }

    #[must_use]
    pub const fn nightmares(count: u16) -> Self {
        Self {
            kind: CardKind::Nightmare,
            color: None,
            count,
        }
    }
}

/// The full card set of a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckList {
    entries: Vec<DeckEntry>,
}

impl DeckList {
    /// The official distribution: 76 cards.
    #[must_use]
    pub fn standard() -> Self {
        use CardKind::{Door, Key, Moon, Sun};
        use Color::{Blue, Green, Red, Yellow};

        let mut entries = Vec::with_capacity(17);
        for (color, suns) in [(Red, 9), (Blue, 8), (Green, 7), (Yellow, 6)] {
            entries.push(DeckEntry::colored(Sun, color, suns));
            entries.push(DeckEntry::colored(Moon, color, 4));
            entries.push(DeckEntry::colored(Key, color, 3));
            entries.push(DeckEntry::colored(Door, color, 2));
        }
        entries.push(DeckEntry::nightmares(10));

        Self { entries }
    }

    /// An empty list, to be filled with `with_entry`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an entry.
    #[must_use]
    pub fn with_entry(mut self, entry: DeckEntry) -> Self {
        self.entries.push(entry);
        self
    }

    #[must_use]
    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    /// Expand the list into cards with sequential ids.
    #[must_use]
    pub fn build(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.total());
        let mut next_id = 0u16;

        for entry in &self.entries {
            for _ in 0..entry.count {
                cards.push(Card {
                    id: CardId(next_id),
                    kind: entry.kind,
                    color: entry.color,
                });
                next_id += 1;
            }
        }

        cards
    }

    /// Total number of cards.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Number of cards of the given kind and color.
    #[must_use]
    pub fn count_of(&self, kind: CardKind, color: Option<Color>) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == kind && e.color == color)
            .map(|e| e.count as usize)
            .sum()
    }

    /// Doors of one color, i.e. how many times that color must be opened.
    #[must_use]
    pub fn doors_of(&self, color: Color) -> usize {
        self.count_of(CardKind::Door, Some(color))
    }

    /// Doors across all colors.
    #[must_use]
    pub fn total_doors(&self) -> usize {
        Color::ALL.iter().map(|&c| self.doors_of(c)).sum()
    }

    #[must_use]
    pub fn nightmares(&self) -> usize {
        self.count_of(CardKind::Nightmare, None)
    }
}

impl Default for DeckList {
    fn default() -> Self {
        Self::standard()
    }
}
