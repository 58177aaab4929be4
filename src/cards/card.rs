//! Card identity, colors and kinds.
//!
//! Cards are plain `Copy` values. Gameplay only ever branches on
//! `kind` and `color`; the `id` exists so a card can be traced while it
//! moves between piles.

use serde::{Deserialize, Serialize};

/// Unique identifier of a physical card in a game.
///
/// Ids are assigned sequentially when the deck list is built, so the same
/// deck list always yields the same ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Card colors. Every door, key, sun and moon has one; nightmares have none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    /// All colors, in door display order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Dense index, used for per-color arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Green => 2,
            Color::Yellow => 3,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

/// What a card does.
///
/// `Sun`, `Moon` and `Key` are labyrinth cards: they live in the hand and
/// can be played to the labyrinth row. Doors and nightmares never enter
/// the hand; they are resolved the moment they are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Sun,
    Moon,
    Key,
    Door,
    Nightmare,
}

impl CardKind {
    /// Whether cards of this kind can be held in hand.
    #[must_use]
    pub const fn is_labyrinth(self) -> bool {
        matches!(self, CardKind::Sun | CardKind::Moon | CardKind::Key)
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CardKind::Sun => "sun",
            CardKind::Moon => "moon",
            CardKind::Key => "key",
            CardKind::Door => "door",
            CardKind::Nightmare => "nightmare",
        };
        f.write_str(name)
    }
}

/// A physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    /// `None` only for nightmares.
    pub color: Option<Color>,
}

impl Card {
    /// Create a colored card.
    #[must_use]
    pub const fn colored(id: CardId, kind: CardKind, color: Color) -> Self {
        Self {
            id,
            kind,
            color: Some(color),
        }
    }

    /// Create a nightmare.
    #[must_use]
    pub const fn nightmare(id: CardId) -> Self {
        Self {
            id,
            kind: CardKind::Nightmare,
            color: None,
        }
    }

    #[must_use]
    pub fn is_key_of(&self, color: Color) -> bool {
        self.kind == CardKind::Key && self.color == Some(color)
    }

    #[must_use]
    pub fn is_door_of(&self, color: Color) -> bool {
        self.kind == CardKind::Door && self.color == Some(color)
    }

    /// Whether this card matches the given kind and color, ignoring identity.
    #[must_use]
    pub fn matches(&self, kind: CardKind, color: Option<Color>) -> bool {
        self.kind == kind && self.color == color
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.color {
            Some(color) => write!(f, "{} {}{}", color, self.kind, self.id),
            None => write!(f, "{}{}", self.kind, self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(12);
        assert_eq!(id.raw(), 12);
        assert_eq!(format!("{}", id), "#12");
    }

    #[test]
    fn test_color_index_is_dense() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
        }
    }

    #[test]
    fn test_labyrinth_kinds() {
        assert!(CardKind::Sun.is_labyrinth());
        assert!(CardKind::Moon.is_labyrinth());
        assert!(CardKind::Key.is_labyrinth());
        assert!(!CardKind::Door.is_labyrinth());
        assert!(!CardKind::Nightmare.is_labyrinth());
    }

    #[test]
    fn test_key_and_door_predicates() {
        let key = Card::colored(CardId(1), CardKind::Key, Color::Blue);
        let door = Card::colored(CardId(2), CardKind::Door, Color::Blue);

        assert!(key.is_key_of(Color::Blue));
        assert!(!key.is_key_of(Color::Red));
        assert!(!key.is_door_of(Color::Blue));
        assert!(door.is_door_of(Color::Blue));
    }

    #[test]
    fn test_display() {
        let sun = Card::colored(CardId(3), CardKind::Sun, Color::Red);
        assert_eq!(sun.to_string(), "red sun#3");
        assert_eq!(Card::nightmare(CardId(70)).to_string(), "nightmare#70");
    }
}
