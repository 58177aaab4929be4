//! Piles and card movement.
//!
//! - `Location`: Named place a card can be
//! - `Pile`: Ordered container with top-of-pile access
//! - `Piles`: The aggregate owning every pile of a game

mod pile;
mod piles;

pub use pile::Pile;
pub use piles::Piles;

use serde::{Deserialize, Serialize};

use crate::cards::Color;

/// Where a card can be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Face-down draw pile. Only its size is public.
    Draw,
    /// Face-up discard pile.
    Discard,
    /// Scratch space for cards set aside while an effect resolves.
    Limbo,
    Hand,
    /// The row of played labyrinth cards.
    Labyrinth,
    /// Opened doors of one color.
    Door(Color),
}

impl Location {
    /// Every location, in a fixed order.
    pub fn all() -> impl Iterator<Item = Location> {
        [
            Location::Draw,
            Location::Discard,
            Location::Limbo,
            Location::Hand,
            Location::Labyrinth,
        ]
        .into_iter()
        .chain(Color::ALL.into_iter().map(Location::Door))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Draw => f.write_str("draw"),
            Location::Discard => f.write_str("discard"),
            Location::Limbo => f.write_str("limbo"),
            Location::Hand => f.write_str("hand"),
            Location::Labyrinth => f.write_str("labyrinth"),
            Location::Door(color) => write!(f, "{} door", color),
        }
    }
}
