//! Card model: identity, colors, kinds and deck composition.
//!
//! ## Key Types
//!
//! - `CardId`: Traceable identity of a physical card
//! - `Color` / `CardKind`: The only attributes gameplay looks at
//! - `Card`: Immutable card value
//! - `DeckList`: The fixed card set a game is built from

pub mod card;
pub mod deck_list;

pub use card::{Card, CardId, CardKind, Color};
pub use deck_list::{DeckEntry, DeckList};
