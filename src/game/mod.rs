//! Top level of the engine.
//!
//! - `Game`: Owns a game and applies intents transactionally
//! - `RenderableView`: The player's view of a game
//! - `save`: Versioned save files

mod controller;
pub mod save;
mod snapshot;

pub use controller::Game;
pub use snapshot::{DecisionView, DiscardTally, DoorProgress, RenderableView};
