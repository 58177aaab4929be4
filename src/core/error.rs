//! Error types.
//!
//! - `IllegalAction`: the player asked for something the rules forbid. The
//!   game is left untouched and the message is meant for the player.
//! - `PileError`: a pile operation failed. Validated intents never cause
//!   one, so reaching it means the state is inconsistent.
//! - `EngineError`: what `apply_intent` returns, wrapping either of the above.

use thiserror::Error;

use crate::cards::{CardId, CardKind, Color};
use crate::zones::Location;

/// Failure of a pile operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PileError {
    #[error("the {0} pile is empty")]
    Empty(Location),

    #[error("card {0} is not in the {1} pile")]
    CardNotFound(CardId, Location),
}

/// A rule-violating request.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("the game is over")]
    GameOver,

    #[error("cannot {intent} while {phase}")]
    WrongPhase {
        intent: &'static str,
        phase: &'static str,
    },

    #[error("card {0} is not in your hand")]
    NotInHand(CardId),

    #[error("a {0} cannot follow another {0} in the labyrinth")]
    SameSymbol(CardKind),

    #[error("every {0} door is already open")]
    DoorAlreadyOpen(Color),

    #[error("no completed {0} run is waiting to open a door")]
    NoRunToOpen(Color),

    #[error("the drawn door is {drawn}, not {requested}")]
    WrongDoor { drawn: Color, requested: Color },

    #[error("you hold no {0} key")]
    NoMatchingKey(Color),

    #[error("card {0} is not a key")]
    NotAKey(CardId),

    #[error("your hand is empty")]
    EmptyHand,

    #[error("the draw pile holds {available} cards, {needed} are needed")]
    NotEnoughCards { available: usize, needed: usize },

    #[error("no more nightmares can be endured")]
    CannotEndure,

    #[error("a door cannot be discarded")]
    CannotDiscardDoor,

    #[error("card {0} was not revealed by the prophecy")]
    NotRevealed(CardId),

    #[error("the return order must list every other revealed card exactly once")]
    BadProphecyOrder,

    #[error("your hand holds {held} cards, the limit is {limit}; play or discard one")]
    HandOverLimit { held: usize, limit: usize },
}

/// Error returned when applying an intent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Illegal(#[from] IllegalAction),

    /// Internal consistency failure. Never silently ignored.
    #[error("internal consistency failure: {0}")]
    Internal(#[from] PileError),

    #[error("internal consistency failure: {0}")]
    Invariant(String),
}

impl EngineError {
    /// Whether this is a player mistake rather than an engine fault.
    #[must_use]
    pub fn is_illegal(&self) -> bool {
        matches!(self, EngineError::Illegal(_))
    }
}

/// Invalid ruleset.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be at least 1")]
    ZeroLimit(&'static str),

    #[error("prophecy_size {size} is over the maximum of {max}")]
    ProphecyTooLarge { size: usize, max: usize },

    #[error("deck entry {kind:?}/{color:?}: nightmares are colorless, every other card has a color")]
    BadDeckEntry {
        kind: CardKind,
        color: Option<Color>,
    },

    #[error("the deck contains no doors")]
    NoDoors,

    #[error("the deck holds {0} cards, more than ids can address")]
    DeckTooLarge(usize),

    #[error("layout asks for a {kind:?}/{color:?} the deck has no copy of left")]
    LayoutCardUnavailable {
        kind: CardKind,
        color: Option<Color>,
    },

    #[error("layout hand holds {held} cards, the limit is {limit}")]
    LayoutHandOverLimit { held: usize, limit: usize },

    #[error("layout places a {0} in the hand; only labyrinth cards can be held")]
    LayoutNotHoldable(CardKind),
}

/// Save-file failure.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to encode game: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode game: {0}")]
    Decode(#[source] bincode::Error),

    #[error("unsupported save version {found}, expected {expected}")]
    Version { found: u32, expected: u32 },

    #[error("saved game is inconsistent: {0}")]
    Corrupt(String),
}
