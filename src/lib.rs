//! # dreamium
//!
//! A rules engine for a solitaire labyrinth card game: play same-colored
//! runs and spend keys to open every door before the draw pile runs out,
//! while nightmares eat at your hand and deck.
//!
//! ## Design Principles
//!
//! 1. **One Owner**: `GameState` owns every pile and its own RNG. Cards move
//!    between piles by value, so a card is always in exactly one place.
//!
//! 2. **Transactional Intents**: Every intent is applied to an O(1) clone
//!    (persistent vectors via `im`) and committed only on success.
//!
//! 3. **Explicit Effect Queue**: Multi-step effects are queued
//!    `PendingEffect`s rather than recursion, so a half-resolved turn can be
//!    inspected, saved and resumed.
//!
//! 4. **Named Rules**: Hand limit, run length, prophecy size and the other
//!    thresholds live in `RuleConfig`, never as literals.
//!
//! ## Modules
//!
//! - `cards`: Card identity, colors, kinds and deck lists
//! - `zones`: Piles and card movement
//! - `core`: State, intents, RNG, configuration, errors
//! - `effects`: The card rules and the pending-effect queue
//! - `turn`: Phases and the turn state machine
//! - `rules`: Legal intent enumeration
//! - `game`: The controller, player view and save files

pub mod cards;
pub mod core;
pub mod effects;
pub mod game;
pub mod rules;
pub mod turn;
pub mod zones;

// Re-export commonly used types
pub use crate::cards::{Card, CardId, CardKind, Color, DeckEntry, DeckList};

pub use crate::core::{
    CardSpec, ConfigError, EngineError, GameRng, GameRngState, GameState, IllegalAction, Intent, Layout,
    PileError, RuleConfig, Run, SaveError, MAX_PROPHECY_SIZE,
};

pub use crate::zones::{Location, Pile, Piles};

pub use crate::effects::{EffectResolver, Escape, PendingEffect};

pub use crate::turn::{LossReason, Outcome, Phase, TurnMachine};

pub use crate::rules::legal_intents;

pub use crate::game::{DecisionView, DiscardTally, DoorProgress, Game, RenderableView};
