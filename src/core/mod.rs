//! Core engine types: state, intents, RNG, configuration, errors.
//!
//! `GameState` is the single root every rule reads and writes. The other
//! modules here are the plain data it is built from.

pub mod config;
pub mod error;
pub mod intent;
pub mod layout;
pub mod rng;
pub mod state;

pub use config::{RuleConfig, MAX_PROPHECY_SIZE};
pub use error::{ConfigError, EngineError, IllegalAction, PileError, SaveError};
pub use intent::Intent;
pub use layout::{CardSpec, Layout};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, Run};
