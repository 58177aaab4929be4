//! Rule queries that sit above the turn machine.
//!
//! `legal_intents` answers "what may the player do now" without applying
//! anything. The turn machine remains the authority: it validates every
//! intent on its own.

pub mod legal;

pub use legal::legal_intents;
