//! Turn flow.
//!
//! - `Phase`: Where the turn currently rests
//! - `Outcome` / `LossReason`: How a game ended
//! - `TurnMachine`: Applies intents and runs the effect queue

mod machine;
mod phase;

pub use machine::TurnMachine;
pub use phase::{LossReason, Outcome, Phase};
