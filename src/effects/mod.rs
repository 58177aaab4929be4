//! Card effects.
//!
//! - `PendingEffect`: Queued steps and player decisions
//! - `EffectResolver`: The card rules, applied to game state
//! - `Escape`: Ways out of a drawn nightmare
//!
//! Multi-step effects never recurse. A rule that needs the player pushes a
//! decision to the front of the queue and returns; the turn machine resumes
//! the queue once the decision arrives.

mod pending;
mod resolver;

pub use pending::{PendingEffect, Revealed};
pub use resolver::{EffectResolver, Escape, Escapes};
