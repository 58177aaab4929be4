//! Pending effects.
//!
//! Multi-step rules are queued as explicit `PendingEffect`s instead of
//! recursive calls, so a half-resolved turn can be inspected, saved and
//! resumed. Some entries are steps the engine runs on its own; the rest
//! wait for a player decision.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardId, Color};

/// Revealed prophecy cards, topmost first.
pub type Revealed = SmallVec<[CardId; 5]>;

/// One entry of the effect queue.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PendingEffect {
    // === Automatic steps ===

    /// Draw until the hand holds one card past the limit.
    FillHand,

    /// Draw phase finished: the player acts next.
    BeginAction,

    /// Action resolved: run end-of-turn checks.
    EndTurn,

    // === Decisions ===

    /// A door was drawn while a key of its color is in hand.
    /// The door sits in limbo until the player uses the key or passes.
    DoorDrawn {
        door: Card,
        /// The draw that revealed the door emptied the draw pile.
        last_card: bool,
    },

    /// A nightmare was drawn and sits in limbo until an escape is chosen.
    Nightmare { nightmare: Card },

    /// A key was discarded; the revealed cards are still on the draw pile.
    Prophecy { revealed: Revealed },

    /// A labyrinth run of this color just completed.
    RunCompleted { color: Color },
}

impl PendingEffect {
    /// Whether this entry waits for the player.
    #[must_use]
    pub fn is_decision(&self) -> bool {
        !matches!(
            self,
            PendingEffect::FillHand | PendingEffect::BeginAction | PendingEffect::EndTurn
        )
    }

    /// Short name for logs and error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PendingEffect::FillHand => "drawing",
            PendingEffect::BeginAction => "starting the action",
            PendingEffect::EndTurn => "ending the turn",
            PendingEffect::DoorDrawn { .. } => "deciding on a drawn door",
            PendingEffect::Nightmare { .. } => "escaping a nightmare",
            PendingEffect::Prophecy { .. } => "arranging a prophecy",
            PendingEffect::RunCompleted { .. } => "deciding on a completed run",
        }
    }
}
