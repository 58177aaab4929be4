//! Player intents: the only way the outside world drives a game.
//!
//! The presentation layer turns key presses into an `Intent` and hands it
//! to the controller. Which intents are accepted depends on the phase.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Color};

/// A discrete player request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Start the turn's draw phase.
    Draw,

    /// Play a hand card to the labyrinth.
    PlayCard(CardId),

    /// Discard a hand card. A key triggers a prophecy; while a nightmare
    /// is pending this is the "discard a key" escape.
    DiscardCard(CardId),

    /// Open a door of this color with the run just completed.
    OpenDoor(Color),

    /// Open the drawn door of this color with a key from hand.
    UseKey(Color),

    /// Decline the pending option, or end the action phase without acting.
    Pass,

    /// Nightmare escape: discard the whole hand and deal a fresh one.
    DiscardHand,

    /// Nightmare escape: discard the top cards of the draw pile.
    RevealTop,

    /// Nightmare escape: endure it (only with a non-zero tolerance).
    Endure,

    /// Answer a prophecy: discard one revealed card and return the rest,
    /// `order[0]` ending on top.
    Prophesy { discard: CardId, order: Vec<CardId> },

    /// Give up.
    Quit,
}

impl Intent {
    /// Short name for error messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Draw => "draw",
            Intent::PlayCard(_) => "play a card",
            Intent::DiscardCard(_) => "discard a card",
            Intent::OpenDoor(_) => "open a door",
            Intent::UseKey(_) => "use a key",
            Intent::Pass => "pass",
            Intent::DiscardHand => "discard the hand",
            Intent::RevealTop => "reveal the top of the draw pile",
            Intent::Endure => "endure a nightmare",
            Intent::Prophesy { .. } => "arrange a prophecy",
            Intent::Quit => "quit",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::PlayCard(id) => write!(f, "play {}", id),
            Intent::DiscardCard(id) => write!(f, "discard {}", id),
            Intent::OpenDoor(color) => write!(f, "open {} door", color),
            Intent::UseKey(color) => write!(f, "use {} key", color),
            Intent::Prophesy { discard, order } => {
                write!(f, "prophesy discarding {} returning [", discard)?;
                for (i, id) in order.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", id)?;
                }
                f.write_str("]")
            }
            other => f.write_str(other.name()),
        }
    }
}
