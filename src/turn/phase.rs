//! Turn phases and game outcomes.

use serde::{Deserialize, Serialize};

/// Why a game was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossReason {
    /// A draw found, or left, the draw pile empty.
    DeckExhausted,
    /// A nightmare arrived with no escape left.
    NightmareOverrun,
    /// Every card revealed by a prophecy was a door.
    DoorsOnlyProphecy,
    /// The player quit.
    Abandoned,
}

impl std::fmt::Display for LossReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            LossReason::DeckExhausted => "the draw pile ran out",
            LossReason::NightmareOverrun => "a nightmare could not be escaped",
            LossReason::DoorsOnlyProphecy => "the prophecy revealed only doors",
            LossReason::Abandoned => "the game was abandoned",
        };
        f.write_str(text)
    }
}

/// Result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost(LossReason),
}

impl Outcome {
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Where the turn state machine is.
///
/// `TurnComplete` is transient: the machine passes through it while running
/// end-of-turn checks and never rests there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    AwaitingDraw,
    AwaitingAction,
    /// The front of the effect queue waits for a decision.
    ResolvingEffect,
    TurnComplete,
    GameOver(Outcome),
}

impl Phase {
    /// Short name for error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Phase::AwaitingDraw => "waiting for the draw",
            Phase::AwaitingAction => "waiting for an action",
            Phase::ResolvingEffect => "resolving an effect",
            Phase::TurnComplete => "completing the turn",
            Phase::GameOver(_) => "the game is over",
        }
    }

    #[must_use]
    pub fn outcome(self) -> Outcome {
        match self {
            Phase::GameOver(outcome) => outcome,
            _ => Outcome::InProgress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_phase() {
        assert_eq!(Phase::AwaitingDraw.outcome(), Outcome::InProgress);
        assert_eq!(Phase::GameOver(Outcome::Won).outcome(), Outcome::Won);
        assert!(Phase::GameOver(Outcome::Lost(LossReason::Abandoned)).outcome().is_over());
        assert!(!Outcome::InProgress.is_over());
    }
}
