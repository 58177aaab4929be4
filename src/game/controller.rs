//! The game controller: the boundary a front end talks to.

use crate::core::{ConfigError, EngineError, GameState, Intent, Layout, RuleConfig, SaveError};
use crate::rules::legal_intents;
use crate::turn::{Outcome, TurnMachine};

use super::save;
use super::snapshot::RenderableView;

/// A game in progress.
///
/// Owns its `GameState`, including the RNG, so two games never share a
/// random stream. Intents either apply completely or are rejected with the
/// state unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Deal a new game under the official rules.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::dealt(RuleConfig::standard(), seed),
        }
    }

    /// Deal a new game under custom rules.
    pub fn with_config(config: RuleConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new(config, seed)?,
        })
    }

    /// Start from an arranged position.
    pub fn from_layout(config: RuleConfig, layout: Layout, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::from_layout(config, layout, seed)?,
        })
    }

    /// Resume from a state, e.g. one kept by the caller.
    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    /// The full game state, hidden draw order included.
    ///
    /// For tests, tooling and saving. A front end shows the player only
    /// `snapshot()`, which never reveals the draw pile beyond a prophecy.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Apply one player intent.
    ///
    /// On error the game is left exactly as it was. Rule violations are
    /// the player's to fix; internal failures are logged as errors.
    pub fn apply_intent(&mut self, intent: &Intent) -> Result<(), EngineError> {
        match TurnMachine::apply(&self.state, intent) {
            Ok(next) => {
                tracing::debug!(%intent, phase = next.phase().name(), "intent applied");
                self.state = next;
                Ok(())
            }
            Err(err) if err.is_illegal() => {
                tracing::debug!(%intent, %err, "intent rejected");
                Err(err)
            }
            Err(err) => {
                tracing::error!(%intent, %err, turn = self.state.turn(), "engine failure, intent dropped");
                Err(err)
            }
        }
    }

    /// Everything the player may see.
    #[must_use]
    pub fn snapshot(&self) -> RenderableView {
        RenderableView::of(&self.state)
    }

    /// Intents that would be accepted now, apart from `Quit`.
    #[must_use]
    pub fn legal_intents(&self) -> Vec<Intent> {
        legal_intents(&self.state)
    }

    pub fn save(&self) -> Result<Vec<u8>, SaveError> {
        save::to_bytes(&self.state)
    }

    pub fn load(bytes: &[u8]) -> Result<Self, SaveError> {
        Ok(Self {
            state: save::from_bytes(bytes)?,
        })
    }
}
