//! Game state: the single mutable root of a game.
//!
//! ## GameState
//!
//! Owns everything a game is made of:
//! - Ruleset configuration
//! - Every pile (and so every card)
//! - The current labyrinth run
//! - Turn phase and the queue of pending effects
//! - Counters (turn, nightmares endured)
//! - The game's own RNG
//!
//! Cloning is O(1) thanks to `im` persistent vectors, which is what makes
//! intents transactional: they are applied to a clone that is only kept on
//! success.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::RuleConfig;
use super::error::ConfigError;
use super::rng::GameRng;
use crate::cards::{Card, CardId, CardKind, Color};
use crate::effects::{EffectResolver, PendingEffect};
use crate::turn::{LossReason, Outcome, Phase};
use crate::zones::{Location, Piles};

/// The trailing run of same-colored cards in the labyrinth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Run {
    pub color: Option<Color>,
    pub len: usize,
}

impl Run {
    /// Account for a card of `color` played to the labyrinth.
    ///
    /// A completed run does not keep growing: the next card starts a new
    /// one even if it has the same color. Returns whether the run is now
    /// complete.
    pub fn extend(&mut self, color: Color, run_length: usize) -> bool {
        if self.color == Some(color) && self.len < run_length {
            self.len += 1;
        } else {
            self.color = Some(color);
            self.len = 1;
        }
        self.len == run_length
    }

    pub fn reset(&mut self) {
        *self = Run::default();
    }

    #[must_use]
    pub fn is_complete(&self, run_length: usize) -> bool {
        self.color.is_some() && self.len == run_length
    }
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    config: RuleConfig,
    pub(crate) piles: Piles,
    pub(crate) run: Run,
    pub(crate) phase: Phase,
    pub(crate) pending: Vector<PendingEffect>,
    /// Turn number (starts at 1).
    pub(crate) turn: u32,
    pub(crate) nightmares_endured: u32,
    pub(crate) rng: GameRng,
}

impl GameState {
    /// Assemble, shuffle and deal a new game.
    ///
    /// The deck is shuffled with the game's own RNG, then the hand is dealt
    /// to `hand_limit` cards. Doors and nightmares met while dealing are
    /// set aside and shuffled back afterwards. A deck too small to deal
    /// from yields a game that is already lost.
    pub fn new(config: RuleConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::dealt(config, seed))
    }

    /// Deal a game from a configuration already known to be valid.
    pub(crate) fn dealt(config: RuleConfig, seed: u64) -> Self {
        let cards = config.deck.build();

        let mut state = Self::empty(config, Piles::with_draw_pile(cards), seed);
        state.piles.shuffle(Location::Draw, &mut state.rng);

        let limit = state.config.hand_limit;
        if EffectResolver::deal(&mut state, limit) {
            EffectResolver::finish(&mut state, Outcome::Lost(LossReason::DeckExhausted));
        }

        tracing::info!(
            seed,
            hand = state.piles.hand().len(),
            draw = state.piles.draw_pile().len(),
            "new game dealt"
        );
        state
    }

    /// State around pre-arranged piles, waiting for the first draw.
    pub(crate) fn empty(config: RuleConfig, piles: Piles, seed: u64) -> Self {
        Self {
            config,
            piles,
            run: Run::default(),
            phase: Phase::AwaitingDraw,
            pending: Vector::new(),
            turn: 1,
            nightmares_endured: 0,
            rng: GameRng::new(seed),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    #[must_use]
    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    #[must_use]
    pub fn run(&self) -> Run {
        self.run
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The effect queue, front first.
    pub fn pending(&self) -> impl Iterator<Item = &PendingEffect> + '_ {
        self.pending.iter()
    }

    /// The decision the player must make, if any.
    #[must_use]
    pub fn current_decision(&self) -> Option<&PendingEffect> {
        if self.phase != Phase::ResolvingEffect {
            return None;
        }
        self.pending.front().filter(|p| p.is_decision())
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn nightmares_endured(&self) -> u32 {
        self.nightmares_endured
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.phase.outcome()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome().is_over()
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    // === Derived rule queries ===

    /// Doors of this color opened so far.
    #[must_use]
    pub fn doors_opened(&self, color: Color) -> usize {
        self.piles.door_pile(color).len()
    }

    /// Whether every door of this color is open.
    #[must_use]
    pub fn door_complete(&self, color: Color) -> bool {
        self.doors_opened(color) >= self.config.doors_of(color)
    }

    #[must_use]
    pub fn all_doors_open(&self) -> bool {
        Color::ALL.iter().all(|&c| self.door_complete(c))
    }

    /// First key of this color in hand.
    #[must_use]
    pub fn key_in_hand(&self, color: Color) -> Option<CardId> {
        self.piles
            .hand()
            .iter()
            .find(|c| c.is_key_of(color))
            .map(|c| c.id)
    }

    #[must_use]
    pub fn hand_has_key(&self, color: Color) -> bool {
        self.key_in_hand(color).is_some()
    }

    #[must_use]
    pub fn hand_has_any_key(&self) -> bool {
        self.piles.hand().iter().any(|c| c.kind == CardKind::Key)
    }

    /// A still-closed door of this color waiting in the draw pile.
    #[must_use]
    pub fn closed_door_in_draw(&self, color: Color) -> Option<CardId> {
        self.piles
            .draw_pile()
            .iter()
            .rev()
            .find(|c| c.is_door_of(color))
            .map(|c| c.id)
    }

    /// Remaining nightmares in the draw pile. Public knowledge: it follows
    /// from the deck list and the cards already seen.
    #[must_use]
    pub fn nightmares_in_draw(&self) -> usize {
        self.piles
            .draw_pile()
            .iter()
            .filter(|c| c.kind == CardKind::Nightmare)
            .count()
    }

    // === Invariants ===

    /// Check the structural invariants of the game.
    ///
    /// - Every card of the deck list is in exactly one pile
    /// - Limbo is empty unless a decision is pending
    /// - The hand is within its limit when a turn starts
    /// - Door piles hold only doors of their color, never too many
    pub fn verify_invariants(&self) -> Result<(), String> {
        let expected: Vec<Card> = self.config.deck.build();
        self.piles.verify_conservation(&expected)?;

        if !matches!(self.phase, Phase::ResolvingEffect) && !self.piles.limbo().is_empty() {
            return Err(format!(
                "limbo holds {} cards while {}",
                self.piles.limbo().len(),
                self.phase.name()
            ));
        }

        if self.phase == Phase::AwaitingDraw && self.piles.hand().len() > self.config.hand_limit {
            return Err(format!(
                "hand holds {} cards at the start of a turn, limit is {}",
                self.piles.hand().len(),
                self.config.hand_limit
            ));
        }

        for color in Color::ALL {
            let pile = self.piles.door_pile(color);
            if pile.iter().any(|c| !c.is_door_of(color)) {
                return Err(format!("{} door pile holds a foreign card", color));
            }
            if pile.len() > self.config.doors_of(color) {
                return Err(format!("{} door pile holds {} doors", color, pile.len()));
            }
        }

        if self.phase == Phase::ResolvingEffect && self.current_decision().is_none() {
            return Err("resolving an effect with no decision pending".to_string());
        }

        Ok(())
    }
}
