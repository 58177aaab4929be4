//! The turn state machine.
//!
//! ```text
//! AwaitingDraw --Draw--> [FillHand, BeginAction] --> AwaitingAction
//! AwaitingAction --Play/Discard/Pass--> [.., EndTurn] --> TurnComplete --> AwaitingDraw
//! any queued decision --> ResolvingEffect --decision--> queue resumes
//! ```
//!
//! Every intent is applied to a clone of the state. The queue is then run
//! until the game rests in a phase that needs the player again, or ends.
//! A rejected intent drops the clone, so the committed state never sees a
//! half-applied intent.

use crate::cards::Color;
use crate::core::error::{EngineError, IllegalAction};
use crate::core::{GameState, Intent};
use crate::effects::{EffectResolver, PendingEffect};

use super::phase::{LossReason, Outcome, Phase};

/// Drives a game from one resting phase to the next.
pub struct TurnMachine;

impl TurnMachine {
    /// Apply one intent, returning the resulting state.
    ///
    /// `state` is never modified; on error the caller keeps it as it was.
    pub fn apply(state: &GameState, intent: &Intent) -> Result<GameState, EngineError> {
        if state.is_over() {
            return Err(IllegalAction::GameOver.into());
        }

        let mut next = state.clone();
        Self::step(&mut next, intent)?;
        Self::run_queue(&mut next)?;
        Ok(next)
    }

    fn step(state: &mut GameState, intent: &Intent) -> Result<(), EngineError> {
        if *intent == Intent::Quit {
            EffectResolver::finish(state, Outcome::Lost(LossReason::Abandoned));
            return Ok(());
        }

        match state.phase {
            Phase::AwaitingDraw => Self::on_draw(state, intent),
            Phase::AwaitingAction => Self::on_action(state, intent),
            Phase::ResolvingEffect => Self::on_decision(state, intent),
            Phase::TurnComplete => Err(EngineError::Invariant("turn left half complete".to_string())),
            Phase::GameOver(_) => Err(IllegalAction::GameOver.into()),
        }
    }

    fn on_draw(state: &mut GameState, intent: &Intent) -> Result<(), EngineError> {
        match intent {
            Intent::Draw => {
                tracing::debug!(turn = state.turn, "draw phase");
                state.pending.push_back(PendingEffect::FillHand);
                state.pending.push_back(PendingEffect::BeginAction);
                Ok(())
            }
            Intent::OpenDoor(color) => Err(Self::door_refusal(state, *color)),
            other => Err(Self::wrong_phase(other, state.phase.name())),
        }
    }

    fn on_action(state: &mut GameState, intent: &Intent) -> Result<(), EngineError> {
        match intent {
            Intent::PlayCard(id) => EffectResolver::play_card(state, *id)?,
            Intent::DiscardCard(id) => EffectResolver::discard_from_hand(state, *id)?,
            Intent::Pass => {
                let held = state.piles.hand().len();
                let limit = state.config().hand_limit;
                if held > limit {
                    return Err(IllegalAction::HandOverLimit { held, limit }.into());
                }
            }
            Intent::OpenDoor(color) => return Err(Self::door_refusal(state, *color)),
            other => return Err(Self::wrong_phase(other, state.phase.name())),
        }

        state.pending.push_back(PendingEffect::EndTurn);
        Ok(())
    }

    fn on_decision(state: &mut GameState, intent: &Intent) -> Result<(), EngineError> {
        let decision = state
            .pending
            .pop_front()
            .ok_or_else(|| EngineError::Invariant("no decision pending".to_string()))?;

        match (decision, intent) {
            (PendingEffect::DoorDrawn { door, last_card }, Intent::UseKey(color)) => {
                EffectResolver::use_key(state, door, last_card, *color)
            }
            (PendingEffect::DoorDrawn { door, last_card }, Intent::Pass) => {
                EffectResolver::decline_door(state, door, last_card);
                Ok(())
            }

            (PendingEffect::Nightmare { nightmare }, Intent::DiscardCard(id)) => {
                EffectResolver::discard_key_for_nightmare(state, nightmare, *id)
            }
            (PendingEffect::Nightmare { nightmare }, Intent::DiscardHand) => {
                EffectResolver::discard_hand(state, nightmare)
            }
            (PendingEffect::Nightmare { nightmare }, Intent::RevealTop) => {
                EffectResolver::reveal_top(state, nightmare)
            }
            (PendingEffect::Nightmare { nightmare }, Intent::Endure) => EffectResolver::endure(state, nightmare),

            (PendingEffect::Prophecy { revealed }, Intent::Prophesy { discard, order }) => {
                EffectResolver::prophesy(state, &revealed, *discard, order)
            }

            (PendingEffect::RunCompleted { color }, Intent::OpenDoor(requested)) => {
                EffectResolver::open_door_with_run(state, color, *requested)
            }
            (PendingEffect::RunCompleted { color }, Intent::Pass) => {
                EffectResolver::decline_run(color);
                Ok(())
            }

            (decision, intent) => Err(Self::wrong_phase(intent, decision.name())),
        }
    }

    /// Run queued effects until the game needs the player or ends.
    fn run_queue(state: &mut GameState) -> Result<(), EngineError> {
        loop {
            if state.is_over() {
                return Ok(());
            }
            if state.all_doors_open() {
                EffectResolver::finish(state, Outcome::Won);
                return Ok(());
            }

            let Some(effect) = state.pending.front().cloned() else {
                return Err(EngineError::Invariant(format!(
                    "effect queue ran dry while {}",
                    state.phase.name()
                )));
            };

            match effect {
                PendingEffect::FillHand => {
                    state.pending.pop_front();
                    EffectResolver::fill_hand(state)?;
                }
                PendingEffect::BeginAction => {
                    state.pending.pop_front();
                    state.phase = Phase::AwaitingAction;
                    return Ok(());
                }
                PendingEffect::EndTurn => {
                    state.pending.pop_front();
                    return Self::complete_turn(state);
                }
                decision => {
                    tracing::debug!(decision = decision.name(), "waiting for the player");
                    state.phase = Phase::ResolvingEffect;
                    return Ok(());
                }
            }
        }
    }

    /// End-of-turn checks, then on to the next turn.
    fn complete_turn(state: &mut GameState) -> Result<(), EngineError> {
        state.phase = Phase::TurnComplete;

        if state.all_doors_open() {
            EffectResolver::finish(state, Outcome::Won);
            return Ok(());
        }

        let held = state.piles.hand().len();
        let limit = state.config().hand_limit;
        if held > limit {
            return Err(EngineError::Invariant(format!(
                "turn ended with {} cards in hand, limit is {}",
                held, limit
            )));
        }

        if state.piles.draw_pile().is_empty() {
            EffectResolver::finish(state, Outcome::Lost(LossReason::DeckExhausted));
            return Ok(());
        }
        if state.nightmares_endured > state.config().nightmare_tolerance {
            EffectResolver::finish(state, Outcome::Lost(LossReason::NightmareOverrun));
            return Ok(());
        }

        state.turn += 1;
        state.phase = Phase::AwaitingDraw;
        tracing::info!(turn = state.turn, draw = state.piles.draw_pile().len(), "turn complete");
        Ok(())
    }

    /// Doors only open from a completed run.
    fn door_refusal(state: &GameState, color: Color) -> EngineError {
        let refusal = if state.door_complete(color) {
            IllegalAction::DoorAlreadyOpen(color)
        } else {
            IllegalAction::NoRunToOpen(color)
        };
        refusal.into()
    }

    fn wrong_phase(intent: &Intent, phase: &'static str) -> EngineError {
        IllegalAction::WrongPhase {
            intent: intent.name(),
            phase,
        }
        .into()
    }
}
