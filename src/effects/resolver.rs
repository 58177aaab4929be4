//! Effect resolution: what a drawn, played or discarded card does.
//!
//! `EffectResolver` holds the card rules. Each function mutates a
//! `GameState` that the turn machine has already cloned, so a rejected
//! request can return early at any point without touching the committed
//! game. Follow-up decisions are pushed to the front of the effect queue;
//! a terminal outcome is recorded with `finish`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardId, CardKind, Color};
use crate::core::error::{EngineError, IllegalAction};
use crate::core::GameState;
use crate::turn::{LossReason, Outcome, Phase};
use crate::zones::Location;

use super::pending::{PendingEffect, Revealed};

/// A way out of a drawn nightmare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Escape {
    /// Discard a key from hand.
    DiscardKey,
    /// Discard the whole hand and deal a fresh one.
    DiscardHand,
    /// Discard the top cards of the draw pile.
    RevealTop,
    /// Take the nightmare without any cost, within the tolerance.
    Endure,
}

pub type Escapes = SmallVec<[Escape; 4]>;

/// Applies card rules to game state.
pub struct EffectResolver;

impl EffectResolver {
    // === Dealing and drawing ===

    /// Draw until the hand holds `target` cards.
    ///
    /// Doors and nightmares are set aside in limbo and shuffled back into
    /// the draw pile once the hand is full. Returns `true` if a draw left
    /// the draw pile empty, in which case dealing stops early.
    pub fn deal(state: &mut GameState, target: usize) -> bool {
        let mut exhausted = false;

        while state.piles.hand().len() < target {
            let Ok(card) = state.piles.pile_mut(Location::Draw).draw() else {
                exhausted = true;
                break;
            };
            let to = if card.kind.is_labyrinth() {
                Location::Hand
            } else {
                Location::Limbo
            };
            state.piles.pile_mut(to).push_top(card);
            tracing::debug!(card = %card, ?to, "dealt");

            if state.piles.draw_pile().is_empty() {
                exhausted = true;
                break;
            }
        }

        state.piles.return_limbo(&mut state.rng);
        exhausted
    }

    /// Draw until the hand holds one card past the limit.
    ///
    /// Stops at the first card that needs a decision, requeueing itself
    /// behind that decision. Set-aside cards are shuffled back before the
    /// decision, so "last card" means the draw pile is empty after that.
    pub fn fill_hand(state: &mut GameState) -> Result<(), EngineError> {
        let target = state.config().hand_limit + 1;

        while state.piles.hand().len() < target {
            if state.piles.draw_pile().is_empty() {
                Self::finish(state, Outcome::Lost(LossReason::DeckExhausted));
                return Ok(());
            }

            let card = state.piles.move_top(Location::Draw, Location::Limbo)?;

            match card.kind {
                CardKind::Sun | CardKind::Moon | CardKind::Key => {
                    state.piles.move_card(card.id, Location::Limbo, Location::Hand)?;
                }
                CardKind::Door => {
                    let color = Self::color_of(&card)?;
                    if state.hand_has_key(color) {
                        Self::settle_limbo(state, Some(card.id))?;
                        let last_card = state.piles.draw_pile().is_empty();
                        Self::await_decision(
                            state,
                            PendingEffect::DoorDrawn {
                                door: card,
                                last_card,
                            },
                        );
                        return Ok(());
                    }
                    tracing::debug!(door = %card, "door set aside, no matching key");
                }
                CardKind::Nightmare => {
                    Self::settle_limbo(state, Some(card.id))?;
                    if state.piles.draw_pile().is_empty() {
                        Self::finish(state, Outcome::Lost(LossReason::DeckExhausted));
                        return Ok(());
                    }
                    if Self::nightmare_escapes(state).is_empty() {
                        Self::finish(state, Outcome::Lost(LossReason::NightmareOverrun));
                        return Ok(());
                    }
                    Self::await_decision(state, PendingEffect::Nightmare { nightmare: card });
                    return Ok(());
                }
            }

            if state.piles.draw_pile().is_empty() {
                Self::finish(state, Outcome::Lost(LossReason::DeckExhausted));
                return Ok(());
            }
        }

        Self::settle_limbo(state, None)
    }

    // === Drawn doors ===

    /// Open the drawn door with a key of its color from hand.
    pub fn use_key(state: &mut GameState, door: Card, last_card: bool, requested: Color) -> Result<(), EngineError> {
        let color = Self::color_of(&door)?;
        if requested != color {
            return Err(IllegalAction::WrongDoor {
                drawn: color,
                requested,
            }
            .into());
        }
        let key = state
            .key_in_hand(color)
            .ok_or(IllegalAction::NoMatchingKey(color))?;

        state.piles.move_card(key, Location::Hand, Location::Discard)?;
        state.piles.move_card(door.id, Location::Limbo, Location::Door(color))?;
        tracing::info!(%color, opened = state.doors_opened(color), "door opened with a key");

        if last_card && !state.all_doors_open() {
            Self::finish(state, Outcome::Lost(LossReason::DeckExhausted));
        }
        Ok(())
    }

    /// Leave the drawn door closed. It stays set aside in limbo.
    pub fn decline_door(state: &mut GameState, door: Card, last_card: bool) {
        tracing::debug!(door = %door, "door left closed");
        if last_card {
            Self::finish(state, Outcome::Lost(LossReason::DeckExhausted));
        }
    }

    // === Nightmares ===

    /// Escapes currently open to the player.
    #[must_use]
    pub fn nightmare_escapes(state: &GameState) -> Escapes {
        let mut escapes = Escapes::new();
        if state.hand_has_any_key() {
            escapes.push(Escape::DiscardKey);
        }
        if !state.piles.hand().is_empty() {
            escapes.push(Escape::DiscardHand);
        }
        if state.piles.draw_pile().len() >= state.config().nightmare_reveal {
            escapes.push(Escape::RevealTop);
        }
        if state.nightmares_endured < state.config().nightmare_tolerance {
            escapes.push(Escape::Endure);
        }
        escapes
    }

    /// Escape by discarding a key.
    pub fn discard_key_for_nightmare(state: &mut GameState, nightmare: Card, key: CardId) -> Result<(), EngineError> {
        let card = *state
            .piles
            .hand()
            .get(key)
            .ok_or(IllegalAction::NotInHand(key))?;
        if card.kind != CardKind::Key {
            return Err(IllegalAction::NotAKey(key).into());
        }

        state.piles.move_card(key, Location::Hand, Location::Discard)?;
        Self::discard_nightmare(state, nightmare)
    }

    /// Escape by discarding the hand and dealing a fresh one.
    pub fn discard_hand(state: &mut GameState, nightmare: Card) -> Result<(), EngineError> {
        if state.piles.hand().is_empty() {
            return Err(IllegalAction::EmptyHand.into());
        }

        let hand = state.piles.pile_mut(Location::Hand).take_all();
        let discarded = hand.len();
        for card in hand {
            state.piles.pile_mut(Location::Discard).push_top(card);
        }
        Self::discard_nightmare(state, nightmare)?;
        tracing::debug!(discarded, "hand discarded to a nightmare");

        let limit = state.config().hand_limit;
        if Self::deal(state, limit) {
            Self::finish(state, Outcome::Lost(LossReason::DeckExhausted));
        }
        Ok(())
    }

    /// Escape by discarding the top of the draw pile.
    ///
    /// Labyrinth cards among them are discarded; doors and nightmares are
    /// shuffled back.
    pub fn reveal_top(state: &mut GameState, nightmare: Card) -> Result<(), EngineError> {
        let needed = state.config().nightmare_reveal;
        let available = state.piles.draw_pile().len();
        if available < needed {
            return Err(IllegalAction::NotEnoughCards { available, needed }.into());
        }

        Self::discard_nightmare(state, nightmare)?;
        for _ in 0..needed {
            let card = state.piles.move_top(Location::Draw, Location::Limbo)?;
            if card.kind.is_labyrinth() {
                state.piles.move_card(card.id, Location::Limbo, Location::Discard)?;
            }
        }
        Self::settle_limbo(state, None)?;

        if state.piles.draw_pile().is_empty() {
            Self::finish(state, Outcome::Lost(LossReason::DeckExhausted));
        }
        Ok(())
    }

    /// Endure the nightmare, using up some tolerance.
    pub fn endure(state: &mut GameState, nightmare: Card) -> Result<(), EngineError> {
        if state.nightmares_endured >= state.config().nightmare_tolerance {
            return Err(IllegalAction::CannotEndure.into());
        }
        state.nightmares_endured += 1;
        Self::discard_nightmare(state, nightmare)
    }

    fn discard_nightmare(state: &mut GameState, nightmare: Card) -> Result<(), EngineError> {
        state
            .piles
            .move_card(nightmare.id, Location::Limbo, Location::Discard)?;
        tracing::info!(nightmare = %nightmare, "nightmare resolved");
        Ok(())
    }

    // === Action phase ===

    /// Play a hand card to the labyrinth.
    ///
    /// A card may not follow a card of the same kind. Completing a run
    /// while a closed door of its color is still in the draw pile queues
    /// the choice to open it.
    pub fn play_card(state: &mut GameState, id: CardId) -> Result<(), EngineError> {
        let card = *state
            .piles
            .hand()
            .get(id)
            .ok_or(IllegalAction::NotInHand(id))?;
        if let Some(top) = state.piles.labyrinth().peek_top() {
            if top.kind == card.kind {
                return Err(IllegalAction::SameSymbol(card.kind).into());
            }
        }
        let color = Self::color_of(&card)?;

        state.piles.move_card(id, Location::Hand, Location::Labyrinth)?;

        let run_length = state.config().run_length;
        if state.run.extend(color, run_length) {
            tracing::debug!(%color, "run completed");
            if state.closed_door_in_draw(color).is_some() {
                state.pending.push_front(PendingEffect::RunCompleted { color });
            }
        }
        Ok(())
    }

    /// Discard a hand card. A key reveals a prophecy.
    pub fn discard_from_hand(state: &mut GameState, id: CardId) -> Result<(), EngineError> {
        let card = state.piles.move_card(id, Location::Hand, Location::Discard).map_err(|_| IllegalAction::NotInHand(id))?;
        if card.kind == CardKind::Key {
            Self::reveal_prophecy(state);
        }
        Ok(())
    }

    fn reveal_prophecy(state: &mut GameState) {
        let size = state.config().prophecy_size;
        let cards = state.piles.draw_pile().peek_top_n(size);

        if cards.is_empty() {
            tracing::debug!("prophecy found an empty draw pile");
            return;
        }
        if cards.iter().all(|c| c.kind == CardKind::Door) {
            Self::finish(state, Outcome::Lost(LossReason::DoorsOnlyProphecy));
            return;
        }

        let revealed: Revealed = cards.iter().map(|c| c.id).collect();
        tracing::debug!(revealed = revealed.len(), "prophecy revealed");
        state.pending.push_front(PendingEffect::Prophecy { revealed });
    }

    /// Answer a prophecy: discard one revealed card, return the others
    /// with `order[0]` on top.
    pub fn prophesy(state: &mut GameState, revealed: &[CardId], discard: CardId, order: &[CardId]) -> Result<(), EngineError> {
        if !revealed.contains(&discard) {
            return Err(IllegalAction::NotRevealed(discard).into());
        }

        let mut expected: Revealed = revealed.iter().copied().filter(|&id| id != discard).collect();
        let mut given: Revealed = order.iter().copied().collect();
        expected.sort_unstable();
        given.sort_unstable();
        if expected != given {
            return Err(IllegalAction::BadProphecyOrder.into());
        }

        let mut cards: SmallVec<[Card; 5]> = SmallVec::new();
        for &id in revealed {
            cards.push(state.piles.pile_mut(Location::Draw).remove(id)?);
        }

        let dropped = cards
            .iter()
            .find(|c| c.id == discard)
            .copied()
            .ok_or_else(|| EngineError::Invariant(format!("revealed card {} vanished", discard)))?;
        if dropped.kind == CardKind::Door {
            return Err(IllegalAction::CannotDiscardDoor.into());
        }
        state.piles.pile_mut(Location::Discard).push_top(dropped);

        for id in order.iter().rev() {
            let card = cards
                .iter()
                .find(|c| c.id == *id)
                .copied()
                .ok_or_else(|| EngineError::Invariant(format!("revealed card {} vanished", id)))?;
            state.piles.pile_mut(Location::Draw).push_top(card);
        }

        tracing::debug!(discarded = %dropped, returned = order.len(), "prophecy arranged");
        Ok(())
    }

    // === Completed runs ===

    /// Open a door of the run's color: the run goes to the discard pile and
    /// a closed door of that color moves from the draw pile to its door pile.
    pub fn open_door_with_run(state: &mut GameState, run_color: Color, requested: Color) -> Result<(), EngineError> {
        if requested != run_color || !state.run.is_complete(state.config().run_length) {
            return Err(Self::door_refusal(state, requested).into());
        }
        let door = state
            .closed_door_in_draw(run_color)
            .ok_or_else(|| Self::door_refusal(state, requested))?;

        for _ in 0..state.config().run_length {
            state.piles.move_top(Location::Labyrinth, Location::Discard)?;
        }
        state
            .piles
            .move_card(door, Location::Draw, Location::Door(run_color))?;
        state.piles.shuffle(Location::Draw, &mut state.rng);
        state.run.reset();

        tracing::info!(
            color = %run_color,
            opened = state.doors_opened(run_color),
            "door opened with a run"
        );
        Ok(())
    }

    /// Keep the run in the labyrinth and leave the door closed.
    pub fn decline_run(color: Color) {
        tracing::debug!(%color, "completed run kept");
    }

    fn door_refusal(state: &GameState, color: Color) -> IllegalAction {
        if state.door_complete(color) {
            IllegalAction::DoorAlreadyOpen(color)
        } else {
            IllegalAction::NoRunToOpen(color)
        }
    }

    // === Bookkeeping ===

    /// End the game.
    ///
    /// Cards still set aside go to the discard pile in the order they were
    /// set aside. The draw pile is left untouched.
    pub fn finish(state: &mut GameState, outcome: Outcome) {
        let set_aside = state.piles.pile_mut(Location::Limbo).take_all();
        if !set_aside.is_empty() {
            tracing::debug!(cards = set_aside.len(), "set-aside cards discarded at game over");
        }
        for card in set_aside {
            state.piles.pile_mut(Location::Discard).push_top(card);
        }

        state.phase = Phase::GameOver(outcome);
        state.pending.clear();
        match outcome {
            Outcome::Won => tracing::info!(turn = state.turn, "every door is open, game won"),
            Outcome::Lost(reason) => tracing::info!(turn = state.turn, %reason, "game lost"),
            Outcome::InProgress => {}
        }
    }

    /// Shuffle set-aside cards back, keeping the card under resolution.
    fn settle_limbo(state: &mut GameState, keep: Option<CardId>) -> Result<(), EngineError> {
        let kept = keep
            .map(|id| state.piles.pile_mut(Location::Limbo).remove(id))
            .transpose()?;
        state.piles.return_limbo(&mut state.rng);
        if let Some(card) = kept {
            state.piles.pile_mut(Location::Limbo).push_top(card);
        }
        Ok(())
    }

    /// Queue a decision ahead of the rest of the draw.
    fn await_decision(state: &mut GameState, decision: PendingEffect) {
        tracing::debug!(decision = decision.name(), "decision pending");
        state.pending.push_front(PendingEffect::FillHand);
        state.pending.push_front(decision);
    }

    fn color_of(card: &Card) -> Result<Color, EngineError> {
        card.color
            .ok_or_else(|| EngineError::Invariant(format!("{} has no color", card)))
    }
}
