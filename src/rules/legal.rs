//! Legal intent enumeration.
//!
//! Lists every intent the turn machine would accept in a state, apart from
//! `Quit`, which is always accepted while the game runs. Used by front ends
//! to offer choices and by tests to drive random playouts.

use crate::cards::{CardId, CardKind};
use crate::core::{GameState, Intent};
use crate::effects::{EffectResolver, Escape, PendingEffect};
use crate::turn::Phase;

/// Every legal intent except `Quit`.
#[must_use]
pub fn legal_intents(state: &GameState) -> Vec<Intent> {
    match state.phase() {
        Phase::AwaitingDraw => vec![Intent::Draw],
        Phase::AwaitingAction => action_intents(state),
        Phase::ResolvingEffect => state
            .current_decision()
            .map(|decision| decision_intents(state, decision))
            .unwrap_or_default(),
        Phase::TurnComplete | Phase::GameOver(_) => Vec::new(),
    }
}

fn action_intents(state: &GameState) -> Vec<Intent> {
    let hand = state.piles().hand();
    let blocked = state.piles().labyrinth().peek_top().map(|c| c.kind);

    let mut intents: Vec<Intent> = hand
        .iter()
        .filter(|c| Some(c.kind) != blocked)
        .map(|c| Intent::PlayCard(c.id))
        .collect();
    intents.extend(hand.iter().map(|c| Intent::DiscardCard(c.id)));

    if hand.len() <= state.config().hand_limit {
        intents.push(Intent::Pass);
    }
    intents
}

fn decision_intents(state: &GameState, decision: &PendingEffect) -> Vec<Intent> {
    match decision {
        PendingEffect::DoorDrawn { door, .. } => {
            let mut intents = Vec::with_capacity(2);
            if let Some(color) = door.color.filter(|&c| state.hand_has_key(c)) {
                intents.push(Intent::UseKey(color));
            }
            intents.push(Intent::Pass);
            intents
        }
        PendingEffect::Nightmare { .. } => {
            let mut intents = Vec::new();
            for escape in EffectResolver::nightmare_escapes(state) {
                match escape {
                    Escape::DiscardKey => intents.extend(
                        state
                            .piles()
                            .hand()
                            .iter()
                            .filter(|c| c.kind == CardKind::Key)
                            .map(|c| Intent::DiscardCard(c.id)),
                    ),
                    Escape::DiscardHand => intents.push(Intent::DiscardHand),
                    Escape::RevealTop => intents.push(Intent::RevealTop),
                    Escape::Endure => intents.push(Intent::Endure),
                }
            }
            intents
        }
        PendingEffect::Prophecy { revealed } => prophecy_intents(state, revealed),
        PendingEffect::RunCompleted { color } => vec![Intent::OpenDoor(*color), Intent::Pass],
        PendingEffect::FillHand | PendingEffect::BeginAction | PendingEffect::EndTurn => Vec::new(),
    }
}

/// Every (discard, order) answer: any non-door may go, the rest in any order.
fn prophecy_intents(state: &GameState, revealed: &[CardId]) -> Vec<Intent> {
    let draw = state.piles().draw_pile();
    let mut intents = Vec::new();

    for &discard in revealed {
        let discardable = draw.get(discard).is_some_and(|c| c.kind != CardKind::Door);
        if !discardable {
            continue;
        }
        let rest: Vec<CardId> = revealed.iter().copied().filter(|&id| id != discard).collect();
        for order in permutations(&rest) {
            intents.push(Intent::Prophesy { discard, order });
        }
    }
    intents
}

fn permutations(items: &[CardId]) -> Vec<Vec<CardId>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }

    let mut out = Vec::new();
    for (i, &first) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            out.push(tail);
        }
    }
    out
}
