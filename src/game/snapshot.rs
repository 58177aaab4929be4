//! What the player may see.
//!
//! `RenderableView` is a plain, serializable picture of a game for a front
//! end. It carries sizes and public tallies of the draw pile but never its
//! order; the only draw-pile cards it names are those a prophecy revealed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind, Color};
use crate::core::{GameState, Run};
use crate::effects::{EffectResolver, Escapes, PendingEffect};
use crate::turn::{Outcome, Phase};

/// Opened and total doors of one color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorProgress {
    pub color: Color,
    pub opened: usize,
    pub total: usize,
}

impl DoorProgress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.opened >= self.total
    }
}

/// Discarded cards of one kind and color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscardTally {
    pub kind: CardKind,
    pub color: Option<Color>,
    pub count: usize,
}

/// The decision the player faces, with what they need to make it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionView {
    DoorDrawn { door: Card },
    Nightmare { nightmare: Card, escapes: Escapes },
    /// Revealed cards, topmost first.
    Prophecy { revealed: Vec<Card> },
    RunCompleted { color: Color },
}

/// A snapshot of everything visible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderableView {
    pub turn: u32,
    pub phase: Phase,
    pub hand: Vec<Card>,
    /// Played cards, oldest first.
    pub labyrinth: Vec<Card>,
    pub run: Run,
    pub discard_top: Option<Card>,
    pub discard_count: usize,
    pub discard_tally: Vec<DiscardTally>,
    pub draw_count: usize,
    pub nightmares_in_draw: usize,
    pub doors: Vec<DoorProgress>,
    pub limbo_count: usize,
    pub decision: Option<DecisionView>,
    pub nightmares_endured: u32,
    pub outcome: Outcome,
}

impl RenderableView {
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        let piles = state.piles();

        Self {
            turn: state.turn(),
            phase: state.phase(),
            hand: piles.hand().iter().copied().collect(),
            labyrinth: piles.labyrinth().iter().copied().collect(),
            run: state.run(),
            discard_top: piles.discard().peek_top().copied(),
            discard_count: piles.discard().len(),
            discard_tally: tally(piles.discard().iter()),
            draw_count: piles.draw_pile().len(),
            nightmares_in_draw: state.nightmares_in_draw(),
            doors: Color::ALL
                .iter()
                .map(|&color| DoorProgress {
                    color,
                    opened: state.doors_opened(color),
                    total: state.config().doors_of(color),
                })
                .collect(),
            limbo_count: piles.limbo().len(),
            decision: state.current_decision().and_then(|d| decision_view(state, d)),
            nightmares_endured: state.nightmares_endured(),
            outcome: state.outcome(),
        }
    }

    /// Door progress of one color.
    #[must_use]
    pub fn door(&self, color: Color) -> Option<&DoorProgress> {
        self.doors.iter().find(|d| d.color == color)
    }
}

fn tally<'a>(cards: impl Iterator<Item = &'a Card>) -> Vec<DiscardTally> {
    let mut counts: FxHashMap<(CardKind, Option<Color>), usize> = FxHashMap::default();
    for card in cards {
        *counts.entry((card.kind, card.color)).or_insert(0) += 1;
    }

    let mut tally: Vec<DiscardTally> = counts
        .into_iter()
        .map(|((kind, color), count)| DiscardTally { kind, color, count })
        .collect();
    tally.sort_by_key(|t| (t.color, t.kind));
    tally
}

fn decision_view(state: &GameState, decision: &PendingEffect) -> Option<DecisionView> {
    let view = match decision {
        PendingEffect::DoorDrawn { door, .. } => DecisionView::DoorDrawn { door: *door },
        PendingEffect::Nightmare { nightmare } => DecisionView::Nightmare {
            nightmare: *nightmare,
            escapes: EffectResolver::nightmare_escapes(state),
        },
        PendingEffect::Prophecy { revealed } => DecisionView::Prophecy {
            revealed: revealed
                .iter()
                .filter_map(|&id| state.piles().draw_pile().get(id).copied())
                .collect(),
        },
        PendingEffect::RunCompleted { color } => DecisionView::RunCompleted { color: *color },
        PendingEffect::FillHand | PendingEffect::BeginAction | PendingEffect::EndTurn => return None,
    };
    Some(view)
}
