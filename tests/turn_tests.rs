//! Turn flow tests.
//!
//! These tests drive whole turns through the `Game` controller:
//! - Drawing into the action phase
//! - Playing, discarding and passing
//! - Running out of cards

use dreamium::{
    CardId, CardKind, CardSpec, Color, EngineError, Game, IllegalAction, Intent, Layout, LossReason, Outcome,
    Phase, RuleConfig,
};

fn hand_card(game: &Game, kind: CardKind) -> CardId {
    game.state()
        .piles()
        .hand()
        .iter()
        .find(|c| c.kind == kind)
        .expect("card of that kind in hand")
        .id
}

fn five_plain() -> [CardSpec; 5] {
    [
        CardSpec::sun(Color::Red),
        CardSpec::moon(Color::Red),
        CardSpec::sun(Color::Blue),
        CardSpec::moon(Color::Blue),
        CardSpec::sun(Color::Green),
    ]
}

/// Test that a fresh game waits for the draw with a full hand.
#[test]
fn test_fresh_game_awaits_draw() {
    let game = Game::new(2024);
    let view = game.snapshot();

    assert_eq!(view.phase, Phase::AwaitingDraw);
    assert_eq!(view.hand.len(), 5);
    assert!(view.draw_count > 0);
    assert_eq!(view.limbo_count, 0);
    assert!(game.state().verify_invariants().is_ok());
}

/// Test that drawing a plain card moves exactly one card into the hand.
#[test]
fn test_draw_plain_card() {
    let layout = Layout::new()
        .with_hand(five_plain())
        .with_draw_top([CardSpec::moon(Color::Yellow)]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();
    let draw_before = game.snapshot().draw_count;

    game.apply_intent(&Intent::Draw).unwrap();

    let view = game.snapshot();
    assert_eq!(view.phase, Phase::AwaitingAction);
    assert_eq!(view.hand.len(), 6);
    assert_eq!(view.draw_count, draw_before - 1);
    assert!(view
        .hand
        .iter()
        .any(|c| c.matches(CardKind::Moon, Some(Color::Yellow))));
}

/// Test that playing a card ends the turn and starts the next.
#[test]
fn test_play_ends_turn() {
    let layout = Layout::new()
        .with_hand(five_plain())
        .with_draw_top([CardSpec::moon(Color::Yellow)]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();

    game.apply_intent(&Intent::Draw).unwrap();
    let sun = hand_card(&game, CardKind::Sun);
    game.apply_intent(&Intent::PlayCard(sun)).unwrap();

    let view = game.snapshot();
    assert_eq!(view.phase, Phase::AwaitingDraw);
    assert_eq!(view.turn, 2);
    assert_eq!(view.hand.len(), 5);
    assert_eq!(view.labyrinth.len(), 1);
    assert_eq!(view.run.len, 1);
}

/// Test that discarding a plain card ends the turn without a prophecy.
#[test]
fn test_discard_plain_card() {
    let layout = Layout::new()
        .with_hand(five_plain())
        .with_draw_top([CardSpec::moon(Color::Yellow)]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();

    game.apply_intent(&Intent::Draw).unwrap();
    let moon = hand_card(&game, CardKind::Moon);
    game.apply_intent(&Intent::DiscardCard(moon)).unwrap();

    let view = game.snapshot();
    assert_eq!(view.phase, Phase::AwaitingDraw);
    assert_eq!(view.discard_count, 1);
    assert_eq!(view.discard_top.map(|c| c.id), Some(moon));
}

/// Test that a card cannot follow another of the same kind.
#[test]
fn test_same_symbol_rejected() {
    let layout = Layout::new()
        .with_hand(five_plain())
        .with_draw_top([CardSpec::moon(Color::Yellow), CardSpec::sun(Color::Yellow)]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();

    game.apply_intent(&Intent::Draw).unwrap();
    let sun = hand_card(&game, CardKind::Sun);
    game.apply_intent(&Intent::PlayCard(sun)).unwrap();
    game.apply_intent(&Intent::Draw).unwrap();

    let before = game.clone();
    let sun = hand_card(&game, CardKind::Sun);
    let err = game.apply_intent(&Intent::PlayCard(sun)).unwrap_err();

    assert_eq!(err, EngineError::Illegal(IllegalAction::SameSymbol(CardKind::Sun)));
    assert_eq!(game, before);
}

/// Test that cards outside the hand cannot be played.
#[test]
fn test_play_card_not_in_hand() {
    let layout = Layout::new()
        .with_hand(five_plain())
        .with_draw_top([CardSpec::moon(Color::Yellow)]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();
    game.apply_intent(&Intent::Draw).unwrap();

    let elsewhere = game.state().piles().draw_pile().iter().next().unwrap().id;
    let err = game.apply_intent(&Intent::PlayCard(elsewhere)).unwrap_err();

    assert_eq!(err, EngineError::Illegal(IllegalAction::NotInHand(elsewhere)));
}

/// Test that passing is refused while the hand is over its limit.
#[test]
fn test_pass_needs_hand_within_limit() {
    let layout = Layout::new()
        .with_hand(five_plain())
        .with_draw_top([CardSpec::moon(Color::Yellow)]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();
    game.apply_intent(&Intent::Draw).unwrap();

    let err = game.apply_intent(&Intent::Pass).unwrap_err();
    assert_eq!(err, EngineError::Illegal(IllegalAction::HandOverLimit { held: 6, limit: 5 }));
    assert!(!game.legal_intents().contains(&Intent::Pass));
}

/// Test that drawing the last card of the draw pile loses.
#[test]
fn test_last_card_loses() {
    let layout = Layout::new()
        .with_hand(five_plain())
        .with_draw_top([CardSpec::moon(Color::Yellow)])
        .with_rest_discarded();
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();

    game.apply_intent(&Intent::Draw).unwrap();

    assert_eq!(game.outcome(), Outcome::Lost(LossReason::DeckExhausted));
    assert_eq!(game.snapshot().phase, Phase::GameOver(Outcome::Lost(LossReason::DeckExhausted)));
    assert_eq!(
        game.apply_intent(&Intent::Pass).unwrap_err(),
        EngineError::Illegal(IllegalAction::GameOver)
    );
}

/// Test drawing from an already empty pile.
#[test]
fn test_empty_pile_loses() {
    let layout = Layout::new().with_hand(five_plain()).with_rest_discarded();
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();

    game.apply_intent(&Intent::Draw).unwrap();

    assert_eq!(game.outcome(), Outcome::Lost(LossReason::DeckExhausted));
}

/// Test that doors without a matching key are set aside and shuffled back.
#[test]
fn test_door_without_key_set_aside() {
    let layout = Layout::new()
        .with_hand(five_plain())
        .with_draw_top([CardSpec::door(Color::Green), CardSpec::moon(Color::Yellow)]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();
    let draw_before = game.snapshot().draw_count;

    game.apply_intent(&Intent::Draw).unwrap();

    let view = game.snapshot();
    assert_eq!(view.phase, Phase::AwaitingAction);
    assert_eq!(view.limbo_count, 0);
    assert_eq!(view.draw_count, draw_before - 1);
    assert_eq!(view.door(Color::Green).unwrap().opened, 0);
}

/// Test that a loss mid-draw leaves nothing set aside.
#[test]
fn test_loss_discards_set_aside_cards() {
    let layout = Layout::new()
        .with_hand(five_plain())
        .with_draw_top([CardSpec::door(Color::Yellow), CardSpec::moon(Color::Green)])
        .with_rest_discarded();
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();
    let discard_before = game.snapshot().discard_count;

    game.apply_intent(&Intent::Draw).unwrap();

    let view = game.snapshot();
    assert_eq!(view.outcome, Outcome::Lost(LossReason::DeckExhausted));
    assert_eq!(view.limbo_count, 0);
    assert_eq!(view.draw_count, 0);
    assert_eq!(view.discard_count, discard_before + 1);
    assert!(view.discard_top.is_some_and(|c| c.is_door_of(Color::Yellow)));
    assert_eq!(view.door(Color::Yellow).unwrap().opened, 0);
    assert_eq!(game.state().verify_invariants(), Ok(()));
}

/// Test quitting mid-turn.
#[test]
fn test_quit_from_action() {
    let layout = Layout::new()
        .with_hand(five_plain())
        .with_draw_top([CardSpec::moon(Color::Yellow)]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 1).unwrap();
    game.apply_intent(&Intent::Draw).unwrap();

    game.apply_intent(&Intent::Quit).unwrap();

    assert_eq!(game.outcome(), Outcome::Lost(LossReason::Abandoned));
}
