//! Door tests.
//!
//! Doors open two ways:
//! - A completed same-color run in the labyrinth
//! - A key from hand when the door itself is drawn
//!
//! Opening every door wins the game.

use dreamium::{
    CardId, CardKind, CardSpec, Color, DecisionView, EngineError, Game, IllegalAction, Intent, Layout,
    LossReason, Outcome, Phase, RuleConfig,
};

fn hand_card(game: &Game, kind: CardKind, color: Color) -> CardId {
    game.state()
        .piles()
        .hand()
        .iter()
        .find(|c| c.matches(kind, Some(color)))
        .expect("card in hand")
        .id
}

/// Play three red cards over three turns, ending on a completed run.
fn play_red_run(layout: Layout) -> Game {
    let mut game = Game::from_layout(RuleConfig::default(), layout, 7).unwrap();

    for kind in [CardKind::Sun, CardKind::Moon, CardKind::Sun] {
        game.apply_intent(&Intent::Draw).unwrap();
        assert_eq!(game.snapshot().phase, Phase::AwaitingAction);
        let id = hand_card(&game, kind, Color::Red);
        game.apply_intent(&Intent::PlayCard(id)).unwrap();
    }
    game
}

fn red_run_hand() -> [CardSpec; 5] {
    [
        CardSpec::sun(Color::Red),
        CardSpec::moon(Color::Red),
        CardSpec::sun(Color::Red),
        CardSpec::moon(Color::Blue),
        CardSpec::moon(Color::Green),
    ]
}

fn three_plain() -> [CardSpec; 3] {
    [
        CardSpec::sun(Color::Blue),
        CardSpec::sun(Color::Green),
        CardSpec::sun(Color::Yellow),
    ]
}

/// Test that a completed run offers its door and opening consumes the run.
#[test]
fn test_run_opens_door() {
    let layout = Layout::new().with_hand(red_run_hand()).with_draw_top(three_plain());
    let mut game = play_red_run(layout);

    let view = game.snapshot();
    assert_eq!(view.phase, Phase::ResolvingEffect);
    assert_eq!(view.decision, Some(DecisionView::RunCompleted { color: Color::Red }));
    assert_eq!(view.labyrinth.len(), 3);
    assert_eq!(
        game.legal_intents(),
        vec![Intent::OpenDoor(Color::Red), Intent::Pass]
    );

    let discard_before = view.discard_count;
    game.apply_intent(&Intent::OpenDoor(Color::Red)).unwrap();

    let view = game.snapshot();
    assert_eq!(view.door(Color::Red).unwrap().opened, 1);
    assert_eq!(view.discard_count, discard_before + 3);
    assert!(view.labyrinth.is_empty());
    assert_eq!(view.run.len, 0);
    assert_eq!(view.phase, Phase::AwaitingDraw);
    assert_eq!(view.turn, 4);
    assert!(game.state().verify_invariants().is_ok());
}

/// Test that a run only opens a door of its own color.
#[test]
fn test_run_opens_only_its_color() {
    let layout = Layout::new().with_hand(red_run_hand()).with_draw_top(three_plain());
    let mut game = play_red_run(layout);
    let before = game.clone();

    let err = game.apply_intent(&Intent::OpenDoor(Color::Blue)).unwrap_err();

    assert_eq!(err, EngineError::Illegal(IllegalAction::NoRunToOpen(Color::Blue)));
    assert_eq!(game, before);
}

/// Test that declining keeps the run in the labyrinth.
#[test]
fn test_decline_run() {
    let layout = Layout::new().with_hand(red_run_hand()).with_draw_top(three_plain());
    let mut game = play_red_run(layout);

    game.apply_intent(&Intent::Pass).unwrap();

    let view = game.snapshot();
    assert_eq!(view.door(Color::Red).unwrap().opened, 0);
    assert_eq!(view.labyrinth.len(), 3);
    assert_eq!(view.phase, Phase::AwaitingDraw);
}

/// Test that a complete color cannot be opened again.
#[test]
fn test_open_door_twice_rejected() {
    let layout = Layout::new()
        .with_hand(red_run_hand())
        .with_draw_top(three_plain())
        .with_open_door(Color::Red);
    let mut game = play_red_run(layout);

    game.apply_intent(&Intent::OpenDoor(Color::Red)).unwrap();
    assert_eq!(game.snapshot().door(Color::Red).unwrap().opened, 2);
    assert_eq!(game.snapshot().phase, Phase::AwaitingDraw);

    let err = game.apply_intent(&Intent::OpenDoor(Color::Red)).unwrap_err();
    assert_eq!(err, EngineError::Illegal(IllegalAction::DoorAlreadyOpen(Color::Red)));
}

/// Test that a run of an already complete color raises no decision.
#[test]
fn test_run_of_complete_color_is_plain() {
    let layout = Layout::new()
        .with_hand(red_run_hand())
        .with_draw_top(three_plain())
        .with_open_door(Color::Red)
        .with_open_door(Color::Red);
    let game = play_red_run(layout);

    let view = game.snapshot();
    assert_eq!(view.phase, Phase::AwaitingDraw);
    assert!(view.decision.is_none());
    assert_eq!(view.labyrinth.len(), 3);
}

fn key_hand() -> [CardSpec; 5] {
    [
        CardSpec::key(Color::Red),
        CardSpec::sun(Color::Blue),
        CardSpec::moon(Color::Blue),
        CardSpec::sun(Color::Green),
        CardSpec::moon(Color::Green),
    ]
}

/// Test opening a drawn door with a key.
#[test]
fn test_key_opens_drawn_door() {
    let layout = Layout::new().with_hand(key_hand()).with_draw_top([
        CardSpec::door(Color::Red),
        CardSpec::sun(Color::Yellow),
        CardSpec::moon(Color::Yellow),
    ]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 7).unwrap();

    game.apply_intent(&Intent::Draw).unwrap();

    let view = game.snapshot();
    assert_eq!(view.phase, Phase::ResolvingEffect);
    assert!(matches!(view.decision, Some(DecisionView::DoorDrawn { door }) if door.is_door_of(Color::Red)));
    assert_eq!(view.limbo_count, 1);
    assert_eq!(game.legal_intents(), vec![Intent::UseKey(Color::Red), Intent::Pass]);

    let err = game.apply_intent(&Intent::UseKey(Color::Blue)).unwrap_err();
    assert_eq!(
        err,
        EngineError::Illegal(IllegalAction::WrongDoor {
            drawn: Color::Red,
            requested: Color::Blue,
        })
    );

    game.apply_intent(&Intent::UseKey(Color::Red)).unwrap();

    let view = game.snapshot();
    assert_eq!(view.door(Color::Red).unwrap().opened, 1);
    assert_eq!(view.phase, Phase::AwaitingAction);
    assert_eq!(view.hand.len(), 6);
    assert_eq!(view.limbo_count, 0);
    assert!(view.hand.iter().all(|c| c.kind != CardKind::Key));
}

/// Test that passing on a drawn door sets it aside.
#[test]
fn test_decline_drawn_door() {
    let layout = Layout::new().with_hand(key_hand()).with_draw_top([
        CardSpec::door(Color::Red),
        CardSpec::sun(Color::Yellow),
    ]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 7).unwrap();
    game.apply_intent(&Intent::Draw).unwrap();

    game.apply_intent(&Intent::Pass).unwrap();

    let view = game.snapshot();
    assert_eq!(view.door(Color::Red).unwrap().opened, 0);
    assert_eq!(view.phase, Phase::AwaitingAction);
    assert_eq!(view.limbo_count, 0);
    assert!(view.hand.iter().any(|c| c.kind == CardKind::Key));
}

fn nearly_won() -> Layout {
    Layout::new()
        .with_hand(key_hand().map(|spec| {
            if spec.kind == CardKind::Key {
                CardSpec::key(Color::Yellow)
            } else {
                spec
            }
        }))
        .with_open_door(Color::Red)
        .with_open_door(Color::Red)
        .with_open_door(Color::Blue)
        .with_open_door(Color::Blue)
        .with_open_door(Color::Green)
        .with_open_door(Color::Green)
        .with_open_door(Color::Yellow)
}

/// Test that opening the last door wins at once.
#[test]
fn test_last_door_wins() {
    let layout = nearly_won().with_draw_top([CardSpec::door(Color::Yellow)]);
    let mut game = Game::from_layout(RuleConfig::default(), layout, 7).unwrap();

    game.apply_intent(&Intent::Draw).unwrap();
    game.apply_intent(&Intent::UseKey(Color::Yellow)).unwrap();

    assert_eq!(game.outcome(), Outcome::Won);
    assert!(game.snapshot().doors.iter().all(|d| d.is_complete()));
    assert!(game.legal_intents().is_empty());
}

/// Test that the last card of the pile can still win as the last door.
#[test]
fn test_last_card_door_can_win() {
    let layout = nearly_won()
        .with_draw_top([CardSpec::door(Color::Yellow)])
        .with_rest_discarded();
    let mut game = Game::from_layout(RuleConfig::default(), layout, 7).unwrap();

    game.apply_intent(&Intent::Draw).unwrap();
    assert_eq!(game.snapshot().draw_count, 0);
    assert_eq!(game.outcome(), Outcome::InProgress);

    let mut declined = game.clone();
    declined.apply_intent(&Intent::Pass).unwrap();
    assert_eq!(declined.outcome(), Outcome::Lost(LossReason::DeckExhausted));

    game.apply_intent(&Intent::UseKey(Color::Yellow)).unwrap();
    assert_eq!(game.outcome(), Outcome::Won);
}

/// Test that set-aside cards are back in the draw pile before a drawn door
/// is decided, so the door is not taken for the last card.
#[test]
fn test_door_decided_after_set_aside_returns() {
    let layout = Layout::new()
        .with_hand(key_hand())
        .with_draw_top([CardSpec::door(Color::Blue), CardSpec::door(Color::Red)])
        .with_rest_discarded();
    let mut game = Game::from_layout(RuleConfig::default(), layout, 7).unwrap();

    game.apply_intent(&Intent::Draw).unwrap();

    let view = game.snapshot();
    assert!(matches!(view.decision, Some(DecisionView::DoorDrawn { door }) if door.is_door_of(Color::Red)));
    assert_eq!(view.draw_count, 1);
    assert_eq!(view.limbo_count, 1);

    let mut declined = game.clone();
    game.apply_intent(&Intent::UseKey(Color::Red)).unwrap();

    // The blue door comes up again and is the real last card
    let view = game.snapshot();
    assert_eq!(view.door(Color::Red).unwrap().opened, 1);
    assert_eq!(view.outcome, Outcome::Lost(LossReason::DeckExhausted));
    assert_eq!(view.draw_count, 0);
    assert_eq!(view.limbo_count, 0);
    assert!(game.state().piles().discard().iter().any(|c| c.is_door_of(Color::Blue)));
    assert_eq!(game.state().verify_invariants(), Ok(()));

    declined.apply_intent(&Intent::Pass).unwrap();
    let view = declined.snapshot();
    assert_eq!(view.outcome, Outcome::Lost(LossReason::DeckExhausted));
    assert_eq!(view.door(Color::Red).unwrap().opened, 0);
    assert_eq!(view.limbo_count, 0);
    assert_eq!(view.draw_count, 0);
}
