//! Integration tests for the game lifecycle

use tui_memory::core::{GameConfig, GameEngine, GameEvent, Outcome};
use tui_memory::types::{GameAction, CARD_COUNT, MISMATCH_DELAY_MS, PAIR_COUNT, TIME_LIMIT_SECS};

fn assert_fresh(game: &GameEngine) {
    assert_eq!(game.deck().len(), CARD_COUNT);
    assert_eq!(game.deck().pair_count(), PAIR_COUNT);
    assert!(game.deck().is_valid());
    assert!(game.deck().iter().all(|c| !c.flipped && !c.matched));
    assert_eq!(game.matched_cards(), 0);
    assert_eq!(game.remaining_secs(), TIME_LIMIT_SECS);
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert!(!game.timer_active());
    assert!(game.selection().is_empty());
    assert_eq!(game.scheduled_tasks(), 0);
}

/// Ids of the two cards holding `value`.
fn pair_of(game: &GameEngine, value: u8) -> [usize; 2] {
    let ids: Vec<usize> = game
        .deck()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.value == value)
        .map(|(i, _)| i)
        .collect();
    [ids[0], ids[1]]
}

/// Two card ids with different values.
fn mismatched(game: &GameEngine) -> [usize; 2] {
    let first = game.deck().get(0).map(|c| c.value).unwrap();
    let other = game
        .deck()
        .iter()
        .position(|c| c.value != first)
        .unwrap();
    [0, other]
}

#[test]
fn test_initialize_and_reset_produce_fresh_game() {
    let mut game = GameEngine::new(GameConfig::default(), 12345);
    assert_fresh(&game);

    let [a, b] = pair_of(&game, 3);
    game.activate_card(a);
    game.activate_card(b);
    game.tick(2500);
    game.reset();
    assert_fresh(&game);

    game.initialize();
    assert_fresh(&game);
}

#[test]
fn test_activation_starts_timer_and_flips_only_that_card() {
    let mut game = GameEngine::new(GameConfig::default(), 7);

    assert!(game.activate_card(5));
    assert!(game.timer_active());
    assert_eq!(game.deck().flipped_count(), 1);
    assert!(game.deck().get(5).unwrap().flipped);

    // Re-activating a face-up card changes nothing.
    assert!(!game.activate_card(5));
    assert_eq!(game.selection(), &[5]);
    assert_eq!(game.deck().flipped_count(), 1);
}

#[test]
fn test_equal_pair_stays_flipped() {
    let mut game = GameEngine::new(GameConfig::default(), 99);
    let [a, b] = pair_of(&game, 1);

    game.activate_card(a);
    game.activate_card(b);

    assert_eq!(game.matched_cards(), 2);
    assert!(game.deck().get(a).unwrap().flipped);
    assert!(game.deck().get(b).unwrap().flipped);
    assert!(game.selection().is_empty());
    assert!(!game.mismatch_pending());
    // Only the countdown remains scheduled.
    assert_eq!(game.scheduled_tasks(), 1);
}

#[test]
fn test_unequal_pair_turns_back_after_delay() {
    let mut game = GameEngine::new(GameConfig::default(), 3);
    let [a, b] = mismatched(&game);
    let third = (0..CARD_COUNT).find(|&i| i != a && i != b).unwrap();

    game.activate_card(a);
    game.activate_card(b);
    assert!(game.mismatch_pending());

    // Buffer is full during the delay.
    assert!(!game.activate_card(third));
    assert!(!game.deck().get(third).unwrap().flipped);

    game.tick(MISMATCH_DELAY_MS - 1);
    assert!(game.deck().get(a).unwrap().flipped);

    game.tick(1);
    assert!(!game.deck().get(a).unwrap().flipped);
    assert!(!game.deck().get(b).unwrap().flipped);
    assert!(game.selection().is_empty());

    assert!(game.activate_card(third));
}

#[test]
fn test_matching_every_pair_wins() {
    let mut game = GameEngine::new(GameConfig::default(), 2024);
    for value in 1..=PAIR_COUNT {
        let [a, b] = pair_of(&game, value);
        game.activate_card(a);
        game.activate_card(b);
        game.tick(300);
    }

    assert_eq!(game.matched_cards() as usize, CARD_COUNT);
    assert_eq!(game.outcome(), Outcome::Won);
    assert!(!game.timer_active());
    assert_eq!(game.scheduled_tasks(), 0);

    // Clock is frozen and the board is locked.
    let remaining = game.remaining_secs();
    game.tick(5000);
    assert_eq!(game.remaining_secs(), remaining);
    assert!(!game.apply_action(GameAction::Activate(0)));
}

#[test]
fn test_clock_running_out_loses_and_keeps_cards_face_up() {
    let mut game = GameEngine::new(GameConfig::default(), 11);
    let [a, b] = pair_of(&game, 2);
    game.activate_card(a);
    game.activate_card(b);

    // Leave a mismatch pending at the moment time runs out.
    game.tick(TIME_LIMIT_SECS * 1000 - 500);
    let [c, d] = {
        let [x, _] = pair_of(&game, 3);
        let [y, _] = pair_of(&game, 4);
        [x, y]
    };
    game.activate_card(c);
    game.activate_card(d);
    game.tick(500);

    assert_eq!(game.remaining_secs(), 0);
    assert_eq!(game.outcome(), Outcome::Lost);
    assert!(!game.timer_active());
    assert_eq!(game.clock_display().as_str(), "0:00");

    game.tick(5000);
    for id in [a, b, c, d] {
        assert!(game.deck().get(id).unwrap().flipped, "card {id} flipped back");
    }
    assert!(!game.activate_card(pair_of(&game, 5)[0]));
}

#[test]
fn test_two_pair_trace() {
    let mut game =
        GameEngine::with_deck(GameConfig::with_pair_count(2), &[2, 1, 1, 2]).unwrap();
    let delay = game.config().mismatch_delay_ms;

    game.activate_card(0);
    game.activate_card(2);
    game.tick(delay);
    assert_eq!(game.deck().flipped_count(), 0);

    game.activate_card(1);
    game.activate_card(3);
    game.tick(delay);
    assert_eq!(game.deck().flipped_count(), 0);

    game.activate_card(0);
    game.activate_card(3);
    assert_eq!(game.matched_cards(), 2);

    game.activate_card(1);
    game.activate_card(2);
    assert_eq!(game.matched_cards(), 4);
    assert_eq!(game.outcome(), Outcome::Won);

    let kinds: Vec<&str> = game.drain_events().map(|e| e.kind()).collect();
    assert_eq!(kinds.last(), Some(&"overlay_changed"));
    assert!(kinds.contains(&"game_over"));
    assert_eq!(kinds.iter().filter(|k| **k == "cards_hidden").count(), 2);
}

#[test]
fn test_reset_cancels_pending_mismatch() {
    let mut game = GameEngine::new(GameConfig::default(), 5);
    let [a, b] = mismatched(&game);
    game.activate_card(a);
    game.activate_card(b);
    game.tick(400);
    assert!(game.mismatch_pending());

    game.reset();
    assert_fresh(&game);

    // The cancelled unflip must not touch the new deck.
    let [c, d] = pair_of(&game, 1);
    game.activate_card(c);
    game.tick(2000);
    assert!(game.deck().get(c).unwrap().flipped);
    assert_eq!(game.selection(), &[c]);

    game.activate_card(d);
    assert_eq!(game.matched_cards(), 2);
}

#[test]
fn test_reset_restarts_the_clock() {
    let mut game = GameEngine::new(GameConfig::default(), 8);
    game.activate_card(0);
    game.tick(10_000);
    assert_eq!(game.remaining_secs(), TIME_LIMIT_SECS - 10);

    game.apply_action(GameAction::Reset);
    assert_eq!(game.remaining_secs(), TIME_LIMIT_SECS);
    game.tick(10_000);
    assert_eq!(game.remaining_secs(), TIME_LIMIT_SECS, "clock waits for first activation");
}

#[test]
fn test_same_seed_deals_same_deck() {
    let a = GameEngine::new(GameConfig::default(), 314);
    let b = GameEngine::new(GameConfig::default(), 314);
    assert_eq!(a.deck().values(), b.deck().values());
}

#[test]
fn test_reset_publishes_new_deal() {
    let mut game = GameEngine::new(GameConfig::default(), 1);
    let first = game.episode_id();
    let _ = game.drain_events().count();

    game.reset();
    let events: Vec<GameEvent> = game.drain_events().collect();
    assert!(events.contains(&GameEvent::OverlayChanged { visible: false }));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Dealt { episode_id, values } if *episode_id == first + 1 && values.len() == CARD_COUNT
    )));
}
