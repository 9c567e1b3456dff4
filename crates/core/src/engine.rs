//! Game engine module - owns the complete game state
//!
//! This module ties together the deck, the selection buffer, the countdown and
//! the scheduler. It handles card activation, match evaluation, timed
//! resolution of mismatches, and the win/loss lifecycle.
//!
//! Every operation runs to completion on the caller's thread. Time only moves
//! through [`GameEngine::tick`], which fires due scheduler tasks one at a time.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::countdown::{ClockText, Countdown};
use crate::deck::Deck;
use crate::error::DeckError;
use crate::event::{GameEvent, Outcome};
use crate::rng::SimpleRng;
use crate::schedule::{Fired, Scheduler, TimerHandle, TimerKind};
use crate::snapshot::{CardSnapshot, GameSnapshot};
use crate::types::{GameAction, COUNTDOWN_PERIOD_MS, MAX_PAIR_COUNT};

/// Why an activation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    GameOver,
    NoSuchCard,
    AlreadyFlipped,
    SelectionFull,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    deck: Deck,
    /// Cards awaiting comparison, in activation order.
    selection: ArrayVec<usize, 2>,
    countdown: Countdown,
    /// Matched cards (not pairs).
    matched_cards: u32,
    outcome: Outcome,
    scheduler: Scheduler,
    /// One-shot task that turns the current mismatched pair face down.
    pending_unflip: Option<TimerHandle>,
    /// Monotonic deal id (increments on every initialize/reset).
    ///
    /// Scheduled tasks carry the episode they belong to; a task from an older
    /// episode is dropped when it fires.
    episode_id: u32,
    rng: SimpleRng,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create a game and deal the first shuffled deck.
    pub fn new(config: GameConfig, seed: u32) -> Self {
        let config = Self::sanitized(config);
        let mut rng = SimpleRng::new(seed);
        let deck = Deck::shuffled(config.pair_count, &mut rng);
        Self::assemble(config, rng, deck)
    }

    /// Create a game whose first deal uses `values` in the given slot order.
    ///
    /// Later resets shuffle normally (from seed 1).
    pub fn with_deck(config: GameConfig, values: &[u8]) -> Result<Self, DeckError> {
        let config = Self::sanitized(config);
        let deck = Deck::from_values(values)?;
        if deck.len() != config.card_count() {
            return Err(DeckError::WrongSize {
                expected: config.card_count(),
                actual: deck.len(),
            });
        }
        Ok(Self::assemble(config, SimpleRng::new(1), deck))
    }

    fn assemble(config: GameConfig, rng: SimpleRng, deck: Deck) -> Self {
        let mut engine = Self {
            config,
            deck,
            selection: ArrayVec::new(),
            countdown: Countdown::new(config.time_limit_secs),
            matched_cards: 0,
            outcome: Outcome::InProgress,
            scheduler: Scheduler::new(),
            pending_unflip: None,
            episode_id: 0,
            rng,
            events: Vec::with_capacity(16),
        };
        engine.start_episode();
        engine
    }

    fn sanitized(config: GameConfig) -> GameConfig {
        let fixed = GameConfig {
            pair_count: config.pair_count.clamp(1, MAX_PAIR_COUNT),
            time_limit_secs: config.time_limit_secs.max(1),
            mismatch_delay_ms: config.mismatch_delay_ms,
        };
        if fixed != config {
            log::warn!("adjusted game config {:?} to {:?}", config, fixed);
        }
        fixed
    }

    /// Deal a fresh shuffled deck and reset every counter and timer.
    pub fn initialize(&mut self) {
        self.deck = Deck::shuffled(self.config.pair_count, &mut self.rng);
        self.start_episode();
    }

    /// Abandon the current game (in any state) and start over.
    pub fn reset(&mut self) {
        log::info!(
            "reset requested in episode {} ({}, {} cards matched)",
            self.episode_id,
            self.outcome.as_str(),
            self.matched_cards
        );
        self.initialize();
    }

    /// Reinitialize around the deck already stored in `self.deck`.
    fn start_episode(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);

        // Pending unflips and the running countdown belong to the old deck.
        self.scheduler.cancel_all();
        self.pending_unflip = None;
        self.countdown = Countdown::new(self.config.time_limit_secs);

        self.matched_cards = 0;
        self.selection.clear();
        self.outcome = Outcome::InProgress;

        self.events.push(GameEvent::OverlayChanged { visible: false });
        self.events.push(GameEvent::TimeChanged {
            remaining_secs: self.countdown.remaining_secs(),
            display: self.countdown.display(),
        });
        self.events.push(GameEvent::Dealt {
            episode_id: self.episode_id,
            values: self.deck.values(),
        });

        log::debug!(
            "episode {} dealt {} cards, {}s on the clock",
            self.episode_id,
            self.deck.len(),
            self.config.time_limit_secs
        );
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn matched_cards(&self) -> u32 {
        self.matched_cards
    }

    /// Cards awaiting comparison.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    pub fn clock_display(&self) -> ClockText {
        self.countdown.display()
    }

    pub fn timer_active(&self) -> bool {
        self.countdown.active()
    }

    /// True while a mismatched pair is waiting to be turned back.
    pub fn mismatch_pending(&self) -> bool {
        self.pending_unflip.is_some()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Live scheduler tasks (countdown and pending unflip).
    pub fn scheduled_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Virtual time in milliseconds since the engine was created.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cards.clear();
        let capacity = out.cards.capacity();
        out.cards.extend(
            self.deck
                .iter()
                .take(capacity)
                .map(|card| CardSnapshot::from(*card)),
        );
        out.episode_id = self.episode_id;
        out.remaining_secs = self.countdown.remaining_secs();
        out.time_limit_secs = self.countdown.limit_secs();
        out.timer_active = self.countdown.active();
        out.matched_cards = self.matched_cards;
        out.selection_len = self.selection.len() as u8;
        out.outcome = self.outcome;
        out.overlay_visible = self.outcome.is_terminal();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Hand queued events to the presentation layer, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Apply an action from the presentation layer.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Activate(card_id) => self.activate_card(card_id),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    fn rejection(&self, card_id: usize) -> Option<Rejection> {
        if self.outcome.is_terminal() {
            return Some(Rejection::GameOver);
        }
        let Some(card) = self.deck.get(card_id) else {
            return Some(Rejection::NoSuchCard);
        };
        if card.flipped {
            return Some(Rejection::AlreadyFlipped);
        }
        if self.selection.is_full() {
            return Some(Rejection::SelectionFull);
        }
        None
    }

    /// Reveal a card.
    ///
    /// Returns false, changing nothing, when the game is over, the card does
    /// not exist or is already face up, or two cards are still awaiting
    /// resolution. The first accepted activation starts the countdown.
    pub fn activate_card(&mut self, card_id: usize) -> bool {
        if let Some(reason) = self.rejection(card_id) {
            log::trace!("ignored activation of card {}: {:?}", card_id, reason);
            return false;
        }

        if !self.countdown.active() {
            self.start_countdown();
        }

        let value = match self.deck.get_mut(card_id) {
            Some(card) => {
                card.flipped = true;
                card.value
            }
            None => return false,
        };
        self.selection.push(card_id);
        self.events.push(GameEvent::CardRevealed {
            card: card_id,
            value,
        });

        if self.selection.is_full() {
            self.evaluate_selection();
        }

        true
    }

    fn start_countdown(&mut self) {
        let handle = self.scheduler.schedule_repeating(
            TimerKind::CountdownTick,
            COUNTDOWN_PERIOD_MS,
            self.episode_id,
        );
        self.countdown.start(handle);
        self.events.push(GameEvent::TimerStarted);
        log::debug!("episode {} countdown started", self.episode_id);
    }

    /// Compare the two selected cards.
    fn evaluate_selection(&mut self) {
        let cards = [self.selection[0], self.selection[1]];
        let values = cards.map(|id| self.deck.get(id).map(|c| c.value));

        if values[0].is_some() && values[0] == values[1] {
            for id in cards {
                if let Some(card) = self.deck.get_mut(id) {
                    card.matched = true;
                }
            }
            self.matched_cards += 2;
            self.selection.clear();
            self.events.push(GameEvent::PairMatched {
                cards,
                matched_cards: self.matched_cards,
            });
            log::debug!(
                "matched cards {:?}, {}/{}",
                cards,
                self.matched_cards,
                self.deck.len()
            );

            if self.matched_cards as usize == self.deck.len() {
                self.conclude_game(true);
            }
        } else {
            let handle = self.scheduler.schedule_once(
                TimerKind::ResolveMismatch,
                self.config.mismatch_delay_ms,
                self.episode_id,
            );
            self.pending_unflip = Some(handle);
            self.events.push(GameEvent::PairMismatched { cards });
            log::debug!("mismatch {:?}, hiding in {}ms", cards, self.config.mismatch_delay_ms);
        }
    }

    /// Advance the game clock and run every task that comes due.
    ///
    /// Returns true if any task changed the game state.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let until = self.scheduler.now_ms().saturating_add(elapsed_ms as u64);
        let mut changed = false;
        while let Some(fired) = self.scheduler.pop_due(until) {
            changed |= self.dispatch(fired);
        }
        self.scheduler.settle(until);
        changed
    }

    fn dispatch(&mut self, fired: Fired) -> bool {
        if fired.episode != self.episode_id {
            log::warn!(
                "dropping {:?} from episode {} (now {})",
                fired.kind,
                fired.episode,
                self.episode_id
            );
            self.scheduler.cancel(fired.handle);
            return false;
        }

        match fired.kind {
            TimerKind::CountdownTick => self.countdown_tick(fired.handle),
            TimerKind::ResolveMismatch => self.resolve_mismatch(fired.handle),
        }
    }

    fn countdown_tick(&mut self, handle: TimerHandle) -> bool {
        if self.outcome.is_terminal() || self.countdown.handle() != Some(handle) {
            self.scheduler.cancel(handle);
            return false;
        }

        let expired = self.countdown.step();
        self.events.push(GameEvent::TimeChanged {
            remaining_secs: self.countdown.remaining_secs(),
            display: self.countdown.display(),
        });

        if expired {
            self.conclude_game(false);
        }
        true
    }

    fn resolve_mismatch(&mut self, handle: TimerHandle) -> bool {
        if self.pending_unflip != Some(handle) {
            return false;
        }
        self.pending_unflip = None;

        for &id in self.selection.iter() {
            if let Some(card) = self.deck.get_mut(id) {
                card.flipped = false;
            }
        }
        if let [a, b] = self.selection[..] {
            self.events.push(GameEvent::CardsHidden { cards: [a, b] });
        }
        self.selection.clear();
        true
    }

    fn conclude_game(&mut self, won: bool) {
        if let Some(handle) = self.countdown.stop() {
            self.scheduler.cancel(handle);
        }
        // Cards face up at the end stay face up.
        if let Some(handle) = self.pending_unflip.take() {
            self.scheduler.cancel(handle);
        }

        self.outcome = if won { Outcome::Won } else { Outcome::Lost };
        log::info!(
            "episode {} {} with {}s left, {}/{} cards matched",
            self.episode_id,
            self.outcome.as_str(),
            self.countdown.remaining_secs(),
            self.matched_cards,
            self.deck.len()
        );

        self.events.push(GameEvent::GameOver {
            outcome: self.outcome,
            message: self.outcome.message(),
        });
        self.events.push(GameEvent::OverlayChanged { visible: true });
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn small_game() -> GameEngine {
        GameEngine::with_deck(GameConfig::with_pair_count(2), &[2, 1, 1, 2]).unwrap()
    }

    #[test]
    fn test_new_engine_state() {
        let engine = GameEngine::new(GameConfig::default(), 12345);

        assert_eq!(engine.deck().len(), 16);
        assert!(engine.deck().is_valid());
        assert_eq!(engine.deck().flipped_count(), 0);
        assert_eq!(engine.matched_cards(), 0);
        assert_eq!(engine.remaining_secs(), 60);
        assert_eq!(engine.outcome(), Outcome::InProgress);
        assert!(!engine.timer_active());
        assert!(engine.selection().is_empty());
        assert_eq!(engine.episode_id(), 1);
        assert_eq!(engine.scheduled_tasks(), 0);
    }

    #[test]
    fn test_with_deck_rejects_size_mismatch() {
        let err = GameEngine::with_deck(GameConfig::default(), &[1, 1, 2, 2]).unwrap_err();
        assert_eq!(
            err,
            DeckError::WrongSize {
                expected: 16,
                actual: 4
            }
        );
    }

    #[test]
    fn test_config_is_clamped() {
        let engine = GameEngine::new(
            GameConfig {
                pair_count: 0,
                time_limit_secs: 0,
                mismatch_delay_ms: 10,
            },
            1,
        );
        assert_eq!(engine.config().pair_count, 1);
        assert_eq!(engine.deck().len(), 2);
        assert_eq!(engine.remaining_secs(), 1);
    }

    #[test]
    fn test_first_activation_starts_countdown() {
        let mut engine = small_game();
        assert!(!engine.tick(5000));
        assert_eq!(engine.remaining_secs(), 60);

        assert!(engine.activate_card(0));
        assert!(engine.timer_active());
        assert_eq!(engine.scheduled_tasks(), 1);

        assert!(engine.tick(1000));
        assert_eq!(engine.remaining_secs(), 59);
    }

    #[test]
    fn test_out_of_range_activation_is_ignored() {
        let mut engine = small_game();
        assert!(!engine.activate_card(4));
        assert!(!engine.activate_card(usize::MAX));
        assert!(!engine.timer_active());
    }

    #[test]
    fn test_match_marks_cards() {
        let mut engine = small_game();
        assert!(engine.activate_card(1));
        assert!(engine.activate_card(2));

        assert!(engine.deck().get(1).unwrap().matched);
        assert!(engine.deck().get(2).unwrap().matched);
        assert_eq!(engine.matched_cards(), 2);
        assert!(!engine.mismatch_pending());
    }

    #[test]
    fn test_mismatch_resolves_after_delay() {
        let mut engine = small_game();
        engine.activate_card(0);
        engine.activate_card(1);
        assert!(engine.mismatch_pending());

        engine.tick(999);
        assert_eq!(engine.deck().flipped_count(), 2);

        engine.tick(1);
        assert_eq!(engine.deck().flipped_count(), 0);
        assert!(engine.selection().is_empty());
        assert!(!engine.mismatch_pending());
    }

    #[test]
    fn test_events_in_order() {
        let mut engine = small_game();
        let dealt: Vec<GameEvent> = engine.drain_events().collect();
        assert_eq!(
            dealt,
            vec![
                GameEvent::OverlayChanged { visible: false },
                GameEvent::TimeChanged {
                    remaining_secs: 60,
                    display: crate::format_clock(60)
                },
                GameEvent::Dealt {
                    episode_id: 1,
                    values: vec![2, 1, 1, 2]
                },
            ]
        );

        engine.activate_card(0);
        engine.activate_card(3);
        let kinds: Vec<&str> = engine.drain_events().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec!["timer_started", "card_revealed", "card_revealed", "pair_matched"]
        );
    }

    #[test]
    fn test_stale_task_from_previous_episode_is_dropped() {
        let mut engine = small_game();
        engine.activate_card(0);
        engine.activate_card(1);

        // Simulate a task that escaped cancellation.
        let stale = engine
            .scheduler
            .schedule_once(TimerKind::ResolveMismatch, 10, engine.episode_id);
        engine.pending_unflip = Some(stale);
        engine.episode_id += 1;

        assert!(!engine.tick(20));
        assert_eq!(engine.deck().flipped_count(), 2);
    }

    #[test]
    fn test_apply_action() {
        let mut engine = small_game();
        assert!(engine.apply_action(GameAction::Activate(0)));
        assert!(engine.apply_action(GameAction::Reset));
        assert_eq!(engine.episode_id(), 2);
        assert_eq!(engine.deck().flipped_count(), 0);
    }
}
