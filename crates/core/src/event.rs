//! Events published by the engine for the presentation layer.
//!
//! The engine queues events in the order state changes happen; the host
//! drains them once per frame (see [`GameEngine::drain_events`]).
//!
//! [`GameEngine::drain_events`]: crate::GameEngine::drain_events

use serde::Serialize;

use crate::countdown::ClockText;

/// Result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    /// Won and Lost are final until the next reset.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Game-over text for the overlay.
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::InProgress => "",
            Outcome::Won => "Congratulations! You won!",
            Outcome::Lost => "You have failed!",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::InProgress => "in_progress",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh deck was dealt; `values` are the faces in slot order.
    Dealt { episode_id: u32, values: Vec<u8> },
    /// The countdown started (first activation of the episode).
    TimerStarted,
    /// The remaining time changed.
    TimeChanged {
        remaining_secs: u32,
        display: ClockText,
    },
    CardRevealed { card: usize, value: u8 },
    PairMatched { cards: [usize; 2], matched_cards: u32 },
    PairMismatched { cards: [usize; 2] },
    /// A mismatched pair was turned face down again.
    CardsHidden { cards: [usize; 2] },
    GameOver {
        outcome: Outcome,
        message: &'static str,
    },
    OverlayChanged { visible: bool },
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Dealt { .. } => "dealt",
            GameEvent::TimerStarted => "timer_started",
            GameEvent::TimeChanged { .. } => "time_changed",
            GameEvent::CardRevealed { .. } => "card_revealed",
            GameEvent::PairMatched { .. } => "pair_matched",
            GameEvent::PairMismatched { .. } => "pair_mismatched",
            GameEvent::CardsHidden { .. } => "cards_hidden",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::OverlayChanged { .. } => "overlay_changed",
        }
    }
}
