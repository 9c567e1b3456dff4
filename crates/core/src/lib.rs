//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management and timing for the
//! memory-matching game. It has **no dependencies** on terminal I/O, making it:
//!
//! - **Deterministic**: Same seed and same inputs produce identical games
//! - **Testable**: Time is virtual; tests advance it explicitly
//! - **Portable**: Any presentation layer can drive it (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`engine`]: The game state machine (activation, matching, win/loss)
//! - [`deck`]: Cards, dealing and the pair invariant
//! - [`schedule`]: Cancellable timed tasks on a virtual clock
//! - [`countdown`]: The game clock and its `m:ss` display
//! - [`event`]: Events published for the presentation layer
//! - [`snapshot`]: Allocation-free render state
//! - [`config`]: Pair count and timing configuration
//! - [`rng`]: Seeded Fisher-Yates shuffling
//!
//! # Game Rules
//!
//! - **Deal**: `2 * pair_count` cards, each value `1..=pair_count` exactly twice
//! - **Countdown**: Starts on the first card activation, one step per second
//! - **Pairs**: Two equal cards stay face up; two different cards turn back
//!   after the mismatch delay, and no card can be revealed meanwhile
//! - **Win**: Every card matched before the clock runs out
//! - **Loss**: Clock reaches zero; face-up cards stay as they are
//!
//! # Example
//!
//! ```
//! use tui_memory_core::{GameConfig, GameEngine, Outcome};
//!
//! let mut game = GameEngine::with_deck(GameConfig::with_pair_count(2), &[2, 1, 1, 2]).unwrap();
//!
//! game.activate_card(0);
//! game.activate_card(3);
//! assert_eq!(game.matched_cards(), 2);
//!
//! game.activate_card(1);
//! game.activate_card(2);
//! assert_eq!(game.outcome(), Outcome::Won);
//! ```
//!
//! # Timing
//!
//! Call [`GameEngine::tick`] with elapsed milliseconds; the countdown and the
//! mismatch delay are scheduler tasks that fire during `tick`.

pub mod config;
pub mod countdown;
pub mod deck;
pub mod engine;
pub mod error;
pub mod event;
pub mod rng;
pub mod schedule;
pub mod snapshot;

pub use tui_memory_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use countdown::{format_clock, ClockText, Countdown};
pub use deck::{Card, Deck};
pub use engine::GameEngine;
pub use error::{ConfigError, DeckError};
pub use event::{GameEvent, Outcome};
pub use rng::SimpleRng;
pub use schedule::{Fired, Scheduler, TimerHandle, TimerKind};
pub use snapshot::{CardSnapshot, GameSnapshot};
