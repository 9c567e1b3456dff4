//! Core types module - shared constants and action types
//!
//! This crate defines the fundamental types used throughout the application.
//! Everything here is plain data with no external dependencies, so it can be
//! used from the core state machine, the terminal view and the input layer.
//!
//! # Deck Dimensions
//!
//! - **Pairs**: 8 values, each dealt twice
//! - **Cards**: 16, laid out in a 4x4 grid
//! - **Maximum**: 18 pairs (36 cards, 6x6 grid)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds unless the name says otherwise:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Fixed timestep interval of the terminal loop |
//! | `TIME_LIMIT_SECS` | 60 | Countdown duration |
//! | `COUNTDOWN_PERIOD_MS` | 1000 | One countdown step per elapsed second |
//! | `MISMATCH_DELAY_MS` | 1000 | How long a mismatched pair stays face up |
//!
//! # Examples
//!
//! ```
//! use tui_memory_types::{grid_columns, GameAction, CARD_COUNT, PAIR_COUNT};
//!
//! assert_eq!(CARD_COUNT, 2 * PAIR_COUNT as usize);
//! assert_eq!(grid_columns(CARD_COUNT), 4);
//! assert_eq!(GameAction::Activate(3).as_str(), "activate");
//! ```

/// Number of value pairs dealt in a standard game.
pub const PAIR_COUNT: u8 = 8;

/// Number of cards in a standard game (two per pair).
pub const CARD_COUNT: usize = 2 * PAIR_COUNT as usize;

/// Largest supported pair count.
pub const MAX_PAIR_COUNT: u8 = 18;

/// Largest supported card count.
pub const MAX_CARDS: usize = 2 * MAX_PAIR_COUNT as usize;

/// Countdown duration in seconds.
pub const TIME_LIMIT_SECS: u32 = 60;

/// Interval between countdown steps.
pub const COUNTDOWN_PERIOD_MS: u32 = 1000;

/// Delay before a mismatched pair is turned face down again.
pub const MISMATCH_DELAY_MS: u32 = 1000;

/// Fixed timestep interval of the terminal loop (50ms = 20 ticks per second).
pub const TICK_MS: u32 = 50;

/// Number of grid columns used to lay out `card_count` cards.
///
/// This is the smallest square grid that fits every card, so 16 cards form a
/// 4x4 grid and 4 cards a 2x2 grid.
///
/// # Examples
///
/// ```
/// use tui_memory_types::grid_columns;
///
/// assert_eq!(grid_columns(16), 4);
/// assert_eq!(grid_columns(4), 2);
/// assert_eq!(grid_columns(10), 4);
/// assert_eq!(grid_columns(0), 1);
/// ```
pub fn grid_columns(card_count: usize) -> usize {
    let mut cols = 1usize;
    while cols * cols < card_count {
        cols += 1;
    }
    cols
}

/// Number of grid rows used to lay out `card_count` cards.
pub fn grid_rows(card_count: usize) -> usize {
    let cols = grid_columns(card_count);
    card_count.div_ceil(cols).max(1)
}

/// Actions the presentation layer delivers to the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Reveal the card with the given slot index
    Activate(usize),
    /// Throw away the current game and deal a fresh one
    Reset,
}

impl GameAction {
    /// Short name of the action kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Activate(_) => "activate",
            GameAction::Reset => "reset",
        }
    }
}

/// Actions produced by the input layer before they are resolved against the
/// board cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiAction {
    /// Move cursor one card left
    CursorLeft,
    /// Move cursor one card right
    CursorRight,
    /// Move cursor one row up
    CursorUp,
    /// Move cursor one row down
    CursorDown,
    /// Flip the card under the cursor
    Flip,
    /// Restart the game
    Restart,
}

impl UiAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiAction::CursorLeft => "cursorLeft",
            UiAction::CursorRight => "cursorRight",
            UiAction::CursorUp => "cursorUp",
            UiAction::CursorDown => "cursorDown",
            UiAction::Flip => "flip",
            UiAction::Restart => "restart",
        }
    }
}
