//! Board cursor for keyboard play.
//!
//! The cursor walks the same grid the view draws (`grid_columns` columns) and
//! wraps at the edges. Horizontal moves walk slot order; vertical moves stay
//! in the column and skip the gap in a partial last row.

use crate::types::{grid_columns, grid_rows, GameAction, UiAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCursor {
    index: usize,
    card_count: usize,
}

impl BoardCursor {
    pub fn new(card_count: usize) -> Self {
        Self {
            index: 0,
            card_count,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    /// Follow a deck size change, keeping the cursor on the board.
    pub fn set_card_count(&mut self, card_count: usize) {
        self.card_count = card_count;
        if self.index >= card_count {
            self.index = card_count.saturating_sub(1);
        }
    }

    /// Jump to a card (e.g. after a mouse click). Out-of-range indices are ignored.
    pub fn set_index(&mut self, index: usize) {
        if index < self.card_count {
            self.index = index;
        }
    }

    /// Apply a UI action; returns the engine action it resolves to, if any.
    pub fn apply(&mut self, action: UiAction) -> Option<GameAction> {
        log::trace!("ui action {} at card {}", action.as_str(), self.index);
        let n = self.card_count;
        if n == 0 {
            return match action {
                UiAction::Restart => Some(GameAction::Reset),
                _ => None,
            };
        }

        match action {
            UiAction::CursorLeft => {
                self.index = (self.index + n - 1) % n;
                None
            }
            UiAction::CursorRight => {
                self.index = (self.index + 1) % n;
                None
            }
            UiAction::CursorUp => {
                self.step_vertical(false);
                None
            }
            UiAction::CursorDown => {
                self.step_vertical(true);
                None
            }
            UiAction::Flip => Some(GameAction::Activate(self.index)),
            UiAction::Restart => Some(GameAction::Reset),
        }
    }

    fn step_vertical(&mut self, down: bool) {
        let n = self.card_count;
        let cols = grid_columns(n);
        let rows = grid_rows(n);
        let col = self.index % cols;
        let mut row = self.index / cols;

        // Row 0 always holds this column, so the loop ends within `rows` steps.
        for _ in 0..rows {
            row = if down { (row + 1) % rows } else { (row + rows - 1) % rows };
            let candidate = row * cols + col;
            if candidate < n {
                self.index = candidate;
                return;
            }
        }
    }
}
