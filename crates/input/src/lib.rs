//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::UiAction`] and keeps a cursor
//! over the card grid that turns those actions into
//! [`crate::types::GameAction`]s for the engine.

pub mod cursor;
pub mod map;

pub use tui_memory_types as types;

pub use cursor::BoardCursor;
pub use map::{handle_key_event, should_quit};
