//! Terminal front end for the memory game.
//!
//! Rendering is split in two halves. [`GameView`] turns a
//! [`core::GameSnapshot`] into a [`FrameBuffer`] without touching the
//! terminal, and [`TerminalRenderer`] flushes framebuffers through crossterm,
//! re-emitting only the cells that changed since the previous frame.
//!
//! - Cards are fixed-size tiles laid out on the same square-ish grid the
//!   keyboard cursor walks
//! - [`GameView::card_at`] maps mouse coordinates back to card ids
//! - [`RenderThrottle`] skips frames whose snapshot did not change
//! - [`FrameClock`] paces the fixed timestep without losing wall time

pub mod fb;
pub mod frame_clock;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_memory_core as core;
pub use tui_memory_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frame_clock::FrameClock;
pub use game_view::{outcome_color, AnchorY, GameView, GridLayout, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
