//! TUI Memory (workspace facade crate).
//!
//! Re-exports the workspace crates under `tui_memory::{core,input,term,types}`
//! so the binary, tests and benches share one import path.

pub use tui_memory_core as core;
pub use tui_memory_input as input;
pub use tui_memory_term as term;
pub use tui_memory_types as types;
