//! Error types for deck construction and configuration.

use thiserror::Error;

/// A deck whose values do not form complete pairs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("expected {expected} cards, got {actual}")]
    WrongSize { expected: usize, actual: usize },
    #[error("card value {value} is outside 1..={pair_count}")]
    ValueOutOfRange { value: u8, pair_count: u8 },
    #[error("card value {value} appears {count} times, expected exactly 2")]
    NotAPair { value: u8, count: usize },
}

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}: cannot parse [{raw}] as a number")]
    InvalidNumber { key: &'static str, raw: String },
    #[error("{key}: {value} is outside {min}..={max}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}
