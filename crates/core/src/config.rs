//! Game configuration.
//!
//! Defaults match the standard game (8 pairs, 60 seconds, 1 second mismatch
//! delay). The terminal binary reads overrides from the environment:
//!
//! - `MEMORY_PAIR_COUNT`: pairs dealt, 1..=18 (default 8)
//! - `MEMORY_TIME_LIMIT_SECS`: countdown length, 1..=3600 (default 60)
//! - `MEMORY_MISMATCH_DELAY_MS`: mismatch reveal time, 0..=10000 (default 1000)

use crate::error::ConfigError;
use crate::types::{MAX_PAIR_COUNT, MISMATCH_DELAY_MS, PAIR_COUNT, TIME_LIMIT_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub pair_count: u8,
    pub time_limit_secs: u32,
    pub mismatch_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: PAIR_COUNT,
            time_limit_secs: TIME_LIMIT_SECS,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub const PAIR_COUNT_KEY: &'static str = "MEMORY_PAIR_COUNT";
    pub const TIME_LIMIT_KEY: &'static str = "MEMORY_TIME_LIMIT_SECS";
    pub const MISMATCH_DELAY_KEY: &'static str = "MEMORY_MISMATCH_DELAY_MS";

    /// Standard game with a different pair count.
    pub fn with_pair_count(pair_count: u8) -> Self {
        Self {
            pair_count,
            ..Self::default()
        }
    }

    /// Number of cards dealt.
    pub fn card_count(&self) -> usize {
        2 * self.pair_count as usize
    }

    /// Create from environment variables, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup (environment, tests, ..).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let pair_count = read_number(&lookup, Self::PAIR_COUNT_KEY, defaults.pair_count as u64)?;
        let time_limit_secs =
            read_number(&lookup, Self::TIME_LIMIT_KEY, defaults.time_limit_secs as u64)?;
        let mismatch_delay_ms = read_number(
            &lookup,
            Self::MISMATCH_DELAY_KEY,
            defaults.mismatch_delay_ms as u64,
        )?;

        check_range(Self::PAIR_COUNT_KEY, pair_count, 1, MAX_PAIR_COUNT as u64)?;
        check_range(Self::TIME_LIMIT_KEY, time_limit_secs, 1, 3600)?;
        check_range(Self::MISMATCH_DELAY_KEY, mismatch_delay_ms, 0, 10_000)?;

        Ok(Self {
            pair_count: pair_count as u8,
            time_limit_secs: time_limit_secs as u32,
            mismatch_delay_ms: mismatch_delay_ms as u32,
        })
    }

    /// Validate a hand-built configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            Self::PAIR_COUNT_KEY,
            self.pair_count as u64,
            1,
            MAX_PAIR_COUNT as u64,
        )?;
        check_range(Self::TIME_LIMIT_KEY, self.time_limit_secs as u64, 1, 3600)?;
        check_range(
            Self::MISMATCH_DELAY_KEY,
            self.mismatch_delay_ms as u64,
            0,
            10_000,
        )
    }
}

fn read_number(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber { key, raw })
}

fn check_range(key: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            key,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = GameConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.card_count(), 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::from_lookup(lookup_from(&[
            ("MEMORY_PAIR_COUNT", "2"),
            ("MEMORY_TIME_LIMIT_SECS", " 90 "),
            ("MEMORY_MISMATCH_DELAY_MS", "500"),
        ]))
        .unwrap();

        assert_eq!(config.pair_count, 2);
        assert_eq!(config.time_limit_secs, 90);
        assert_eq!(config.mismatch_delay_ms, 500);
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = GameConfig::from_lookup(lookup_from(&[("MEMORY_PAIR_COUNT", "  ")])).unwrap();
        assert_eq!(config.pair_count, PAIR_COUNT);
    }

    #[test]
    fn test_invalid_number() {
        let err = GameConfig::from_lookup(lookup_from(&[("MEMORY_TIME_LIMIT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "MEMORY_TIME_LIMIT_SECS",
                raw: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_range() {
        let err =
            GameConfig::from_lookup(lookup_from(&[("MEMORY_PAIR_COUNT", "19")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                key: "MEMORY_PAIR_COUNT",
                value: 19,
                ..
            }
        ));

        let err = GameConfig::from_lookup(lookup_from(&[("MEMORY_TIME_LIMIT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { value: 0, .. }));
    }

    #[test]
    fn test_validate_rejects_zero_pairs() {
        assert!(GameConfig::with_pair_count(0).validate().is_err());
        assert!(GameConfig::with_pair_count(2).validate().is_ok());
    }
}
