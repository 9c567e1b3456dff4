use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::deck::Card;
use crate::event::Outcome;
use crate::types::{MAX_CARDS, TIME_LIMIT_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CardSnapshot {
    pub value: u8,
    pub flipped: bool,
    pub matched: bool,
}

impl From<Card> for CardSnapshot {
    fn from(value: Card) -> Self {
        Self {
            value: value.value,
            flipped: value.flipped,
            matched: value.matched,
        }
    }
}

/// Everything the presentation layer needs to draw one frame.
///
/// Reuse one snapshot across frames with [`GameEngine::snapshot_into`]; the
/// card list is fixed-capacity so refreshing it does not allocate.
///
/// [`GameEngine::snapshot_into`]: crate::GameEngine::snapshot_into
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub cards: ArrayVec<CardSnapshot, MAX_CARDS>,
    pub episode_id: u32,
    pub remaining_secs: u32,
    pub time_limit_secs: u32,
    pub timer_active: bool,
    pub matched_cards: u32,
    /// Cards currently awaiting comparison (0..=2)
    pub selection_len: u8,
    pub outcome: Outcome,
    pub overlay_visible: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cards.clear();
        self.episode_id = 0;
        self.remaining_secs = TIME_LIMIT_SECS;
        self.time_limit_secs = TIME_LIMIT_SECS;
        self.timer_active = false;
        self.matched_cards = 0;
        self.selection_len = 0;
        self.outcome = Outcome::InProgress;
        self.overlay_visible = false;
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn playable(&self) -> bool {
        !self.outcome.is_terminal()
    }

    /// Stable 64-bit FNV-1a hash of the snapshot.
    ///
    /// `DefaultHasher` output is not guaranteed stable across Rust versions,
    /// so redraw decisions use this instead.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1aHasher::new();
        self.hash(&mut h);
        h.finish()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            cards: ArrayVec::new(),
            episode_id: 0,
            remaining_secs: 0,
            time_limit_secs: 0,
            timer_active: false,
            matched_cards: 0,
            selection_len: 0,
            outcome: Outcome::InProgress,
            overlay_visible: false,
        };
        s.clear();
        s
    }
}

#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}
