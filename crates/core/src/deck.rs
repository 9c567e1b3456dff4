//! Deck module - the dealt cards and their pair invariant.
//!
//! A deck of `2 * pair_count` cards holds every value in `1..=pair_count`
//! exactly twice. Decks are only ever replaced wholesale; after a deal the
//! values never move and only the face-up state changes.

use serde::Serialize;

use crate::error::DeckError;
use crate::rng::SimpleRng;
use crate::types::MAX_CARDS;

/// One card slot on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    /// Face value, `1..=pair_count`
    pub value: u8,
    /// Face up (value visible)
    pub flipped: bool,
    /// Part of a resolved pair; matched cards stay face up for the rest of the game
    pub matched: bool,
}

impl Card {
    pub fn new(value: u8) -> Self {
        Self {
            value,
            flipped: false,
            matched: false,
        }
    }
}

/// Ordered sequence of cards, indexed by slot id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Deal `pair_count` pairs in a uniformly shuffled order.
    pub fn shuffled(pair_count: u8, rng: &mut SimpleRng) -> Self {
        let mut values = Self::ordered_values(pair_count);
        rng.shuffle(&mut values);
        Self {
            cards: values.into_iter().map(Card::new).collect(),
        }
    }

    /// Build a deck from an explicit value order.
    ///
    /// The pair count is inferred from the length, and the values must form
    /// exactly one pair of each value in `1..=len/2`.
    pub fn from_values(values: &[u8]) -> Result<Self, DeckError> {
        let actual = values.len();
        if actual == 0 || actual % 2 != 0 || actual > MAX_CARDS {
            let expected = if actual > MAX_CARDS {
                MAX_CARDS
            } else {
                (actual / 2).max(1) * 2
            };
            return Err(DeckError::WrongSize { expected, actual });
        }

        let pair_count = (actual / 2) as u8;
        let mut counts = [0usize; MAX_CARDS / 2 + 1];
        for &value in values {
            if value == 0 || value > pair_count {
                return Err(DeckError::ValueOutOfRange { value, pair_count });
            }
            counts[value as usize] += 1;
        }

        for value in 1..=pair_count {
            let count = counts[value as usize];
            if count != 2 {
                return Err(DeckError::NotAPair { value, count });
            }
        }

        Ok(Self {
            cards: values.iter().copied().map(Card::new).collect(),
        })
    }

    /// The unshuffled multiset `[1, 1, 2, 2, ..]`.
    fn ordered_values(pair_count: u8) -> Vec<u8> {
        (1..=pair_count).flat_map(|v| [v, v]).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> u8 {
        (self.cards.len() / 2) as u8
    }

    pub fn get(&self, id: usize) -> Option<&Card> {
        self.cards.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: usize) -> Option<&mut Card> {
        self.cards.get_mut(id)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Face values in slot order.
    pub fn values(&self) -> Vec<u8> {
        self.cards.iter().map(|c| c.value).collect()
    }

    /// Number of face-up cards (matched or pending).
    pub fn flipped_count(&self) -> usize {
        self.cards.iter().filter(|c| c.flipped).count()
    }

    /// Check the pair invariant.
    pub fn is_valid(&self) -> bool {
        Self::from_values(&self.values()).is_ok()
    }
}
