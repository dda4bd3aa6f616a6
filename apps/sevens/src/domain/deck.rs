//! Draw pile for a single game.

use std::collections::VecDeque;

use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::rules::DECK_SIZE;
use super::{Card, Rank, Suit};

/// Ordered draw pile, drawn from the front and never replenished.
///
/// The card list sits behind its own lock so a shared `&Deck` can be drawn
/// from safely; in practice the engine's guard already serializes access.
#[derive(Debug)]
pub struct Deck {
    cards: Mutex<VecDeque<Card>>,
}

impl Deck {
    /// Full 32-card deck in suit-major, rank-minor order.
    pub fn standard() -> Self {
        let mut cards = VecDeque::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push_back(Card::new(rank, suit));
            }
        }
        Self {
            cards: Mutex::new(cards),
        }
    }

    /// Deck holding exactly `cards`, front first. Used for restores and fixtures.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: Mutex::new(cards.into_iter().collect()),
        }
    }

    pub fn shuffle<R: Rng + ?Sized>(&self, rng: &mut R) {
        let mut cards = self.cards.lock();
        cards.make_contiguous().shuffle(rng);
    }

    /// Remove up to `count` cards from the front. Under-supply is not an error.
    pub fn draw(&self, count: usize) -> Vec<Card> {
        let mut cards = self.cards.lock();
        let take = count.min(cards.len());
        cards.drain(..take).collect()
    }

    pub fn draw_one(&self) -> Option<Card> {
        self.cards.lock().pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.cards.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.lock().is_empty()
    }

    /// Snapshot of the remaining cards, front first.
    pub fn cards(&self) -> Vec<Card> {
        self.cards.lock().iter().copied().collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

impl Clone for Deck {
    fn clone(&self) -> Self {
        Self::from_cards(self.cards())
    }
}

impl PartialEq for Deck {
    fn eq(&self, other: &Self) -> bool {
        self.cards() == other.cards()
    }
}

impl Eq for Deck {}

impl Serialize for Deck {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.cards().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Deck {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cards = Vec::<Card>::deserialize(deserializer)?;
        Ok(Deck::from_cards(cards))
    }
}
