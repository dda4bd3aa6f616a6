use serde::{Deserialize, Serialize};

use super::rules::MAX_HAND_SIZE;
use super::{format_cards, Card, Rank};
use crate::errors::domain::DomainError;

/// A player's cards. Never holds more than [`MAX_HAND_SIZE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(MAX_HAND_SIZE),
        }
    }

    pub fn add_card(&mut self, card: Card) -> Result<(), DomainError> {
        if self.cards.len() >= MAX_HAND_SIZE {
            return Err(DomainError::illegal_state(format!(
                "Hand is full (max {MAX_HAND_SIZE})"
            )));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Adds all cards or none.
    pub fn add_cards(&mut self, cards: &[Card]) -> Result<(), DomainError> {
        if self.cards.len() + cards.len() > MAX_HAND_SIZE {
            return Err(DomainError::illegal_state(format!(
                "Cannot add {} cards to hand with {} cards (max {MAX_HAND_SIZE})",
                cards.len(),
                self.cards.len()
            )));
        }
        self.cards.extend_from_slice(cards);
        Ok(())
    }

    /// Whether the card was present (and is now gone).
    pub fn remove_card(&mut self, card: &Card) -> bool {
        match self.cards.iter().position(|c| c == card) {
            Some(pos) => {
                self.cards.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn contains_rank(&self, rank: Rank) -> bool {
        self.cards.iter().any(|c| c.rank == rank)
    }

    pub fn cards_with_rank(&self, rank: Rank) -> Vec<Card> {
        self.cards.iter().copied().filter(|c| c.rank == rank).collect()
    }

    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank == rank).count()
    }

    pub fn has_trump(&self) -> bool {
        self.cards.iter().any(Card::is_trump)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= MAX_HAND_SIZE
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hand{}", format_cards(&self.cards))
    }
}
