// Proptest generators for domain types.
// Cards drawn together are unique, as they would be from a single deck.

use proptest::prelude::*;

use crate::domain::{Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (rank(), suit()).prop_map(|(rank, suit)| Card::new(rank, suit))
}

/// `count` distinct cards from the 32-card deck.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    let all: Vec<Card> = Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect();
    Just(all).prop_shuffle().prop_map(move |mut cards| {
        cards.truncate(count);
        cards
    })
}

/// A strictly alternating single-card trick: (cards, leader_first).
/// Card `i` belongs to the leader when `i` is even.
pub fn alternating_trick(max_len: usize) -> impl Strategy<Value = Vec<Card>> {
    (1..=max_len).prop_flat_map(unique_cards)
}

/// Owner sequence for a trick: `true` means the leader placed that card.
/// The first card always belongs to the leader.
pub fn owner_sequence(max_len: usize) -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..max_len).prop_map(|mut rest| {
        rest.insert(0, true);
        rest
    })
}
