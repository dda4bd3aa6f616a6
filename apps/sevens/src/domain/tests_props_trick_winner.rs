//! Property tests for trick winner determination (pure domain).
//!
//! Properties tested:
//! - The winner is whoever last matched the opening rank or played a seven
//! - Suits never influence the winner
//! - The winner is a pure function of the trick's contents

use proptest::prelude::*;

use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{alice, bob};
use crate::domain::{Card, PlayerId, StandardTrickResolver, Trick, TrickResolver};

fn build_trick(cards: &[Card], owners: &[bool]) -> Trick {
    let mut trick = Trick::new();
    for (card, leader_owned) in cards.iter().zip(owners) {
        let who = if *leader_owned { alice() } else { bob() };
        trick.add_card(*card, &who);
    }
    trick
}

/// Straight re-scan of the plays, for comparison with the running marker.
fn rescan_winner(cards: &[Card], owners: &[bool]) -> PlayerId {
    let opening = cards[0].rank;
    let mut winner = alice();
    for (card, leader_owned) in cards.iter().zip(owners) {
        if card.rank == opening || card.is_trump() {
            winner = if *leader_owned { alice() } else { bob() };
        }
    }
    winner
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: marker-based winner equals a full re-scan of the plays.
    #[test]
    fn prop_winner_matches_rescan(
        (cards, owners) in test_gens::owner_sequence(8).prop_flat_map(|owners| {
            let len = owners.len();
            (test_gens::unique_cards(len), Just(owners))
        }),
    ) {
        let trick = build_trick(&cards, &owners);
        let resolver = StandardTrickResolver::new();
        let winner = resolver.determine_trick_winner(&trick, &alice(), &bob()).unwrap();
        prop_assert_eq!(winner, rescan_winner(&cards, &owners));
    }

    /// Property: rewriting every suit leaves the winner unchanged.
    #[test]
    fn prop_winner_ignores_suits(
        (cards, owners, suits) in test_gens::owner_sequence(8).prop_flat_map(|owners| {
            let len = owners.len();
            (
                test_gens::unique_cards(len),
                Just(owners),
                prop::collection::vec(test_gens::suit(), len),
            )
        }),
    ) {
        let resolver = StandardTrickResolver::new();
        let original = build_trick(&cards, &owners);
        let recoloured: Vec<Card> = cards
            .iter()
            .zip(&suits)
            .map(|(c, s)| Card::new(c.rank, *s))
            .collect();
        let recoloured = build_trick(&recoloured, &owners);

        let w1 = resolver.determine_trick_winner(&original, &alice(), &bob()).unwrap();
        let w2 = resolver.determine_trick_winner(&recoloured, &alice(), &bob()).unwrap();
        prop_assert_eq!(w1, w2);
    }

    /// Property: same contents, same answer, regardless of argument order.
    #[test]
    fn prop_winner_is_pure(
        (cards, owners) in test_gens::owner_sequence(8).prop_flat_map(|owners| {
            let len = owners.len();
            (test_gens::unique_cards(len), Just(owners))
        }),
    ) {
        let resolver = StandardTrickResolver::new();
        let a = build_trick(&cards, &owners);
        let b = build_trick(&cards, &owners);
        let w1 = resolver.determine_trick_winner(&a, &alice(), &bob()).unwrap();
        let w2 = resolver.determine_trick_winner(&b, &bob(), &alice()).unwrap();
        prop_assert_eq!(w1, w2);
    }

    /// Property: points are the count of tens and aces.
    #[test]
    fn prop_points_count_tens_and_aces(cards in (1usize..=8).prop_flat_map(test_gens::unique_cards)) {
        let owners = vec![true; cards.len()];
        let trick = build_trick(&cards, &owners);
        let expected = cards
            .iter()
            .filter(|c| matches!(c.rank, crate::domain::Rank::Ten | crate::domain::Rank::Ace))
            .count() as u32;
        prop_assert_eq!(StandardTrickResolver::new().calculate_trick_points(&trick), expected);
    }
}
