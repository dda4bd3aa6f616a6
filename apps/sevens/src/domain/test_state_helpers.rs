//! Test-only game state builders for domain unit tests.

use crate::domain::{
    try_parse_cards, Card, Deck, GameState, GameStatus, Player, PlayerId, PlayerType,
};

pub fn alice() -> PlayerId {
    PlayerId::from("alice")
}

pub fn bob() -> PlayerId {
    PlayerId::from("bob")
}

pub fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).expect("hardcoded valid card tokens")
}

/// In-progress state with the given hands, alice to act, and an empty deck
/// unless `deck` lists cards.
pub fn make_game_state(alice_hand: &[&str], bob_hand: &[&str], deck: &[&str]) -> GameState {
    let mut a = Player::with_id(alice(), "Alice", PlayerType::Local);
    let mut b = Player::with_id(bob(), "Bob", PlayerType::Local);
    a.hand.add_cards(&cards(alice_hand)).expect("hand fits");
    b.hand.add_cards(&cards(bob_hand)).expect("hand fits");

    let mut state = GameState::new([a, b]);
    state.deck = Deck::from_cards(cards(deck));
    state.current_turn = Some(alice());
    state.status = GameStatus::InProgress;
    state
}

/// Replay plays into the live trick, removing each card from its owner's hand.
pub fn put_down(state: &mut GameState, who: &PlayerId, tokens: &[&str]) {
    for card in cards(tokens) {
        let player = state.player_mut(who).expect("seated");
        assert!(player.hand.remove_card(&card), "{card} not in hand");
        state.trick.add_card(card, who);
    }
}
