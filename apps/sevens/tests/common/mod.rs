#![allow(dead_code)]

pub mod proptest_prelude;

use sevens::ai::{AiAction, AiPlayer, RandomPlayer};
use sevens::domain::{try_parse_cards, Deck};
use sevens::{
    Card, DealOptions, GameEngine, GameState, GameStatus, Player, PlayerId, PlayerType,
};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    sevens_test_support::logging::init();
}

pub fn alice() -> PlayerId {
    PlayerId::from("alice")
}

pub fn bob() -> PlayerId {
    PlayerId::from("bob")
}

pub fn players() -> Vec<Player> {
    vec![
        Player::with_id(alice(), "Alice", PlayerType::Local),
        Player::with_id(bob(), "Bob", PlayerType::Ai),
    ]
}

pub fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens).expect("hardcoded valid card tokens")
}

/// In-progress game with fixed hands and deck, alice to lead.
pub fn state_with(alice_hand: &[&str], bob_hand: &[&str], deck: &[&str]) -> GameState {
    let [mut a, mut b]: [Player; 2] = players().try_into().expect("two players");
    a.hand.add_cards(&cards(alice_hand)).expect("hand fits");
    b.hand.add_cards(&cards(bob_hand)).expect("hand fits");

    let mut state = GameState::new([a, b]);
    state.deck = Deck::from_cards(cards(deck));
    state.current_turn = Some(alice());
    state.status = GameStatus::InProgress;
    state
}

pub fn engine_with(state: GameState) -> GameEngine {
    let engine = GameEngine::with_options(DealOptions::unshuffled());
    engine.restore_state(state);
    engine
}

pub fn random_pair(seed: u64) -> [RandomPlayer; 2] {
    [RandomPlayer::new(Some(seed)), RandomPlayer::new(Some(seed ^ 0x5eed))]
}

/// Let the turn holder's AI take one action. `false` once the game is over.
pub fn step(engine: &GameEngine, ais: &[RandomPlayer; 2]) -> bool {
    let state = engine.state().expect("game loaded");
    if state.status != GameStatus::InProgress {
        return false;
    }
    let turn = state.current_turn.clone().expect("turn holder");
    let seat = state.seat_of(&turn).expect("turn holder seated");
    match ais[seat].choose_action(&state, &turn).expect("legal action") {
        AiAction::Play(cards) => {
            engine.play_cards(&turn, &cards).expect("AI plays are legal");
        }
        AiAction::Pass => {
            engine.pass_turn(&turn).expect("AI passes are legal");
        }
    }
    true
}

/// Drive a started game to completion with seeded random players, calling
/// `observe` on the state after every accepted action. Returns the final
/// state and the number of actions taken.
pub fn play_out(
    engine: &GameEngine,
    seed: u64,
    mut observe: impl FnMut(&GameState),
) -> (GameState, usize) {
    let ais = random_pair(seed);
    let mut actions = 0;
    while step(engine, &ais) {
        actions += 1;
        assert!(actions < 1_000, "game did not finish");
        observe(&engine.state().expect("game loaded"));
    }
    (engine.state().expect("game loaded"), actions)
}
