use super::{DealOptions, GameEngine};
use crate::domain::test_state_helpers::{alice, bob, cards, make_game_state};
use crate::domain::{
    Card, GameState, GameStatus, MoveValidation, MoveValidator, Player, PlayerId, PlayerType,
    StandardTrickResolver, DECK_SIZE,
};
use crate::errors::domain::DomainError;

fn engine_with(state: GameState) -> GameEngine {
    let engine = GameEngine::with_options(DealOptions::unshuffled());
    engine.restore_state(state);
    engine
}

fn players() -> Vec<Player> {
    vec![
        Player::with_id(alice(), "Alice", PlayerType::Local),
        Player::with_id(bob(), "Bob", PlayerType::Ai),
    ]
}

fn reason_of(err: DomainError) -> String {
    match err {
        DomainError::InvalidMove { reason, .. } => reason,
        other => panic!("expected InvalidMove, got {other:?}"),
    }
}

#[test]
fn start_requires_exactly_two_distinct_players() {
    let engine = GameEngine::with_options(DealOptions::unshuffled());

    let one = vec![Player::with_id(alice(), "Alice", PlayerType::Local)];
    assert!(matches!(
        engine.start_new_game(one),
        Err(DomainError::InvalidArgument(_))
    ));

    let mut three = players();
    three.push(Player::with_id("carol", "Carol", PlayerType::Remote));
    assert!(matches!(
        engine.start_new_game(three),
        Err(DomainError::InvalidArgument(_))
    ));

    let twins = vec![
        Player::with_id(alice(), "Alice", PlayerType::Local),
        Player::with_id(alice(), "Alice again", PlayerType::Local),
    ];
    assert!(matches!(
        engine.start_new_game(twins),
        Err(DomainError::InvalidArgument(_))
    ));
    assert!(engine.state().is_none());
}

#[test]
fn unshuffled_deal_hands_out_the_deck_front_first() {
    let engine = GameEngine::with_options(DealOptions::unshuffled());
    let state = engine.start_new_game(players()).unwrap();

    assert_eq!(state.status, GameStatus::InProgress);
    assert_eq!(state.current_turn, Some(alice()));
    assert_eq!(state.players[0].hand.cards(), cards(&["7H", "8H", "9H", "TH"]));
    assert_eq!(state.players[1].hand.cards(), cards(&["JH", "QH", "KH", "AH"]));
    assert_eq!(state.deck.remaining(), DECK_SIZE - 8);
    assert_eq!(state.scores(), [0, 0]);
    assert_eq!(engine.state(), Some(state));
}

#[test]
fn seeded_engines_deal_identically() {
    let a = GameEngine::with_options(DealOptions::seeded(42));
    let b = GameEngine::with_options(DealOptions::seeded(42));
    let sa = a.start_new_game(players()).unwrap();
    let sb = b.start_new_game(players()).unwrap();

    assert_eq!(sa.players[0].hand, sb.players[0].hand);
    assert_eq!(sa.players[1].hand, sb.players[1].hand);
    assert_eq!(sa.deck, sb.deck);
}

#[test]
fn moves_without_a_game_are_rejected() {
    let engine = GameEngine::standard();
    let err = engine.play_cards(&alice(), &cards(&["7H"])).unwrap_err();
    assert_eq!(reason_of(err), "No active game");
    let err = engine.pass_turn(&alice()).unwrap_err();
    assert_eq!(reason_of(err), "No active game");
    assert!(!engine.can_play_cards(&alice(), &cards(&["7H"])));
    assert!(!engine.can_pass(&alice()));
}

#[test]
fn out_of_turn_play_leaves_state_untouched() {
    let engine = GameEngine::with_options(DealOptions::unshuffled());
    engine.start_new_game(players()).unwrap();
    let before = engine.state();

    let err = engine.play_cards(&bob(), &cards(&["JH"])).unwrap_err();
    match err {
        DomainError::InvalidMove {
            reason,
            player,
            attempted,
        } => {
            assert_eq!(reason, "It's not your turn");
            assert_eq!(player, Some(bob()));
            assert_eq!(attempted, cards(&["JH"]));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(engine.state(), before);
}

#[test]
fn lone_seven_lead_beats_non_matching_response() {
    let engine = engine_with(make_game_state(
        &["7H", "KD"],
        &["8S", "QS"],
        &["9C", "9D", "JC", "JD"],
    ));

    let lead = engine.play_cards(&alice(), &cards(&["7H"])).unwrap();
    assert!(lead.resolution.is_none());
    assert_eq!(lead.state.current_turn, Some(bob()));

    let reply = engine.play_cards(&bob(), &cards(&["8S"])).unwrap();
    let resolution = reply.resolution.expect("trick should close");
    assert_eq!(resolution.winner, alice());
    assert_eq!(resolution.points, 0);
    assert!(!resolution.game_over);

    let state = reply.state;
    assert_eq!(state.current_turn, Some(alice()));
    assert_eq!(state.last_trick_winner, Some(alice()));
    assert!(state.trick.is_empty());
    assert_eq!(state.completed_tricks().len(), 1);
    // Winner refills first and takes three; the opponent gets what is left.
    assert_eq!(state.players[0].hand.cards(), cards(&["KD", "9C", "9D", "JC"]));
    assert_eq!(state.players[1].hand.cards(), cards(&["QS", "JD"]));
    assert!(state.deck.is_empty());
}

#[test]
fn partial_match_returns_the_turn_to_the_leader() {
    let engine = engine_with(make_game_state(
        &["9H", "9S", "7D", "KD"],
        &["9C", "8C", "QS"],
        &[],
    ));

    let lead = engine.play_cards(&alice(), &cards(&["9H", "9S"])).unwrap();
    assert_eq!(lead.state.current_turn, Some(bob()));
    assert!(engine.must_respond_to_sequence(&bob()));

    let reply = engine.play_cards(&bob(), &cards(&["9C"])).unwrap();
    assert!(reply.resolution.is_none());
    assert_eq!(reply.state.trick.forgiven(), 1);
    assert_eq!(reply.state.trick.outstanding_count(), 0);
    assert_eq!(reply.state.current_turn, Some(alice()));

    // Leader continues with a seven; the responder owes one card again.
    let more = engine.play_cards(&alice(), &cards(&["7D"])).unwrap();
    assert_eq!(more.state.current_turn, Some(bob()));
    let err = engine.pass_turn(&bob()).unwrap_err();
    assert_eq!(
        reason_of(err),
        "You must play 1 more card(s) to match opponent's count"
    );

    let last = engine.play_cards(&bob(), &cards(&["8C"])).unwrap();
    let resolution = last.resolution.expect("non-matching reply closes the trick");
    assert_eq!(resolution.winner, alice());
    assert_eq!(resolution.cards.len(), 5);
}

#[test]
fn leader_pass_closes_a_matched_trick() {
    let engine = engine_with(make_game_state(&["9H", "9S", "KD"], &["9C", "QS"], &[]));

    let err = engine.pass_turn(&alice()).unwrap_err();
    assert_eq!(reason_of(err), "Cannot pass on first play of trick");

    engine.play_cards(&alice(), &cards(&["9H"])).unwrap();
    let reply = engine.play_cards(&bob(), &cards(&["9C"])).unwrap();
    assert!(reply.resolution.is_none());
    assert_eq!(reply.state.current_turn, Some(alice()));

    let err = engine.pass_turn(&bob()).unwrap_err();
    assert_eq!(reason_of(err), "It's not your turn");

    assert!(engine.can_pass(&alice()));
    let outcome = engine.pass_turn(&alice()).unwrap();
    assert_eq!(outcome.resolution.winner, bob());
    let state = engine.state().unwrap();
    assert_eq!(outcome.state, state, "pass returns the post-resolution snapshot");
    assert_eq!(state.current_turn, Some(bob()));
    assert_eq!(state.completed_tricks().len(), 1);
}

#[test]
fn crossing_the_threshold_ends_the_game() {
    let mut state = make_game_state(&["AH", "KD"], &["AS", "QS"], &["8D", "8C", "8S"]);
    state.players[1].add_score(3);
    let engine = engine_with(state);

    engine.play_cards(&alice(), &cards(&["AH"])).unwrap();
    let reply = engine.play_cards(&bob(), &cards(&["AS"])).unwrap();
    let resolution = reply.resolution.unwrap();

    assert_eq!(resolution.winner, bob());
    assert_eq!(resolution.points, 2);
    assert!(resolution.game_over);
    assert_eq!(reply.state.status, GameStatus::Completed);
    assert_eq!(reply.state.scores(), [0, 5]);
    assert_eq!(reply.state.winner().map(|p| p.id.clone()), Some(bob()));

    let err = engine.play_cards(&bob(), &cards(&["QS"])).unwrap_err();
    assert_eq!(reason_of(err), "Game is already over");
}

#[test]
fn four_all_goes_to_the_last_trick_winner() {
    let mut state = make_game_state(&["TH", "KD"], &["8S", "QS"], &["8D", "8C"]);
    state.players[0].add_score(3);
    state.players[1].add_score(4);
    let engine = engine_with(state);

    engine.play_cards(&alice(), &cards(&["TH"])).unwrap();
    let reply = engine.play_cards(&bob(), &cards(&["8S"])).unwrap();

    assert!(reply.resolution.unwrap().game_over);
    assert_eq!(reply.state.scores(), [4, 4]);
    assert_eq!(reply.state.winner().map(|p| p.id.clone()), Some(alice()));
}

#[test]
fn exhausted_deck_and_hands_complete_the_game() {
    let engine = engine_with(make_game_state(&["TH"], &["8S"], &[]));

    engine.play_cards(&alice(), &cards(&["TH"])).unwrap();
    let reply = engine.play_cards(&bob(), &cards(&["8S"])).unwrap();

    assert!(reply.resolution.unwrap().game_over);
    assert_eq!(reply.state.status, GameStatus::Completed);
    assert_eq!(reply.state.scores(), [1, 0]);
    assert_eq!(reply.state.deck.remaining(), 0);
}

#[test]
fn empty_handed_winner_yields_the_lead() {
    let engine = engine_with(make_game_state(&["7H"], &["8C", "QS"], &[]));

    engine.play_cards(&alice(), &cards(&["7H"])).unwrap();
    let reply = engine.play_cards(&bob(), &cards(&["8C"])).unwrap();

    assert_eq!(reply.resolution.unwrap().winner, alice());
    assert_eq!(reply.state.status, GameStatus::InProgress);
    assert_eq!(reply.state.current_turn, Some(bob()));
}

#[test]
fn empty_handed_responder_concedes_the_trick() {
    let engine = engine_with(make_game_state(&["9H", "KD"], &[], &[]));

    let first = engine.play_cards(&alice(), &cards(&["9H"])).unwrap();
    assert_eq!(first.resolution.unwrap().winner, alice());
    assert_eq!(first.state.status, GameStatus::InProgress);
    assert_eq!(first.state.current_turn, Some(alice()));

    let last = engine.play_cards(&alice(), &cards(&["KD"])).unwrap();
    assert!(last.resolution.unwrap().game_over);
    assert_eq!(last.state.status, GameStatus::Completed);
}

#[test]
fn can_play_cards_is_query_only() {
    let engine = engine_with(make_game_state(&["9H", "KD"], &["9C"], &[]));
    let before = engine.state();
    assert!(engine.can_play_cards(&alice(), &cards(&["9H"])));
    assert!(!engine.can_play_cards(&alice(), &cards(&["9H", "KD"])));
    assert!(!engine.can_play_cards(&bob(), &cards(&["9C"])));
    assert_eq!(engine.state(), before);
}

#[test]
fn end_reset_and_restore() {
    let engine = GameEngine::with_options(DealOptions::unshuffled());
    engine.end_game(true);
    assert!(engine.state().is_none());

    let started = engine.start_new_game(players()).unwrap();
    assert!(engine.has_active_game());
    engine.end_game(true);
    assert_eq!(engine.state().unwrap().status, GameStatus::Cancelled);
    assert!(!engine.has_active_game());

    engine.reset_game();
    engine.reset_game();
    assert!(engine.state().is_none());

    engine.restore_state(started.clone());
    assert_eq!(engine.state(), Some(started));
}

struct RejectEverything;

impl MoveValidator for RejectEverything {
    fn validate(
        &self,
        _state: &GameState,
        _player: &PlayerId,
        _cards: &[Card],
    ) -> Result<MoveValidation, DomainError> {
        Ok(MoveValidation::invalid("table is closed"))
    }

    fn must_respond_to_sequence(&self, _state: &GameState, _player: &PlayerId) -> bool {
        false
    }
}

#[test]
fn substitute_validator_drives_rejections() {
    let engine = GameEngine::new(
        Box::new(RejectEverything),
        Box::new(StandardTrickResolver::new()),
        DealOptions::unshuffled(),
    );
    engine.start_new_game(players()).unwrap();
    let before = engine.state();

    let err = engine.play_cards(&alice(), &cards(&["7H"])).unwrap_err();
    assert_eq!(reason_of(err), "table is closed");
    assert_eq!(engine.state(), before);
}
