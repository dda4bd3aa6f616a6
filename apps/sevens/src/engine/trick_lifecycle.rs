use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::GameEngine;
use crate::domain::rules::{score_verdict, ScoreVerdict, MAX_HAND_SIZE};
use crate::domain::{format_cards, Card, GameState, GameStatus, PlayerId};
use crate::errors::domain::DomainError;

/// How a closed trick was settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickResolution {
    pub winner: PlayerId,
    pub points: u32,
    /// Every card in the trick, in play order.
    pub cards: Vec<Card>,
    pub game_over: bool,
}

impl GameEngine {
    /// Score, archive, refill, check for game end, hand the lead to the winner.
    pub(super) fn resolve_trick(
        &self,
        state: &mut GameState,
    ) -> Result<TrickResolution, DomainError> {
        let seat0 = state.players[0].id.clone();
        let seat1 = state.players[1].id.clone();
        let winner_id = self
            .resolver
            .determine_trick_winner(&state.trick, &seat0, &seat1)?;
        let opponent_id = state.require_opponent_id(&winner_id, "resolve_trick")?;
        let points = self.resolver.calculate_trick_points(&state.trick);
        let cards = state.trick.cards();
        let game_id = state.game_id;

        let winner = state.player_mut(&winner_id).ok_or_else(|| {
            DomainError::illegal_state(format!("trick winner {winner_id} not seated"))
        })?;
        winner.add_score(points);
        info!(
            %game_id,
            winner = %winner.display_name,
            points,
            score = winner.score(),
            cards = %format_cards(&cards),
            "Trick won"
        );

        state.last_trick_winner = Some(winner_id.clone());
        state.archive_current_trick();

        refill_hand(state, &winner_id)?;
        refill_hand(state, &opponent_id)?;

        let game_over = check_game_end(state);
        state.current_turn = Some(next_leader(state, winner_id.clone(), opponent_id));
        state.touch();

        Ok(TrickResolution {
            winner: winner_id,
            points,
            cards,
            game_over,
        })
    }
}

/// Draw up to a full hand while the deck lasts.
fn refill_hand(state: &mut GameState, id: &PlayerId) -> Result<(), DomainError> {
    let held = state.require_player(id, "refill_hand")?.hand.len();
    let needed = MAX_HAND_SIZE.saturating_sub(held);
    if needed == 0 || state.deck.is_empty() {
        return Ok(());
    }

    let drawn = state.deck.draw(needed);
    let player = state
        .player_mut(id)
        .ok_or_else(|| DomainError::illegal_state(format!("player {id} not seated (refill_hand)")))?;
    player.hand.add_cards(&drawn)?;
    debug!(
        player = %player.display_name,
        drew = drawn.len(),
        hand = player.hand.len(),
        "Refilled hand"
    );
    Ok(())
}

/// Mark the game completed if a win condition holds. Returns whether it did.
fn check_game_end(state: &mut GameState) -> bool {
    let scores = state.scores();
    match score_verdict(scores) {
        ScoreVerdict::Outright(seat) => {
            info!(
                game_id = %state.game_id,
                winner = %state.players[seat].display_name,
                score = scores[seat],
                "Game over"
            );
        }
        ScoreVerdict::Tied => {
            info!(
                game_id = %state.game_id,
                last_trick_winner = ?state.last_trick_winner,
                "Game over, tied on points, last trick decides"
            );
        }
        ScoreVerdict::Undecided => {
            let exhausted =
                state.deck.is_empty() && state.players.iter().all(|p| p.hand.is_empty());
            if !exhausted {
                return false;
            }
            info!(
                game_id = %state.game_id,
                scores = ?scores,
                "Game over, deck exhausted"
            );
        }
    }
    state.status = GameStatus::Completed;
    true
}

/// The trick winner leads next, unless they have nothing left to lead with
/// and the opponent still holds cards.
fn next_leader(state: &GameState, winner: PlayerId, opponent: PlayerId) -> PlayerId {
    if state.status != GameStatus::InProgress {
        return winner;
    }
    let winner_empty = state.player(&winner).is_some_and(|p| p.hand.is_empty());
    let opponent_holds = state.player(&opponent).is_some_and(|p| !p.hand.is_empty());
    if winner_empty && opponent_holds {
        debug!(winner = %winner, next = %opponent, "Winner has no cards, opponent leads");
        return opponent;
    }
    winner
}
