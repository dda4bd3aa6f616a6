use tracing::debug;

use super::trick_lifecycle::TrickResolution;
use super::GameEngine;
use crate::domain::{
    format_cards, partial_match_shortfall, pass_rejection, Card, GameState, GameStatus,
    MoveValidation, PlayerId,
};
use crate::errors::domain::DomainError;

/// Result of an accepted play.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOutcome {
    /// Snapshot taken right after the play (and any resolution it caused).
    pub state: GameState,
    /// Present when the play completed the trick.
    pub resolution: Option<TrickResolution>,
}

/// Result of an accepted pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutcome {
    /// Snapshot taken right after the trick was resolved.
    pub state: GameState,
    pub resolution: TrickResolution,
}

impl GameEngine {
    /// Put `cards` from `player`'s hand into the live trick.
    ///
    /// Rejected moves return `InvalidMove` and leave the game untouched.
    pub fn play_cards(
        &self,
        player: &PlayerId,
        cards: &[Card],
    ) -> Result<PlayOutcome, DomainError> {
        let mut inner = self.inner.lock();
        let state = require_active(&mut inner.state, player, cards)?;

        if let MoveValidation::Invalid(reason) = self.validator.validate(state, player, cards)? {
            debug!(player = %player, cards = %format_cards(cards), %reason, "Move rejected");
            return Err(DomainError::rejected_move(reason, player, cards));
        }

        let opened = state.trick.is_empty();
        let shortfall = partial_match_shortfall(&state.trick, player, cards);

        let hand = &mut state
            .player_mut(player)
            .ok_or_else(|| DomainError::illegal_state(format!("player {player} vanished mid-play")))?
            .hand;
        for card in cards {
            if !hand.remove_card(card) {
                return Err(DomainError::illegal_state(format!(
                    "validated card {card} missing from hand of {player}"
                )));
            }
        }
        for card in cards {
            state.trick.add_card(*card, player);
        }
        if shortfall > 0 {
            debug!(player = %player, shortfall, "Partial match accepted");
            state.trick.forgive_shortfall(shortfall);
        }
        state.touch();
        debug!(player = %player, cards = %format_cards(cards), trick = %state.trick, "Cards played");

        let resolution = if self.resolver.is_trick_complete(&state.trick, state)? {
            Some(self.resolve_trick(state)?)
        } else {
            let next = next_to_act(state, player, opened)?;
            let owes = state.trick.outstanding_count() > 0;
            if owes && state.player(&next).is_some_and(|p| p.hand.is_empty()) {
                debug!(responder = %next, "Responder has no cards left, closing trick");
                Some(self.resolve_trick(state)?)
            } else {
                debug!(next = %next, "Turn advanced");
                state.current_turn = Some(next);
                None
            }
        };

        Ok(PlayOutcome {
            state: state.clone(),
            resolution,
        })
    }

    /// Decline to continue, closing the live trick immediately.
    pub fn pass_turn(&self, player: &PlayerId) -> Result<PassOutcome, DomainError> {
        let mut inner = self.inner.lock();
        let state = require_active(&mut inner.state, player, &[])?;

        if let Some(reason) = pass_rejection(state, player) {
            debug!(player = %player, %reason, "Pass rejected");
            return Err(DomainError::rejected_move(reason, player, &[]));
        }

        debug!(player = %player, "Player passes, resolving trick");
        let resolution = self.resolve_trick(state)?;
        Ok(PassOutcome {
            state: state.clone(),
            resolution,
        })
    }
}

fn require_active<'a>(
    slot: &'a mut Option<GameState>,
    player: &PlayerId,
    cards: &[Card],
) -> Result<&'a mut GameState, DomainError> {
    let state = slot
        .as_mut()
        .ok_or_else(|| DomainError::rejected_move("No active game", player, cards))?;
    match state.status {
        GameStatus::InProgress => Ok(state),
        GameStatus::NotStarted => Err(DomainError::rejected_move(
            "Game has not started",
            player,
            cards,
        )),
        GameStatus::Completed | GameStatus::Cancelled => Err(DomainError::rejected_move(
            "Game is already over",
            player,
            cards,
        )),
    }
}

/// Who acts after a play that left the trick open.
///
/// An opening lead passes to the opponent. After that the responder acts
/// while they still owe cards, otherwise the leader may continue or pass.
fn next_to_act(state: &GameState, player: &PlayerId, opened: bool) -> Result<PlayerId, DomainError> {
    if opened {
        return state.require_opponent_id(player, "next_to_act");
    }
    let leader = state
        .trick
        .leader()
        .ok_or_else(|| DomainError::illegal_state("open trick without a leader"))?;
    if state.trick.outstanding_count() > 0 {
        state.require_opponent_id(leader, "next_to_act")
    } else {
        Ok(leader.clone())
    }
}
