//! Trick winner, points, and completion.

use super::{GameState, PlayerId, Rank, Trick};
use crate::errors::domain::DomainError;

pub trait TrickResolver: Send + Sync {
    fn determine_trick_winner(
        &self,
        trick: &Trick,
        player1: &PlayerId,
        player2: &PlayerId,
    ) -> Result<PlayerId, DomainError>;

    fn calculate_trick_points(&self, trick: &Trick) -> u32;

    fn is_trick_complete(&self, trick: &Trick, state: &GameState) -> Result<bool, DomainError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTrickResolver;

impl StandardTrickResolver {
    pub fn new() -> Self {
        Self
    }
}

impl TrickResolver for StandardTrickResolver {
    /// Whoever last matched the opening rank or trumped; the leader by default.
    fn determine_trick_winner(
        &self,
        trick: &Trick,
        player1: &PlayerId,
        player2: &PlayerId,
    ) -> Result<PlayerId, DomainError> {
        let leader = trick.leader().ok_or_else(|| {
            DomainError::illegal_state("Cannot determine winner of an empty trick")
        })?;
        if leader != player1 && leader != player2 {
            return Err(DomainError::illegal_state(format!(
                "Trick leader {leader} is not one of the two players"
            )));
        }
        Ok(trick
            .last_matching_or_trump_player()
            .unwrap_or(leader)
            .clone())
    }

    fn calculate_trick_points(&self, trick: &Trick) -> u32 {
        trick.calculate_points()
    }

    fn is_trick_complete(&self, trick: &Trick, state: &GameState) -> Result<bool, DomainError> {
        if trick.len() < 2 {
            return Ok(false);
        }
        let (Some(leader_id), Some(opening)) = (trick.leader(), trick.opening_rank()) else {
            return Ok(false);
        };
        let leader = state.require_player(leader_id, "is_trick_complete")?;
        state.require_opponent_id(leader_id, "is_trick_complete")?;

        if trick.outstanding_count() > 0 {
            return Ok(false);
        }

        let Some(last_response) = trick.last_responding_card() else {
            // Forgiven without a single responding card cannot happen through the engine.
            return Ok(false);
        };

        if last_response.rank != opening && !last_response.is_trump() {
            return Ok(true);
        }

        let leader_can_continue =
            leader.hand.contains_rank(opening) || leader.hand.contains_rank(Rank::Seven);
        Ok(!leader_can_continue)
    }
}
