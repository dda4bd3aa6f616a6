//! AI player trait definition.

use std::fmt;

use crate::domain::{
    enumerate_candidate_plays, pass_rejection, Card, GameState, MoveValidator, PlayerId,
    StandardMoveValidator,
};

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI encountered an internal error
    Internal(String),
    /// No legal action exists for the seat asked to act
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

/// What an AI decides to do on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiAction {
    Play(Vec<Card>),
    Pass,
}

/// Trait for AI players.
///
/// Implementations see the full game state and must return an action the
/// engine will accept for `me`. [`legal_actions`] lists them.
pub trait AiPlayer: Send + Sync {
    fn choose_action(&self, state: &GameState, me: &PlayerId) -> Result<AiAction, AiError>;
}

/// Every action the standard rules allow `me` right now: all validated
/// same-rank plays, then `Pass` when passing is permitted.
pub fn legal_actions(state: &GameState, me: &PlayerId) -> Result<Vec<AiAction>, AiError> {
    let player = state
        .player(me)
        .ok_or_else(|| AiError::Internal(format!("player {me} not seated")))?;
    let validator = StandardMoveValidator::new();

    let mut actions = Vec::new();
    for cards in enumerate_candidate_plays(&player.hand) {
        let verdict = validator
            .validate(state, me, &cards)
            .map_err(|e| AiError::Internal(e.to_string()))?;
        if verdict.is_valid() {
            actions.push(AiAction::Play(cards));
        }
    }
    if pass_rejection(state, me).is_none() {
        actions.push(AiAction::Pass);
    }
    Ok(actions)
}
