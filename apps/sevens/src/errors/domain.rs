//! Domain-level error type used by the engine and everything that drives it.
//!
//! This error type is I/O-agnostic. Collaborators (sessions, binaries,
//! persistence) wrap it in `crate::error::AppError`.

use thiserror::Error;

use crate::domain::{format_cards, Card, PlayerId};

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed call (wrong player count and similar). Never a game-rule outcome.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Rule violation. State is guaranteed untouched when this is returned.
    #[error("invalid move: {reason}")]
    InvalidMove {
        reason: String,
        player: Option<PlayerId>,
        attempted: Vec<Card>,
    },

    /// Internal invariant violated; the game instance should be discarded.
    #[error("illegal state: {0}")]
    IllegalState(String),
}

impl DomainError {
    pub fn invalid_argument(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }

    /// Rule violation carrying the offending player and the cards they tried.
    pub fn rejected_move(reason: impl Into<String>, player: &PlayerId, attempted: &[Card]) -> Self {
        Self::InvalidMove {
            reason: reason.into(),
            player: Some(player.clone()),
            attempted: attempted.to_vec(),
        }
    }

    pub fn illegal_state(detail: impl Into<String>) -> Self {
        Self::IllegalState(detail.into())
    }

    /// Human-readable reason, for InvalidMove the bare rule text.
    pub fn reason(&self) -> &str {
        match self {
            DomainError::InvalidArgument(d) => d,
            DomainError::InvalidMove { reason, .. } => reason,
            DomainError::IllegalState(d) => d,
        }
    }

    pub fn is_invalid_move(&self) -> bool {
        matches!(self, DomainError::InvalidMove { .. })
    }

    /// One-line description of a rejected move for logs.
    pub fn move_description(&self) -> Option<String> {
        match self {
            DomainError::InvalidMove {
                player: Some(player),
                attempted,
                ..
            } => Some(format!("{player} tried {}", format_cards(attempted))),
            _ => None,
        }
    }
}
