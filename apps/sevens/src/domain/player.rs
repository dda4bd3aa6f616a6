use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Hand;

/// Stable player identity. Opaque string; fresh players get a UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerType {
    Local,
    Remote,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub player_type: PlayerType,
    pub hand: Hand,
    score: u32,
}

impl Player {
    pub fn new(display_name: impl Into<String>, player_type: PlayerType) -> Self {
        Self::with_id(PlayerId::random(), display_name, player_type)
    }

    pub fn with_id(
        id: impl Into<PlayerId>,
        display_name: impl Into<String>,
        player_type: PlayerType,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            player_type,
            hand: Hand::new(),
            score: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Scores only grow during a game.
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Explicit reset at the start of a game.
    pub fn reset_score(&mut self) {
        self.score = 0;
    }
}
