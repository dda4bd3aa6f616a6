use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::rules::{score_verdict, ScoreVerdict, PLAYERS};
use super::{Deck, Player, PlayerId, Trick};
use crate::errors::domain::DomainError;

/// Lifecycle of a single game.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    NotStarted,
    InProgress,
    /// Terminal.
    Completed,
    /// Terminal.
    Cancelled,
}

/// Aggregate root for one game. Mutated only through the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: Uuid,
    /// Seat 0 and seat 1. Seat 0 leads the first trick.
    pub players: [Player; PLAYERS],
    pub deck: Deck,
    /// Trick currently on the table.
    pub trick: Trick,
    completed_tricks: Vec<Trick>,
    /// Player expected to act next.
    /// - Some(id) while a game is in progress
    /// - None before the first deal
    pub current_turn: Option<PlayerId>,
    pub last_trick_winner: Option<PlayerId>,
    pub status: GameStatus,
    pub created_at: OffsetDateTime,
    pub last_modified_at: OffsetDateTime,
}

impl GameState {
    pub fn new(players: [Player; PLAYERS]) -> Self {
        Self::with_id(Uuid::new_v4(), players)
    }

    pub fn with_id(game_id: Uuid, players: [Player; PLAYERS]) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            game_id,
            players,
            deck: Deck::standard(),
            trick: Trick::new(),
            completed_tricks: Vec::new(),
            current_turn: None,
            last_trick_winner: None,
            status: GameStatus::NotStarted,
            created_at: now,
            last_modified_at: now,
        }
    }

    pub fn seat_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// The other seat, if `id` is seated at all.
    pub fn opponent(&self, id: &PlayerId) -> Option<&Player> {
        self.seat_of(id).map(|seat| &self.players[1 - seat])
    }

    pub fn require_player(&self, id: &PlayerId, ctx: &'static str) -> Result<&Player, DomainError> {
        self.player(id).ok_or_else(|| {
            DomainError::illegal_state(format!("Invariant violated: player {id} not seated ({ctx})"))
        })
    }

    pub fn require_opponent_id(
        &self,
        id: &PlayerId,
        ctx: &'static str,
    ) -> Result<PlayerId, DomainError> {
        self.opponent(id).map(|p| p.id.clone()).ok_or_else(|| {
            DomainError::illegal_state(format!(
                "Invariant violated: no opponent for player {id} ({ctx})"
            ))
        })
    }

    pub fn completed_tricks(&self) -> &[Trick] {
        &self.completed_tricks
    }

    /// Move the live trick into the archive. No-op when the trick is empty.
    pub fn archive_current_trick(&mut self) {
        if self.trick.has_cards() {
            let finished = std::mem::take(&mut self.trick);
            self.completed_tricks.push(finished);
            self.touch();
        }
    }

    pub fn scores(&self) -> [u32; PLAYERS] {
        [self.players[0].score(), self.players[1].score()]
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::Completed | GameStatus::Cancelled)
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// Who the current scores favour. Display only; never ends the game.
    pub fn winner(&self) -> Option<&Player> {
        if self.status == GameStatus::NotStarted {
            return None;
        }
        match score_verdict(self.scores()) {
            ScoreVerdict::Outright(seat) => Some(&self.players[seat]),
            ScoreVerdict::Tied => self
                .last_trick_winner
                .as_ref()
                .and_then(|id| self.player(id)),
            ScoreVerdict::Undecided => None,
        }
    }

    /// Every card in the game, wherever it currently sits.
    pub fn card_count(&self) -> usize {
        let hands: usize = self.players.iter().map(|p| p.hand.len()).sum();
        let archived: usize = self.completed_tricks.iter().map(Trick::len).sum();
        self.deck.remaining() + hands + self.trick.len() + archived
    }

    pub fn touch(&mut self) {
        self.last_modified_at = OffsetDateTime::now_utc();
    }
}
