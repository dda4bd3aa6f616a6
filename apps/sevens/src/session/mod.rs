//! Call contract for whatever drives a game: terminal, simulator, tests.

mod local;

pub use local::LocalGameSession;

use crate::domain::{Card, GameState, Player, PlayerId};
use crate::engine::{PassOutcome, PlayOutcome};
use crate::error::AppError;

pub trait GameSession: Send + Sync {
    fn state(&self) -> Option<GameState>;

    fn start(&self, players: Vec<Player>) -> Result<GameState, AppError>;

    fn play_cards(&self, player: &PlayerId, cards: &[Card]) -> Result<PlayOutcome, AppError>;

    fn pass_turn(&self, player: &PlayerId) -> Result<PassOutcome, AppError>;

    fn restore_state(&self, state: GameState);

    /// Deal a fresh game for the current players. `Ok(None)` without a game.
    fn reset_and_restart(&self) -> Result<Option<GameState>, AppError>;

    fn end_game(&self, cancelled: bool);
}
