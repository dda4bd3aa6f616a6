//! Turn-sequencing state machine for a single game.
//!
//! Every public call takes the engine lock for its whole duration, so calls
//! are atomic with respect to one another. Validation always finishes before
//! any mutation. The engine knows nothing about events, storage, or I/O.

mod player_actions;
mod trick_lifecycle;

#[cfg(test)]
mod tests_engine;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use player_actions::{PassOutcome, PlayOutcome};
pub use trick_lifecycle::TrickResolution;

use crate::domain::rules::{MAX_HAND_SIZE, PLAYERS};
use crate::domain::{
    pass_rejection, Card, GameState, GameStatus, MoveValidator, Player, PlayerId,
    StandardMoveValidator, StandardTrickResolver, TrickResolver,
};
use crate::errors::domain::DomainError;

/// How new games are dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealOptions {
    /// Fixed seed for the shuffle RNG. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Unshuffled decks deal in standard order (suit by suit, seven to ace).
    pub shuffle: bool,
}

impl Default for DealOptions {
    fn default() -> Self {
        Self {
            seed: None,
            shuffle: true,
        }
    }
}

impl DealOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            shuffle: true,
        }
    }

    pub fn unshuffled() -> Self {
        Self {
            seed: None,
            shuffle: false,
        }
    }
}

struct EngineInner {
    state: Option<GameState>,
    rng: ChaCha8Rng,
    deal: DealOptions,
}

pub struct GameEngine {
    validator: Box<dyn MoveValidator>,
    resolver: Box<dyn TrickResolver>,
    inner: Mutex<EngineInner>,
}

impl GameEngine {
    pub fn new(
        validator: Box<dyn MoveValidator>,
        resolver: Box<dyn TrickResolver>,
        deal: DealOptions,
    ) -> Self {
        let rng = match deal.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            validator,
            resolver,
            inner: Mutex::new(EngineInner {
                state: None,
                rng,
                deal,
            }),
        }
    }

    /// Standard rules with the given deal options.
    pub fn with_options(deal: DealOptions) -> Self {
        Self::new(
            Box::new(StandardMoveValidator::new()),
            Box::new(StandardTrickResolver::new()),
            deal,
        )
    }

    /// Standard rules, shuffled from OS entropy.
    pub fn standard() -> Self {
        Self::with_options(DealOptions::default())
    }

    /// Replace any current game with a freshly dealt one.
    ///
    /// The first listed player leads. Returns a snapshot of the new state.
    pub fn start_new_game(&self, players: Vec<Player>) -> Result<GameState, DomainError> {
        let players: [Player; PLAYERS] = players.try_into().map_err(|given: Vec<Player>| {
            DomainError::invalid_argument(format!(
                "Game requires exactly {PLAYERS} players, got {}",
                given.len()
            ))
        })?;
        if players[0].id == players[1].id {
            return Err(DomainError::invalid_argument(format!(
                "Players must have distinct ids, both are {}",
                players[0].id
            )));
        }

        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        info!(
            player1 = %players[0].display_name,
            player2 = %players[1].display_name,
            "Starting new game"
        );

        let first = players[0].id.clone();
        let mut fresh = GameState::new(players);
        if inner.deal.shuffle {
            fresh.deck.shuffle(&mut inner.rng);
        }
        for player in fresh.players.iter_mut() {
            player.hand.clear();
            player.reset_score();
            let dealt = fresh.deck.draw(MAX_HAND_SIZE);
            player.hand.add_cards(&dealt)?;
            debug!(player = %player.display_name, cards = dealt.len(), "Dealt initial hand");
        }
        fresh.current_turn = Some(first);
        fresh.status = GameStatus::InProgress;
        fresh.touch();

        info!(
            game_id = %fresh.game_id,
            deck_remaining = fresh.deck.remaining(),
            "Game started"
        );
        inner.state = Some(fresh.clone());
        Ok(fresh)
    }

    /// Snapshot of the current game. It may be superseded by the next call.
    pub fn state(&self) -> Option<GameState> {
        self.inner.lock().state.clone()
    }

    pub fn has_active_game(&self) -> bool {
        self.inner
            .lock()
            .state
            .as_ref()
            .is_some_and(GameState::is_in_progress)
    }

    /// Would `play_cards` accept this move right now? Never mutates.
    pub fn can_play_cards(&self, player: &PlayerId, cards: &[Card]) -> bool {
        let inner = self.inner.lock();
        let Some(state) = inner.state.as_ref().filter(|s| s.is_in_progress()) else {
            return false;
        };
        matches!(self.validator.validate(state, player, cards), Ok(v) if v.is_valid())
    }

    /// Would `pass_turn` accept a pass from `player` right now? Never mutates.
    pub fn can_pass(&self, player: &PlayerId) -> bool {
        let inner = self.inner.lock();
        inner
            .state
            .as_ref()
            .filter(|s| s.is_in_progress())
            .is_some_and(|s| pass_rejection(s, player).is_none())
    }

    /// Advisory: the opening play was a multi-card sequence and `player`
    /// still holds that rank.
    pub fn must_respond_to_sequence(&self, player: &PlayerId) -> bool {
        let inner = self.inner.lock();
        inner
            .state
            .as_ref()
            .is_some_and(|s| self.validator.must_respond_to_sequence(s, player))
    }

    /// Force the current game into a terminal status. No-op without a game.
    pub fn end_game(&self, cancelled: bool) {
        let mut inner = self.inner.lock();
        let Some(state) = inner.state.as_mut() else {
            debug!("end_game called with no game loaded");
            return;
        };
        state.status = if cancelled {
            GameStatus::Cancelled
        } else {
            GameStatus::Completed
        };
        state.touch();
        info!(game_id = %state.game_id, status = ?state.status, "Game ended");
    }

    /// Drop the current game, if any.
    pub fn reset_game(&self) {
        self.inner.lock().state = None;
        info!("Game engine reset");
    }

    /// Replace the current game with an external snapshot, as is.
    pub fn restore_state(&self, state: GameState) {
        info!(
            game_id = %state.game_id,
            status = ?state.status,
            "Game state restored"
        );
        self.inner.lock().state = Some(state);
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("GameEngine")
            .field("deal", &inner.deal)
            .field("game_id", &inner.state.as_ref().map(|s| s.game_id))
            .finish_non_exhaustive()
    }
}
