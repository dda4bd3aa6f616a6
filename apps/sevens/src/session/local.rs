use std::sync::Arc;

use tracing::warn;

use super::GameSession;
use crate::domain::{Card, GameState, Player, PlayerId};
use crate::engine::{GameEngine, PassOutcome, PlayOutcome, TrickResolution};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::events::{EventBus, GameEvent};

/// In-process session: forwards to the engine, then publishes what happened.
///
/// Events are published only after the engine call returns, so the engine
/// lock is never held while subscribers are notified.
#[derive(Debug, Clone)]
pub struct LocalGameSession {
    engine: Arc<GameEngine>,
    bus: Arc<EventBus>,
}

impl LocalGameSession {
    pub fn new(engine: Arc<GameEngine>, bus: Arc<EventBus>) -> Self {
        Self { engine, bus }
    }

    pub fn engine(&self) -> &Arc<GameEngine> {
        &self.engine
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    fn emit_state(&self, description: impl Into<String>) {
        if let Some(state) = self.engine.state() {
            self.bus.publish(GameEvent::state_changed(state, description));
        }
    }

    fn publish_resolution(&self, state: &GameState, resolution: &TrickResolution) {
        let winner_name = state
            .player(&resolution.winner)
            .map(|p| p.display_name.clone())
            .unwrap_or_else(|| resolution.winner.to_string());
        self.bus.publish(GameEvent::trick_won(
            &resolution.winner,
            winner_name,
            resolution.points,
            resolution.cards.clone(),
        ));
    }
}

fn log_rejection(action: &'static str, player: &PlayerId, err: &DomainError) {
    if let Some(attempt) = err.move_description() {
        warn!(action, player = %player, reason = err.reason(), %attempt, "Move rejected");
    }
}

impl GameSession for LocalGameSession {
    fn state(&self) -> Option<GameState> {
        self.engine.state()
    }

    fn start(&self, players: Vec<Player>) -> Result<GameState, AppError> {
        let state = self.engine.start_new_game(players)?;
        self.bus
            .publish(GameEvent::state_changed(state.clone(), "Game started"));
        Ok(state)
    }

    fn play_cards(&self, player: &PlayerId, cards: &[Card]) -> Result<PlayOutcome, AppError> {
        let outcome = self.engine.play_cards(player, cards).map_err(|err| {
            log_rejection("play_cards", player, &err);
            err
        })?;

        self.bus.publish(GameEvent::cards_played(player, cards));
        if let Some(resolution) = &outcome.resolution {
            self.publish_resolution(&outcome.state, resolution);
        }
        self.bus.publish(GameEvent::state_changed(
            outcome.state.clone(),
            format!("{player} played {}", crate::domain::format_cards(cards)),
        ));
        Ok(outcome)
    }

    fn pass_turn(&self, player: &PlayerId) -> Result<PassOutcome, AppError> {
        let outcome = self.engine.pass_turn(player).map_err(|err| {
            log_rejection("pass_turn", player, &err);
            err
        })?;

        self.publish_resolution(&outcome.state, &outcome.resolution);
        self.bus.publish(GameEvent::state_changed(
            outcome.state.clone(),
            format!("{player} passed"),
        ));
        Ok(outcome)
    }

    fn restore_state(&self, state: GameState) {
        self.engine.restore_state(state);
        self.emit_state("Game restored");
    }

    fn reset_and_restart(&self) -> Result<Option<GameState>, AppError> {
        let Some(previous) = self.engine.state() else {
            return Ok(None);
        };
        let players: Vec<Player> = previous
            .players
            .iter()
            .map(|p| Player::with_id(p.id.clone(), p.display_name.clone(), p.player_type))
            .collect();

        self.engine.reset_game();
        let state = self.engine.start_new_game(players)?;
        self.bus
            .publish(GameEvent::state_changed(state.clone(), "Game restarted"));
        Ok(Some(state))
    }

    fn end_game(&self, cancelled: bool) {
        self.engine.end_game(cancelled);
        self.emit_state(if cancelled {
            "Game cancelled"
        } else {
            "Game ended"
        });
    }
}
