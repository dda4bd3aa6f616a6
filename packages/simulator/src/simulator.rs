//! Runs AI-vs-AI games through the real engine.
//!
//! Every action an AI picks goes through `GameEngine::play_cards` or
//! `pass_turn`, so an illegal choice fails the game instead of being skipped.

use std::fmt;
use std::time::Instant;

use serde::Serialize;
use sevens::ai::{AiAction, AiError, AiPlayer};
use sevens::{DealOptions, DomainError, GameEngine, GameStatus, Player, PlayerType};
use tracing::{debug, info};

/// Hard stop for a game that never reaches a terminal status.
pub const MAX_ACTIONS: usize = 1_000;

#[derive(Debug)]
pub enum SimulatorError {
    Domain(DomainError),
    Ai(AiError),
    Stalled { actions: usize },
}

impl fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorError::Domain(e) => write!(f, "engine error: {e}"),
            SimulatorError::Ai(e) => write!(f, "{e}"),
            SimulatorError::Stalled { actions } => {
                write!(f, "game did not finish after {actions} actions")
            }
        }
    }
}

impl std::error::Error for SimulatorError {}

impl From<DomainError> for SimulatorError {
    fn from(e: DomainError) -> Self {
        SimulatorError::Domain(e)
    }
}

impl From<AiError> for SimulatorError {
    fn from(e: AiError) -> Self {
        SimulatorError::Ai(e)
    }
}

/// One finished game, written as a JSON line.
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub game: u32,
    pub seed: Option<u64>,
    pub ais: [String; 2],
    pub scores: [u32; 2],
    /// Seat index of the victor, `None` when the deck ran out undecided.
    pub winner: Option<usize>,
    pub tricks: usize,
    pub plays: usize,
    pub passes: usize,
    pub duration_ms: f64,
}

pub struct Simulator {
    engine: GameEngine,
    game: u32,
    seed: Option<u64>,
}

impl Simulator {
    pub fn new(game: u32, seed: Option<u64>) -> Self {
        let engine = GameEngine::with_options(DealOptions {
            seed,
            shuffle: true,
        });
        Self { engine, game, seed }
    }

    pub fn simulate_game(
        &self,
        ais: &[Box<dyn AiPlayer>; 2],
        names: [String; 2],
    ) -> Result<GameResult, SimulatorError> {
        let start = Instant::now();
        let players = vec![
            Player::new(format!("{} (seat 0)", names[0]), PlayerType::Ai),
            Player::new(format!("{} (seat 1)", names[1]), PlayerType::Ai),
        ];
        let initial = self.engine.start_new_game(players)?;
        let seats = [initial.players[0].id.clone(), initial.players[1].id.clone()];

        let (mut plays, mut passes, mut tricks) = (0, 0, 0);
        for _ in 0..MAX_ACTIONS {
            let Some(state) = self.engine.state() else {
                break;
            };
            if state.status != GameStatus::InProgress {
                let winner = state
                    .winner()
                    .and_then(|p| seats.iter().position(|id| *id == p.id));
                info!(game = self.game, scores = ?state.scores(), ?winner, "Game finished");
                return Ok(GameResult {
                    game: self.game,
                    seed: self.seed,
                    ais: names,
                    scores: state.scores(),
                    winner,
                    tricks,
                    plays,
                    passes,
                    duration_ms: start.elapsed().as_secs_f64() * 1000.0,
                });
            }

            let Some(turn) = state.current_turn.clone() else {
                break;
            };
            let seat = seats.iter().position(|id| *id == turn).ok_or_else(|| {
                DomainError::illegal_state(format!("turn holder {turn} is not seated"))
            })?;

            match ais[seat].choose_action(&state, &turn)? {
                AiAction::Play(cards) => {
                    debug!(game = self.game, seat, cards = ?cards, "AI plays");
                    plays += 1;
                    if self.engine.play_cards(&turn, &cards)?.resolution.is_some() {
                        tricks += 1;
                    }
                }
                AiAction::Pass => {
                    debug!(game = self.game, seat, "AI passes");
                    passes += 1;
                    self.engine.pass_turn(&turn)?;
                    tricks += 1;
                }
            }
        }

        Err(SimulatorError::Stalled {
            actions: MAX_ACTIONS,
        })
    }
}
