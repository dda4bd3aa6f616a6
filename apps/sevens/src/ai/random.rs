//! Random AI player: uniform choice among legal actions.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{legal_actions, AiAction, AiError, AiPlayer};
use crate::domain::{GameState, PlayerId};

/// AI that picks uniformly from [`legal_actions`].
///
/// Seeded instances replay the same choices for the same states, which is
/// what the simulator and tests rely on.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "random";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_action(&self, state: &GameState, me: &PlayerId) -> Result<AiAction, AiError> {
        let actions = legal_actions(state, me)?;
        if actions.is_empty() {
            return Err(AiError::InvalidMove("No legal actions available".into()));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        actions
            .choose(&mut *rng)
            .cloned()
            .ok_or_else(|| AiError::Internal("Failed to choose random action".into()))
    }
}
