//! AI players for the terminal opponent and the simulator.
//!
//! - [`AiPlayer`]: one decision per call, given the full state
//! - [`RandomPlayer`]: uniform over legal actions, seedable
//! - [`GreedyPlayer`]: deterministic one-ply heuristic
//! - [`registered_ais`] / [`create_ai`]: lookup by name

mod greedy;
mod random;
mod trait_def;

pub use greedy::GreedyPlayer;
pub use random::RandomPlayer;
pub use trait_def::{legal_actions, AiAction, AiError, AiPlayer};

/// Factory definition for constructing AI implementations.
pub struct AiFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn AiPlayer>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: RandomPlayer::NAME,
        version: RandomPlayer::VERSION,
        make: make_random_player,
    },
    AiFactory {
        name: GreedyPlayer::NAME,
        version: GreedyPlayer::VERSION,
        make: make_greedy_player,
    },
];

pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

/// Build a registered AI by name. `None` for unknown names.
pub fn create_ai(kind: &str, seed: Option<u64>) -> Option<Box<dyn AiPlayer>> {
    registered_ais()
        .iter()
        .find(|factory| factory.name == kind)
        .map(|factory| (factory.make)(seed))
}

fn make_random_player(seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(RandomPlayer::new(seed))
}

fn make_greedy_player(_seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(GreedyPlayer::new())
}
