#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod command;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod errors;
pub mod events;
pub mod persistence;
pub mod session;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{Opponent, SevensConfig};
pub use domain::{Card, GameState, GameStatus, Player, PlayerId, PlayerType, Rank, Suit};
pub use engine::{DealOptions, GameEngine, PassOutcome, PlayOutcome, TrickResolution};
pub use error::AppError;
pub use errors::DomainError;
pub use events::{EventBus, GameEvent, GameEventKind, Subscription};
pub use persistence::{JsonSnapshotStore, PendingIo, SnapshotStore, SnapshotWorker, StorageError};
pub use session::{GameSession, LocalGameSession};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
