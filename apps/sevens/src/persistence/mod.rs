//! Saving and loading game snapshots.
//!
//! The engine never touches storage; callers take a snapshot with
//! `GameEngine::state()` and hand loaded ones back via `restore_state`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::GameState;

mod worker;

pub use worker::{PendingIo, SnapshotWorker};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("snapshot not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage worker stopped before finishing the request")]
    WorkerStopped,
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            return StorageError::NotFound(path.to_path_buf());
        }
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub trait SnapshotStore: Send + Sync {
    fn save(&self, state: &GameState, path: &Path) -> Result<(), StorageError>;

    fn load(&self, path: &Path) -> Result<GameState, StorageError>;

    /// File extension written by this store, without the dot.
    fn format(&self) -> &'static str;

    /// `name` inside `dir`, with this store's extension unless it has one.
    fn path_for(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension(self.format())
        }
    }
}

/// Pretty-printed JSON on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshotStore;

impl JsonSnapshotStore {
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn save(&self, state: &GameState, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(path, json).map_err(|e| StorageError::io(path, e))?;
        info!(game_id = %state.game_id, path = %path.display(), "Game saved");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<GameState, StorageError> {
        let raw = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        let state: GameState = serde_json::from_str(&raw)?;
        debug!(game_id = %state.game_id, path = %path.display(), "Game loaded");
        Ok(state)
    }

    fn format(&self) -> &'static str {
        "json"
    }
}
