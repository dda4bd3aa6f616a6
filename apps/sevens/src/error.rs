use thiserror::Error;

use crate::ai::AiError;
use crate::errors::domain::DomainError;
use crate::persistence::StorageError;

/// Error type for everything outside the pure engine: sessions, storage,
/// configuration, AI, and the binaries.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("AI error: {0}")]
    Ai(#[from] AiError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Short stable code for logs and the terminal UI.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::InvalidArgument(_)) => "INVALID_ARGUMENT",
            AppError::Domain(DomainError::InvalidMove { .. }) => "INVALID_MOVE",
            AppError::Domain(DomainError::IllegalState(_)) => "ILLEGAL_STATE",
            AppError::Storage(StorageError::NotFound(_)) => "SNAPSHOT_NOT_FOUND",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Ai(_) => "AI_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }

    /// Rule violations are expected in play; everything else is a fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Domain(DomainError::InvalidMove { .. })
                | AppError::Storage(StorageError::NotFound(_))
        )
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
