//! Error types raised by repository implementations.

use thiserror::Error;
use zone_core::DeltaError;

/// Errors surfaced by repository implementations and the save codec.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("save repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save root must be a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Delta(#[from] DeltaError),

    #[error("invalid save slot name '{0}'")]
    InvalidSlot(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
