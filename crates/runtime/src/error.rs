//! Errors surfaced by session operations.
use thiserror::Error;
use zone_core::{CoreError, ErrorSeverity, Interaction, LayoutError, OracleError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no world slot for zone '{0}'")]
    UnknownZone(String),

    #[error("no zone is active")]
    NoActiveZone,

    #[error("zone '{zone_id}' has no instance '{instance_id}' that can be {}", .interaction.state_key())]
    UnknownInstance {
        zone_id: String,
        instance_id: String,
        interaction: Interaction,
    },

    #[error("tile ({x}, {y}) in zone '{zone_id}' is not explorable")]
    TileNotExplorable { zone_id: String, x: i32, y: i32 },

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CoreError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Layout(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
            Self::Repository(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownZone(_) => "RUNTIME_UNKNOWN_ZONE",
            Self::NoActiveZone => "RUNTIME_NO_ACTIVE_ZONE",
            Self::UnknownInstance { .. } => "RUNTIME_UNKNOWN_INSTANCE",
            Self::TileNotExplorable { .. } => "RUNTIME_TILE_NOT_EXPLORABLE",
            Self::Layout(err) => err.error_code(),
            Self::Oracle(err) => err.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
        }
    }
}
