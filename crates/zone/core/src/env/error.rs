//! Generation context errors.
//!
//! Raised when a [`GenerationContext`](super::GenerationContext) is built
//! without one of its required collaborators.

use crate::error::{CoreError, ErrorSeverity};

/// A required collaborator was not supplied.
///
/// These are construction-time failures. Once a context exists every
/// collaborator is present, so generation never has to branch on "maybe
/// there is an RNG".
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// DefinitionsOracle was not supplied.
    #[error("DefinitionsOracle not available")]
    DefinitionsNotAvailable,

    /// Spawn tables were not supplied.
    #[error("spawn tables not available")]
    SpawnTablesNotAvailable,

    /// RngFactory was not supplied.
    #[error("RngFactory not available")]
    RngNotAvailable,
}

impl CoreError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            DefinitionsNotAvailable => "ORACLE_DEFINITIONS_NOT_AVAILABLE",
            SpawnTablesNotAvailable => "ORACLE_SPAWN_TABLES_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
