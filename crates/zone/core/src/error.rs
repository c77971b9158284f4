//! Common error infrastructure for zone-core.
//!
//! Domain-specific errors (`OracleError`, `LayoutError`, `DeltaError`) live
//! beside the code that raises them. This module provides the shared
//! classification so callers can decide between "degrade to an empty zone"
//! and "report an authoring bug".
//!
//! Most generation failures never surface as errors at all: a missing spawn
//! table, an unknown definition id or an exhausted candidate list degrade to
//! "nothing here" and are skipped silently.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Malformed persisted data that was (or can be) repaired in place.
    ///
    /// Examples: legacy delta records, unreadable save fragments
    Recoverable,

    /// Invalid input from content authors or callers.
    ///
    /// Examples: unsupported generator name, ragged layout rows, unknown instance id
    Validation,

    /// A required collaborator was not supplied at construction time.
    ///
    /// Examples: generation context built without an RNG factory
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all zone-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings suitable for logs and tests
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
