//! Error types for the command interpreter.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors a command can fail with.
///
/// Every variant is rendered as an error line at the interpreter boundary;
/// none of them aborts the session or leaves partial state behind.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The command needs an active case and none is loaded.
    #[error("No active case. Type `start-case` to begin an investigation.")]
    NoActiveCase,

    /// A suspect name fragment matched nobody.
    #[error("Suspect not found: {0}")]
    NotFound(String),

    /// A suspect name fragment matched more than one suspect.
    #[error("'{query}' matches several suspects: {candidates}. Be more specific.")]
    Ambiguous {
        /// The fragment as entered.
        query: String,
        /// Names of every matching suspect, comma separated.
        candidates: String,
    },

    /// A required argument is missing.
    #[error("usage: {0}")]
    UsageError(String),

    /// The command word is not recognised.
    #[error("Unknown command: {0}. Type `help` for available commands.")]
    UnknownCommand(String),

    /// Case generation could not be configured.
    #[error(transparent)]
    Core(#[from] sleuth_core::CoreError),
}
