//! Error types for the case model.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while configuring case generation.
///
/// These are programmer errors: a generator is only ever built from
/// catalogs and settings chosen by the embedding code, never from player
/// input.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A catalog or setting cannot support generation.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
}
