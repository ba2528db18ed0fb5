//! Error types for the delta engine

use thiserror::Error;

/// Result type alias using DeltaEngineError
pub type Result<T> = std::result::Result<T, DeltaEngineError>;

/// Errors that can occur in the delta engine
///
/// Delta application itself reports problems as strings inside the
/// [`crate::ApplyReport`]; these variants cover the genuinely fallible
/// internals (undo snapshots).
#[derive(Debug, Error)]
pub enum DeltaEngineError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Compression error
    #[error("Compression error: {0}")]
    Compression(String),
}
