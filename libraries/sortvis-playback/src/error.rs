//! Error types for playback

use sortvis_core::{FetchError, SortvisError};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Rejected before any fetch was issued
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The step sequence could not be fetched
    #[error("Fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    /// A fetched step breaks the run invariants
    #[error("Invariant violated at step {index}: {reason}")]
    InvariantViolation { index: usize, reason: String },

    /// Command not allowed in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The engine task is gone
    #[error("Playback engine stopped")]
    EngineStopped,
}

impl From<SortvisError> for PlaybackError {
    fn from(err: SortvisError) -> Self {
        match err {
            SortvisError::InvalidInput(msg) => PlaybackError::InvalidInput(msg),
            SortvisError::Malformed(msg) => {
                PlaybackError::FetchFailed(FetchError::Malformed(msg))
            }
            SortvisError::InvariantViolation { index, reason } => {
                PlaybackError::InvariantViolation { index, reason }
            }
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
