/// Core error types for Sortvis
use thiserror::Error;

/// Result type alias using `SortvisError`
pub type Result<T> = std::result::Result<T, SortvisError>;

/// Core error type for Sortvis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortvisError {
    /// Input rejected before any work was done (empty array, zero value, unknown algorithm)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Payload does not match the step schema
    #[error("Malformed step data: {0}")]
    Malformed(String),

    /// A step breaks the sequence invariants
    #[error("Invariant violated at step {index}: {reason}")]
    InvariantViolation { index: usize, reason: String },
}

impl SortvisError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a malformed payload error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Create an invariant violation error
    pub fn invariant(index: usize, reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            index,
            reason: reason.into(),
        }
    }
}

/// Why a step sequence could not be fetched
///
/// A fetch either yields a complete sequence or exactly one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The service could not be reached or the connection broke
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body is not a valid step sequence
    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl From<SortvisError> for FetchError {
    fn from(err: SortvisError) -> Self {
        FetchError::Malformed(err.to_string())
    }
}
