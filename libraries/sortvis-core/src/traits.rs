/// Core traits for Sortvis
use crate::error::FetchError;
use crate::types::{SortRequest, StepSequence};
use async_trait::async_trait;

/// Source of step sequences
///
/// Implementers turn a validated sort request into the complete trace of
/// snapshots for that run. The HTTP client in `sortvis-client` talks to the
/// step service; tests provide in-memory fetchers.
///
/// Implementations must be deterministic for identical requests and must
/// never hand back a partial sequence: either every step or a `FetchError`.
#[async_trait]
pub trait StepFetcher: Send + Sync {
    /// Fetch the step sequence for `request`
    ///
    /// # Errors
    /// Returns `FetchError` on transport failure, non-success status or a
    /// payload that does not match the step schema.
    async fn fetch(&self, request: &SortRequest) -> Result<StepSequence, FetchError>;
}
