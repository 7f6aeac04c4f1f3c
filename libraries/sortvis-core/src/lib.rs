//! Sortvis Core
//!
//! Platform-agnostic data model, error types and collaborator traits shared by
//! every Sortvis crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Step`, `StepSequence`, `AlgorithmId`, `SortRequest`
//! - **Wire Types**: `StepRecord`, the JSON shape served by the step service
//! - **Core Traits**: `StepFetcher`, the seam between playback and the step service
//! - **Error Handling**: `SortvisError` for validation, `FetchError` for fetch failures
//!
//! # Example
//!
//! ```rust
//! use sortvis_core::{AlgorithmId, SortRequest, Step, StepSequence};
//!
//! let request = SortRequest::new(vec![2, 1], AlgorithmId::Insertion).unwrap();
//! assert_eq!(request.len(), 2);
//!
//! let sequence = StepSequence::new(vec![
//!     Step::new(vec![2, 1], 0, 0),
//!     Step::new(vec![1, 2], 1, 1).with_highlights([0, 1]),
//! ])
//! .unwrap();
//!
//! assert_eq!(sequence.len(), 2);
//! assert!(sequence.check_invariants(2).is_ok());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{FetchError, Result, SortvisError};
pub use traits::StepFetcher;
pub use types::{
    check_step, AlgorithmDescriptor, AlgorithmId, SortRequest, Step, StepRecord, StepSequence,
};
