//! Sortvis - Step Generation
//!
//! Runs the supported sorting algorithms on an input array and records a
//! [`Step`](sortvis_core::Step) at every comparison, swap/write and structural
//! event. The resulting [`StepSequence`] is what the step service returns and
//! what the playback engine replays.
//!
//! Every trace:
//! - starts with the untouched input (counters at zero, nothing highlighted)
//! - ends with the sorted array (nothing highlighted)
//! - keeps the array length fixed and the counters non-decreasing
//!
//! Generation is deterministic: the same input and algorithm always produce
//! the same trace.
//!
//! # Example
//!
//! ```rust
//! use sortvis_core::AlgorithmId;
//! use sortvis_steps::generate;
//!
//! let sequence = generate(&[5, 3, 4, 1, 2], AlgorithmId::Bubble).unwrap();
//! assert_eq!(sequence.last().values, vec![1, 2, 3, 4, 5]);
//! ```

mod algorithms;
mod random;
mod recorder;

pub use random::{random_array, RandomArraySpec};

use sortvis_core::{AlgorithmId, Result, SortRequest, StepSequence};
use tracing::debug;

/// Record the step trace of `algorithm` sorting `values`
///
/// # Errors
/// Returns `InvalidInput` for an empty array, a zero value, or (counting sort
/// only) a value range too wide to count.
pub fn generate(values: &[u32], algorithm: AlgorithmId) -> Result<StepSequence> {
    let request = SortRequest::new(values.to_vec(), algorithm)?;
    generate_for(&request)
}

/// Record the step trace for a validated request
pub fn generate_for(request: &SortRequest) -> Result<StepSequence> {
    let sequence = algorithms::run(&request.array, request.algorithm)?;

    debug!(
        algorithm = %request.algorithm,
        input_len = request.len(),
        steps = sequence.len(),
        "Generated step trace"
    );

    Ok(sequence)
}
