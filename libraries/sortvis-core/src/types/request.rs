/// Sort request sent to the step service
use super::algorithm::AlgorithmId;
use crate::error::{Result, SortvisError};
use serde::{Deserialize, Serialize};

/// A validated request for one sort run
///
/// Serializes to the service's `{ "array": [...], "algorithm": "..." }` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRequest {
    pub array: Vec<u32>,
    pub algorithm: AlgorithmId,
}

impl SortRequest {
    /// Create a request, rejecting empty arrays and non-positive values
    pub fn new(array: Vec<u32>, algorithm: AlgorithmId) -> Result<Self> {
        if array.is_empty() {
            return Err(SortvisError::invalid_input("array cannot be empty"));
        }
        if let Some(position) = array.iter().position(|&v| v == 0) {
            return Err(SortvisError::invalid_input(format!(
                "value at index {} must be a positive integer",
                position
            )));
        }
        Ok(Self { array, algorithm })
    }

    /// Create a request from untyped input (values and algorithm name)
    pub fn parse(values: &[i64], algorithm: &str) -> Result<Self> {
        let algorithm: AlgorithmId = algorithm.parse()?;
        let array = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                u32::try_from(value)
                    .ok()
                    .filter(|&v| v > 0)
                    .ok_or_else(|| {
                        SortvisError::invalid_input(format!(
                            "value {} at index {} must be a positive integer",
                            value, index
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(array, algorithm)
    }

    /// Number of input elements
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.array.len()
    }
}
