/// Step snapshot and its wire record
use crate::error::{Result, SortvisError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One immutable snapshot of algorithm progress
///
/// `comparisons` and `swaps` are cumulative up to and including this step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Array state, one positive value per input element
    pub values: Vec<u32>,

    /// Cumulative comparisons
    pub comparisons: u64,

    /// Cumulative swaps and writes
    pub swaps: u64,

    /// Indices involved in the current operation
    pub highlighted: BTreeSet<usize>,

    /// Pivot position, only for pivot-based algorithms
    pub pivot_index: Option<usize>,

    /// Secondary buffer (merge buffer, counting array)
    pub auxiliary: Option<Vec<u32>>,
}

impl Step {
    /// Create a plain snapshot with no highlights, pivot or auxiliary buffer
    pub fn new(values: Vec<u32>, comparisons: u64, swaps: u64) -> Self {
        Self {
            values,
            comparisons,
            swaps,
            highlighted: BTreeSet::new(),
            pivot_index: None,
            auxiliary: None,
        }
    }

    /// Mark indices as part of the current operation
    #[must_use]
    pub fn with_highlights(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.highlighted.extend(indices);
        self
    }

    /// Mark the pivot
    #[must_use]
    pub fn with_pivot(mut self, index: usize) -> Self {
        self.pivot_index = Some(index);
        self
    }

    /// Attach a secondary buffer
    #[must_use]
    pub fn with_auxiliary(mut self, auxiliary: Vec<u32>) -> Self {
        self.auxiliary = Some(auxiliary);
        self
    }

    /// Number of elements in the snapshot
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the snapshot has no elements
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest value, used to scale bars
    pub fn max_value(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// Check if `index` is highlighted
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }
}

/// Step as it travels over the wire
///
/// Field names follow the step service's JSON contract. Optional fields may
/// be absent or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub array: Vec<u32>,
    pub comparisons: u64,
    pub swaps: u64,
    #[serde(default)]
    pub current_indices: Vec<usize>,
    #[serde(default)]
    pub auxiliary: Option<Vec<u32>>,
    #[serde(default)]
    pub pivot_index: Option<usize>,
}

impl TryFrom<StepRecord> for Step {
    type Error = SortvisError;

    fn try_from(record: StepRecord) -> Result<Self> {
        if record.array.is_empty() {
            return Err(SortvisError::malformed("step array is empty"));
        }

        if let Some(position) = record.array.iter().position(|&v| v == 0) {
            return Err(SortvisError::malformed(format!(
                "step value at index {} is not positive",
                position
            )));
        }

        let len = record.array.len();
        if let Some(&index) = record.current_indices.iter().find(|&&i| i >= len) {
            return Err(SortvisError::malformed(format!(
                "highlighted index {} out of range for {} values",
                index, len
            )));
        }

        if let Some(pivot) = record.pivot_index {
            if pivot >= len {
                return Err(SortvisError::malformed(format!(
                    "pivot index {} out of range for {} values",
                    pivot, len
                )));
            }
        }

        Ok(Self {
            values: record.array,
            comparisons: record.comparisons,
            swaps: record.swaps,
            highlighted: record.current_indices.into_iter().collect(),
            pivot_index: record.pivot_index,
            auxiliary: record.auxiliary,
        })
    }
}

impl From<Step> for StepRecord {
    fn from(step: Step) -> Self {
        Self {
            array: step.values,
            comparisons: step.comparisons,
            swaps: step.swaps,
            current_indices: step.highlighted.into_iter().collect(),
            auxiliary: step.auxiliary,
            pivot_index: step.pivot_index,
        }
    }
}

/// Check `step` (at position `index`) against the run it belongs to
///
/// The step must hold exactly `expected_len` values and its counters must not
/// fall below those of `previous`.
pub fn check_step(
    previous: Option<&Step>,
    step: &Step,
    expected_len: usize,
    index: usize,
) -> Result<()> {
    if step.len() != expected_len {
        return Err(SortvisError::invariant(
            index,
            format!("expected {} values, found {}", expected_len, step.len()),
        ));
    }

    if let Some(previous) = previous {
        if step.comparisons < previous.comparisons {
            return Err(SortvisError::invariant(
                index,
                format!(
                    "comparisons regressed from {} to {}",
                    previous.comparisons, step.comparisons
                ),
            ));
        }
        if step.swaps < previous.swaps {
            return Err(SortvisError::invariant(
                index,
                format!("swaps regressed from {} to {}", previous.swaps, step.swaps),
            ));
        }
    }

    Ok(())
}
