//! Displayed counters
//!
//! A pure projection of the step at the current index. Counts are never
//! recomputed here; the fetched data is the source of truth.

use serde::{Deserialize, Serialize};
use sortvis_core::Step;

/// Comparison and swap counters as displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub comparisons: u64,
    pub swaps: u64,
}

/// Projects the current step's counters for display
#[derive(Debug, Clone, Default)]
pub struct StatisticsView {
    current: Statistics,
}

impl StatisticsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the counters of `step` verbatim
    pub fn project(&mut self, step: &Step) {
        self.current = Statistics {
            comparisons: step.comparisons,
            swaps: step.swaps,
        };
    }

    /// Zero both counters (reset, new array)
    pub fn reset(&mut self) {
        self.current = Statistics::default();
    }

    pub fn current(&self) -> Statistics {
        self.current
    }
}
