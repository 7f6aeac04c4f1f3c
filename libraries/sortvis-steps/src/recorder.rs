//! Step recording while an algorithm runs

use sortvis_core::{Result, Step, StepSequence};

/// Working array plus cumulative counters and the steps recorded so far
///
/// Algorithms mutate the array only through `swap`, `write` and `set` so the
/// counters stay in sync with what each snapshot shows.
pub(crate) struct StepRecorder {
    values: Vec<u32>,
    comparisons: u64,
    swaps: u64,
    steps: Vec<Step>,
}

impl StepRecorder {
    /// Start a trace, recording the untouched input
    pub fn new(values: &[u32]) -> Self {
        let mut recorder = Self {
            values: values.to_vec(),
            comparisons: 0,
            swaps: 0,
            steps: Vec::new(),
        };
        recorder.record_plain();
        recorder
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn value(&self, index: usize) -> u32 {
        self.values[index]
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Count one comparison
    pub fn compare(&mut self) {
        self.comparisons += 1;
    }

    /// Swap two elements, counted as one swap
    pub fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
        self.swaps += 1;
    }

    /// Overwrite one element, counted as one swap
    pub fn write(&mut self, index: usize, value: u32) {
        self.values[index] = value;
        self.swaps += 1;
    }

    /// Overwrite one element without counting it
    pub fn set(&mut self, index: usize, value: u32) {
        self.values[index] = value;
    }

    /// Snapshot of the current state with nothing marked
    fn snapshot(&self) -> Step {
        Step::new(self.values.clone(), self.comparisons, self.swaps)
    }

    /// Record a snapshot decorated by `decorate`
    pub fn record(&mut self, decorate: impl FnOnce(Step) -> Step) {
        let step = decorate(self.snapshot());
        self.steps.push(step);
    }

    /// Record a snapshot with nothing marked
    pub fn record_plain(&mut self) {
        let step = self.snapshot();
        self.steps.push(step);
    }

    /// Record the final sorted state and seal the trace
    pub fn finish(mut self) -> Result<StepSequence> {
        self.record_plain();
        StepSequence::new(self.steps)
    }
}
