/// Ordered trace of steps for one sort run
use super::step::{check_step, Step, StepRecord};
use crate::error::{Result, SortvisError};
use std::ops::Index;

/// Complete, immutable trace of one sort run
///
/// Always holds at least one step. Created once per request and shared
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    /// Wrap a list of steps
    ///
    /// # Errors
    /// Returns `Malformed` if `steps` is empty.
    pub fn new(steps: Vec<Step>) -> Result<Self> {
        if steps.is_empty() {
            return Err(SortvisError::malformed("step sequence is empty"));
        }
        Ok(Self { steps })
    }

    /// Validate and convert wire records
    ///
    /// # Errors
    /// Returns `Malformed` if the list is empty or any record fails step validation.
    pub fn from_records(records: Vec<StepRecord>) -> Result<Self> {
        let steps = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Step::try_from(record).map_err(|e| match e {
                    SortvisError::Malformed(msg) => {
                        SortvisError::malformed(format!("step {}: {}", index, msg))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(steps)
    }

    /// Convert into wire records
    pub fn into_records(self) -> Vec<StepRecord> {
        self.steps.into_iter().map(StepRecord::from).collect()
    }

    /// Number of steps (always at least 1)
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Get the step at `index`
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// First step (the untouched input for generated traces)
    pub fn first(&self) -> &Step {
        &self.steps[0]
    }

    /// Last step (the sorted array for generated traces)
    pub fn last(&self) -> &Step {
        &self.steps[self.steps.len() - 1]
    }

    /// Iterate over steps in order
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Borrow all steps
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Check every step against the run invariants
    ///
    /// Each step must hold `expected_len` values and counters must be
    /// non-decreasing. Returns the first violation found.
    pub fn check_invariants(&self, expected_len: usize) -> Result<()> {
        let mut previous = None;
        for (index, step) in self.steps.iter().enumerate() {
            check_step(previous, step, expected_len, index)?;
            previous = Some(step);
        }
        Ok(())
    }
}

impl Index<usize> for StepSequence {
    type Output = Step;

    fn index(&self, index: usize) -> &Self::Output {
        &self.steps[index]
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_rejected() {
        assert!(StepSequence::new(vec![]).is_err());
        assert!(StepSequence::from_records(vec![]).is_err());
    }

    #[test]
    fn malformed_record_reports_position() {
        let records = vec![
            StepRecord::from(Step::new(vec![2, 1], 0, 0)),
            StepRecord::from(Step::new(vec![2, 0], 1, 0)),
        ];

        match StepSequence::from_records(records).unwrap_err() {
            SortvisError::Malformed(msg) => assert!(msg.starts_with("step 1:")),
            other => panic!("Expected Malformed, got: {:?}", other),
        }
    }

    #[test]
    fn first_and_last() {
        let sequence = StepSequence::new(vec![
            Step::new(vec![2, 1], 0, 0),
            Step::new(vec![2, 1], 1, 0).with_highlights([0, 1]),
            Step::new(vec![1, 2], 1, 1),
        ])
        .unwrap();

        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.first().values, vec![2, 1]);
        assert_eq!(sequence.last().values, vec![1, 2]);
        assert_eq!(sequence[1].comparisons, 1);
    }

    #[test]
    fn invariants_report_first_violation() {
        let sequence = StepSequence::new(vec![
            Step::new(vec![2, 1], 0, 0),
            Step::new(vec![2, 1], 2, 1),
            Step::new(vec![1, 2], 1, 1),
            Step::new(vec![1], 3, 1),
        ])
        .unwrap();

        match sequence.check_invariants(2).unwrap_err() {
            SortvisError::InvariantViolation { index, .. } => assert_eq!(index, 2),
            other => panic!("Expected InvariantViolation, got: {:?}", other),
        }
    }

    #[test]
    fn records_round_trip_through_json() {
        let sequence = StepSequence::new(vec![
            Step::new(vec![3, 1, 2], 0, 0),
            Step::new(vec![1, 3, 2], 1, 1)
                .with_highlights([0, 1])
                .with_pivot(2),
        ])
        .unwrap();

        let json = serde_json::to_string(&sequence.clone().into_records()).unwrap();
        let records: Vec<StepRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(StepSequence::from_records(records).unwrap(), sequence);
    }
}
