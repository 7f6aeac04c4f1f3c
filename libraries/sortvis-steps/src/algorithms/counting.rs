//! Counting sort with the count array shown as the auxiliary array

use crate::recorder::StepRecorder;
use sortvis_core::{Result, SortvisError};

/// Widest value range (max - min + 1) counting sort accepts
pub(crate) const MAX_COUNTING_RANGE: usize = 1 << 16;

pub(super) fn sort(rec: &mut StepRecorder) -> Result<()> {
    let input = rec.values().to_vec();
    let n = input.len();

    let min = input.iter().copied().min().unwrap_or(0);
    let max = input.iter().copied().max().unwrap_or(0);
    let range = (max - min) as usize + 1;

    if range > MAX_COUNTING_RANGE {
        return Err(SortvisError::invalid_input(format!(
            "value range {} exceeds counting sort limit {}",
            range, MAX_COUNTING_RANGE
        )));
    }

    let slot = |value: u32| (value - min) as usize;
    let mut count = vec![0u32; range];

    rec.record(|s| s.with_auxiliary(count.clone()));

    // Occurrences (each tally counts as a comparison)
    for (i, &value) in input.iter().enumerate() {
        count[slot(value)] += 1;
        rec.compare();
        rec.record(|s| s.with_highlights([i]).with_auxiliary(count.clone()));
    }

    // Prefix sums: count[k] becomes the end position of key k
    for k in 1..range {
        count[k] += count[k - 1];
        rec.record(|s| s.with_auxiliary(count.clone()));
    }

    // Place from the back so equal keys keep their order. Writing straight
    // into the working array shows placed outputs over the untouched input.
    for i in (0..n).rev() {
        let value = input[i];
        count[slot(value)] -= 1;
        let position = count[slot(value)] as usize;

        rec.write(position, value);
        rec.record(|s| s.with_highlights([position]).with_auxiliary(count.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::MAX_COUNTING_RANGE;
    use crate::recorder::StepRecorder;

    #[test]
    fn count_array_spans_value_range() {
        let mut rec = StepRecorder::new(&[5, 3, 5, 4]);
        super::sort(&mut rec).unwrap();
        let sequence = rec.finish().unwrap();

        assert_eq!(sequence.last().values, vec![3, 4, 5, 5]);
        assert_eq!(sequence[1].auxiliary, Some(vec![0, 0, 0]));
        // No comparisons between elements: one tally per element
        assert_eq!(sequence.last().comparisons, 4);
        assert_eq!(sequence.last().swaps, 4);
    }

    #[test]
    fn placement_steps_keep_values_positive() {
        let mut rec = StepRecorder::new(&[9, 1, 4, 1]);
        super::sort(&mut rec).unwrap();
        let sequence = rec.finish().unwrap();

        assert!(sequence.iter().all(|s| s.values.iter().all(|&v| v > 0)));
    }

    #[test]
    fn huge_range_rejected() {
        let mut rec = StepRecorder::new(&[1, MAX_COUNTING_RANGE as u32 + 1]);
        assert!(super::sort(&mut rec).is_err());
    }
}
