//! Quick sort with Lomuto partitioning around the last element

use crate::recorder::StepRecorder;

pub(super) fn sort(rec: &mut StepRecorder) {
    let n = rec.len();
    sort_range(rec, 0, n - 1);
}

/// Sort the inclusive range `low..=high`
fn sort_range(rec: &mut StepRecorder, low: usize, high: usize) {
    if low >= high {
        return;
    }

    let pivot = partition(rec, low, high);

    if pivot > low {
        sort_range(rec, low, pivot - 1);
    }
    sort_range(rec, pivot + 1, high);
}

/// Partition `low..=high` around `values[high]`, returning the pivot's final position
fn partition(rec: &mut StepRecorder, low: usize, high: usize) -> usize {
    let pivot = rec.value(high);
    rec.record(|s| s.with_highlights([low, high]).with_pivot(high));

    // Next slot for an element <= pivot
    let mut store = low;

    for j in low..high {
        rec.compare();
        rec.record(|s| s.with_highlights([j, high]).with_pivot(high));

        if rec.value(j) <= pivot {
            rec.swap(store, j);
            rec.record(|s| s.with_highlights([store, j]).with_pivot(high));
            store += 1;
        }
    }

    rec.swap(store, high);
    rec.record(|s| s.with_highlights([store, high]).with_pivot(store));

    store
}

#[cfg(test)]
mod tests {
    use crate::recorder::StepRecorder;

    #[test]
    fn partition_steps_mark_pivot() {
        let mut rec = StepRecorder::new(&[3, 1, 2]);
        super::sort(&mut rec);
        let sequence = rec.finish().unwrap();

        assert_eq!(sequence.last().values, vec![1, 2, 3]);
        // Everything between the first and last snapshot belongs to a partition
        let inner = &sequence.steps()[1..sequence.len() - 1];
        assert!(inner.iter().all(|s| s.pivot_index.is_some()));
    }

    #[test]
    fn single_element_has_no_partition() {
        let mut rec = StepRecorder::new(&[7]);
        super::sort(&mut rec);
        let sequence = rec.finish().unwrap();
        assert_eq!(sequence.len(), 2);
    }

    #[test]
    fn pivot_lands_at_front() {
        // pivot 1 is the minimum, ends at index 0 so the left recursion is skipped
        let mut rec = StepRecorder::new(&[2, 3, 1]);
        super::sort(&mut rec);
        let sequence = rec.finish().unwrap();
        assert_eq!(sequence.last().values, vec![1, 2, 3]);
    }
}
