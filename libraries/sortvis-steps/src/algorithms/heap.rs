//! Heap sort on an in-place max heap

use crate::recorder::StepRecorder;

pub(super) fn sort(rec: &mut StepRecorder) {
    let n = rec.len();

    for i in (0..n / 2).rev() {
        sift_down(rec, n, i);
    }

    for end in (1..n).rev() {
        rec.swap(0, end);
        rec.record(|s| s.with_highlights([0, end]));
        sift_down(rec, end, 0);
    }
}

/// Restore the heap property for the subtree at `root` within the first `size` elements
fn sift_down(rec: &mut StepRecorder, size: usize, root: usize) {
    let mut root = root;

    loop {
        let mut largest = root;
        let left = 2 * root + 1;
        let right = 2 * root + 2;

        if left < size {
            rec.compare();
            rec.record(|s| s.with_highlights([root, left]));
            if rec.value(left) > rec.value(largest) {
                largest = left;
            }
        }

        if right < size {
            rec.compare();
            rec.record(|s| s.with_highlights([largest, right]));
            if rec.value(right) > rec.value(largest) {
                largest = right;
            }
        }

        if largest == root {
            return;
        }

        rec.swap(root, largest);
        rec.record(|s| s.with_highlights([root, largest]));
        root = largest;
    }
}

#[cfg(test)]
mod tests {
    use crate::recorder::StepRecorder;

    #[test]
    fn extraction_swaps_touch_root() {
        let mut rec = StepRecorder::new(&[1, 5, 3, 4, 2]);
        super::sort(&mut rec);
        let sequence = rec.finish().unwrap();

        assert_eq!(sequence.last().values, vec![1, 2, 3, 4, 5]);
        // n - 1 extractions, each highlighting the root
        let root_swaps = sequence
            .iter()
            .filter(|s| s.highlighted.len() == 2 && s.is_highlighted(0))
            .count();
        assert!(root_swaps >= 4);
    }
}
