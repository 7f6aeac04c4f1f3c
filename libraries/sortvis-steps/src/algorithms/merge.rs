//! Top-down merge sort with the merge buffer shown as the auxiliary array

use crate::recorder::StepRecorder;

pub(super) fn sort(rec: &mut StepRecorder) {
    let n = rec.len();
    sort_range(rec, 0, n);
}

/// Sort the half-open range `start..end`
fn sort_range(rec: &mut StepRecorder, start: usize, end: usize) {
    if end - start <= 1 {
        return;
    }

    let mid = (start + end) / 2;
    rec.record(|s| s.with_highlights([start, mid, end - 1]));

    sort_range(rec, start, mid);
    sort_range(rec, mid, end);

    let left = rec.values()[start..mid].to_vec();
    let right = rec.values()[mid..end].to_vec();
    let buffer: Vec<u32> = left.iter().chain(right.iter()).copied().collect();

    rec.record(|s| s.with_highlights(start..end).with_auxiliary(buffer.clone()));

    let (mut i, mut j, mut k) = (0, 0, start);

    while i < left.len() && j < right.len() {
        rec.compare();

        let next = if left[i] <= right[j] {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };

        rec.write(k, next);
        k += 1;
        rec.record(|s| s.with_highlights([k - 1]).with_auxiliary(buffer.clone()));
    }

    for &value in left[i..].iter().chain(right[j..].iter()) {
        rec.write(k, value);
        k += 1;
        rec.record(|s| s.with_highlights([k - 1]).with_auxiliary(buffer.clone()));
    }
}
