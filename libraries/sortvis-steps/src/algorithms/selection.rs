//! Selection sort: find the minimum of the unsorted tail, move it to the front

use crate::recorder::StepRecorder;

pub(super) fn sort(rec: &mut StepRecorder) {
    let n = rec.len();

    for i in 0..n {
        let mut min_idx = i;

        for j in (i + 1)..n {
            rec.compare();
            rec.record(|s| s.with_highlights([min_idx, j]));

            if rec.value(j) < rec.value(min_idx) {
                min_idx = j;
            }
        }

        if min_idx != i {
            rec.swap(i, min_idx);
            rec.record(|s| s.with_highlights([i, min_idx]));
        }
    }
}
