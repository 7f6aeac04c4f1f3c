//! Bubble sort: compare adjacent pairs, swap when out of order

use crate::recorder::StepRecorder;

pub(super) fn sort(rec: &mut StepRecorder) {
    let n = rec.len();

    for i in 0..n {
        for j in 0..n - i - 1 {
            rec.compare();
            rec.record(|s| s.with_highlights([j, j + 1]));

            if rec.value(j) > rec.value(j + 1) {
                rec.swap(j, j + 1);
                rec.record(|s| s.with_highlights([j, j + 1]));
            }
        }
    }
}
