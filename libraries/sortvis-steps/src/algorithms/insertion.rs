//! Insertion sort: shift larger elements right, drop the key into the gap

use crate::recorder::StepRecorder;

pub(super) fn sort(rec: &mut StepRecorder) {
    let n = rec.len();

    for i in 1..n {
        let key = rec.value(i);
        rec.record(|s| s.with_highlights([i]));

        // `slot` is where the key lands; the element compared is `slot - 1`
        let mut slot = i;
        while slot > 0 {
            rec.compare();
            rec.record(|s| s.with_highlights([slot - 1, slot]));

            if rec.value(slot - 1) > key {
                let shifted = rec.value(slot - 1);
                rec.write(slot, shifted);
                rec.record(|s| s.with_highlights([slot - 1, slot]));
                slot -= 1;
            } else {
                break;
            }
        }

        rec.set(slot, key);

        if slot != i {
            rec.record(|s| s.with_highlights([slot]));
        }
    }
}
