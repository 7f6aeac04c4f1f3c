//! One module per algorithm, each replaying the sort through a `StepRecorder`

mod bubble;
mod counting;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

use crate::recorder::StepRecorder;
use sortvis_core::{AlgorithmId, Result, StepSequence};

/// Run `algorithm` on `values` (non-empty, positive)
pub(crate) fn run(values: &[u32], algorithm: AlgorithmId) -> Result<StepSequence> {
    let mut recorder = StepRecorder::new(values);

    match algorithm {
        AlgorithmId::Bubble => bubble::sort(&mut recorder),
        AlgorithmId::Selection => selection::sort(&mut recorder),
        AlgorithmId::Insertion => insertion::sort(&mut recorder),
        AlgorithmId::Merge => merge::sort(&mut recorder),
        AlgorithmId::Quick => quick::sort(&mut recorder),
        AlgorithmId::Heap => heap::sort(&mut recorder),
        AlgorithmId::Counting => counting::sort(&mut recorder)?,
    }

    recorder.finish()
}
