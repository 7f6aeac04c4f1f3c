mod algorithm;
mod request;
mod sequence;
mod step;

pub use algorithm::{AlgorithmDescriptor, AlgorithmId};
pub use request::SortRequest;
pub use sequence::StepSequence;
pub use step::{check_step, Step, StepRecord};
