//! Random input arrays
//!
//! Mirrors the "generate new array" control: uniform values in an inclusive range.

use rand::Rng;
use sortvis_core::{Result, SortvisError};

/// Shape of a random input array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomArraySpec {
    /// Number of elements (at least 1)
    pub size: usize,

    /// Smallest value (at least 1)
    pub min: u32,

    /// Largest value (at least `min`)
    pub max: u32,
}

impl Default for RandomArraySpec {
    fn default() -> Self {
        Self {
            size: 10,
            min: 1,
            max: 100,
        }
    }
}

impl RandomArraySpec {
    /// Describe an array shape
    pub fn new(size: usize, min: u32, max: u32) -> Self {
        Self { size, min, max }
    }

    /// Check the shape describes a non-empty array of positive values
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(SortvisError::invalid_input("size must be at least 1"));
        }
        if self.min == 0 {
            return Err(SortvisError::invalid_input("min_val must be at least 1"));
        }
        if self.min > self.max {
            return Err(SortvisError::invalid_input(format!(
                "min_val {} is greater than max_val {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Draw an array using `rng`
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<u32>> {
        self.validate()?;
        Ok((0..self.size)
            .map(|_| rng.gen_range(self.min..=self.max))
            .collect())
    }
}

/// Draw an array using the thread-local generator
pub fn random_array(spec: RandomArraySpec) -> Result<Vec<u32>> {
    spec.generate(&mut rand::thread_rng())
}
