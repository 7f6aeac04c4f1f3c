//! Speed dial
//!
//! User-facing speed level (1-100) mapped inversely to the inter-tick delay:
//! `delay = (101 - level) * unit`, so level 100 is the shortest delay and
//! level 1 the longest.

use std::time::Duration;

/// Lowest accepted level
pub const MIN_SPEED: u8 = 1;

/// Highest accepted level
pub const MAX_SPEED: u8 = 100;

/// Speed level, always within `MIN_SPEED..=MAX_SPEED`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed {
    level: u8,
}

impl Speed {
    /// Create a speed level, clamped into range
    pub fn new(level: u8) -> Self {
        Self {
            level: level.clamp(MIN_SPEED, MAX_SPEED),
        }
    }

    /// Set the level (clamped)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Current level (1-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Delay units between ticks (1-100)
    pub fn delay_units(&self) -> u32 {
        101 - u32::from(self.level)
    }

    /// Delay between ticks for a given unit
    pub fn delay(&self, unit: Duration) -> Duration {
        unit * self.delay_units()
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::new(50)
    }
}
