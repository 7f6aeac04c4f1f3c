//! Core types for playback

use crate::statistics::Statistics;
use serde::{Deserialize, Serialize};
use sortvis_core::AlgorithmId;
use std::time::Duration;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No sequence, ready to accept input
    Idle,

    /// Fetch in flight
    Loading,

    /// Timer active, advancing one step per tick
    Running,

    /// Sequence loaded, timer stopped, index retained
    Paused,

    /// Every step rendered; terminal until reset
    Finished,

    /// Fetch or invariant failure; recoverable only via reset
    Error,
}

impl PlaybackState {
    /// Whether the session can only leave this state through reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlaybackState::Finished | PlaybackState::Error)
    }

    /// Whether a sequence is loaded and playback can advance or resume
    pub fn has_sequence(&self) -> bool {
        matches!(self, PlaybackState::Running | PlaybackState::Paused)
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial speed level (1-100, default: 50)
    pub speed: u8,

    /// Duration of one delay unit (default: 1 ms)
    ///
    /// The inter-tick delay is `(101 - speed)` units.
    pub tick_unit: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 50,
            tick_unit: Duration::from_millis(1),
        }
    }
}

/// Read-only view of a session for observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,

    /// Index of the next step to render
    pub current_index: usize,

    /// Steps in the loaded sequence (0 when none)
    pub total_steps: usize,

    pub speed: u8,

    pub statistics: Statistics,

    /// Algorithm of the current run
    pub algorithm: Option<AlgorithmId>,

    /// Message of the error that stopped the session
    pub error: Option<String>,
}

impl PlaybackSnapshot {
    /// Whether playback ran to completion
    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// Fraction of steps rendered (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        if self.total_steps == 0 {
            0.0
        } else {
            self.current_index as f32 / self.total_steps as f32
        }
    }
}
