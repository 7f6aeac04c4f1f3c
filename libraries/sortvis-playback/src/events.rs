//! Playback Events
//!
//! Event-based communication for UI synchronization during playback.
//! Events are emitted at key points:
//! - State changes (start, pause, resume, reset)
//! - Each rendered step
//! - Speed changes
//! - Completion and failure

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Session state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A step was handed to the renderer
    StepRendered {
        /// Index of the rendered step
        index: usize,
        /// Steps in the loaded sequence
        total: usize,
    },

    /// Speed level changed (1-100)
    SpeedChanged { level: u8 },

    /// Every step has been rendered
    Finished,

    /// The session stopped on a failure
    Error {
        /// Error message
        message: String,
    },
}

impl PlaybackEvent {
    /// Whether this event ends the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlaybackEvent::Finished | PlaybackEvent::Error { .. })
    }
}
