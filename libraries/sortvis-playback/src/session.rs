//! Session state and generation tokens
//!
//! Fetches and timers are tagged with tokens drawn from one counter that
//! survives resets. A callback carrying anything but the current token is
//! stale and must be dropped.

use crate::speed::Speed;
use crate::types::PlaybackState;
use sortvis_core::{SortRequest, StepSequence};
use std::sync::Arc;
use std::time::Duration;

/// Identifies one issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchToken(u64);

impl FetchToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Identifies one armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic token source
#[derive(Debug, Default)]
pub(crate) struct Generation {
    next: u64,
}

impl Generation {
    fn bump(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    pub(crate) fn fetch(&mut self) -> FetchToken {
        FetchToken(self.bump())
    }

    pub(crate) fn timer(&mut self) -> TimerToken {
        TimerToken(self.bump())
    }
}

/// The timer the driver must keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTimer {
    pub token: TimerToken,

    /// Delay between consecutive ticks
    pub period: Duration,
}

/// A fetch the driver must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: FetchToken,
    pub request: SortRequest,
}

/// Mutable core state of one playback session
#[derive(Debug)]
pub(crate) struct PlaybackSession {
    pub(crate) state: PlaybackState,
    pub(crate) current_index: usize,
    pub(crate) speed: Speed,
    pub(crate) request: Option<SortRequest>,
    pub(crate) pending_fetch: Option<FetchToken>,
    pub(crate) timer: Option<ArmedTimer>,
    pub(crate) sequence: Option<Arc<StepSequence>>,
    pub(crate) last_error: Option<String>,
}

impl PlaybackSession {
    pub(crate) fn new(speed: Speed) -> Self {
        Self {
            state: PlaybackState::Idle,
            current_index: 0,
            speed,
            request: None,
            pending_fetch: None,
            timer: None,
            sequence: None,
            last_error: None,
        }
    }

    /// Back to a fresh idle session; the speed setting is kept
    pub(crate) fn clear(&mut self) {
        *self = Self::new(self.speed);
    }

    /// Input length the loaded steps must match
    pub(crate) fn expected_len(&self) -> usize {
        self.request.as_ref().map_or(0, SortRequest::len)
    }

    pub(crate) fn total_steps(&self) -> usize {
        self.sequence.as_ref().map_or(0, |s| s.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_never_repeat() {
        let mut generation = Generation::default();
        let a = generation.fetch();
        let b = generation.timer();
        let c = generation.fetch();

        assert!(a.value() < b.value());
        assert!(b.value() < c.value());
        assert_ne!(a, c);
    }

    #[test]
    fn clear_keeps_speed() {
        let mut session = PlaybackSession::new(Speed::new(90));
        session.state = PlaybackState::Error;
        session.current_index = 4;
        session.last_error = Some("boom".to_string());

        session.clear();

        assert_eq!(session.state, PlaybackState::Idle);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.speed.level(), 90);
        assert!(session.last_error.is_none());
    }
}
