//! Playback controller - the session state machine
//!
//! Owns the session, the statistics view and the renderer. The controller
//! performs no I/O and keeps no clock: callers feed it fetch results and
//! timer ticks, and read back the fetch ticket and the timer it wants armed.
//! `PlaybackEngine` is the tokio driver; tests drive it by hand.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    renderer::Renderer,
    session::{ArmedTimer, FetchTicket, FetchToken, Generation, PlaybackSession, TimerToken},
    speed::Speed,
    statistics::{Statistics, StatisticsView},
    types::{PlaybackConfig, PlaybackSnapshot, PlaybackState},
};
use sortvis_core::{check_step, FetchError, SortRequest, StepSequence};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Result of feeding one tick to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale token or not running; nothing happened
    Ignored,

    /// The step at `index` was rendered
    Rendered { index: usize },

    /// Every step had been rendered; the session is now finished
    Finished,

    /// The next step broke an invariant; the session is now in error
    Halted,
}

/// Step-indexed playback state machine
pub struct PlaybackController<R: Renderer> {
    renderer: R,
    session: PlaybackSession,
    statistics: StatisticsView,
    generation: Generation,
    tick_unit: Duration,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<R: Renderer> PlaybackController<R> {
    /// Create an idle controller
    pub fn new(renderer: R, config: PlaybackConfig) -> Self {
        Self {
            renderer,
            session: PlaybackSession::new(Speed::new(config.speed)),
            statistics: StatisticsView::new(),
            generation: Generation::default(),
            tick_unit: config.tick_unit,
            pending_events: Vec::new(),
        }
    }

    // ===== Commands =====

    /// Start a run from untyped input
    ///
    /// # Errors
    /// `InvalidOperation` unless idle or loading; `InvalidInput` for an empty
    /// array, a non-positive value or an unknown algorithm. The session is
    /// left untouched on error.
    pub fn start(&mut self, values: &[i64], algorithm: &str) -> Result<FetchTicket> {
        self.ensure_can_start()?;
        let request = SortRequest::parse(values, algorithm)?;
        self.start_request(request)
    }

    /// Start a run from a validated request
    ///
    /// Returns the ticket the caller must fetch. Starting while a fetch is
    /// pending supersedes it; its result will be dropped.
    pub fn start_request(&mut self, request: SortRequest) -> Result<FetchTicket> {
        self.ensure_can_start()?;

        if let Some(previous) = self.session.pending_fetch {
            warn!(token = previous.value(), "Superseding pending fetch");
        }

        let token = self.generation.fetch();
        info!(
            algorithm = %request.algorithm,
            len = request.len(),
            token = token.value(),
            "Starting playback"
        );

        self.session.pending_fetch = Some(token);
        self.session.request = Some(request.clone());
        self.set_state(PlaybackState::Loading);

        Ok(FetchTicket { token, request })
    }

    /// Deliver a fetched sequence
    ///
    /// Returns `false` when `token` is not the pending fetch; the sequence is
    /// dropped in that case.
    pub fn fetch_succeeded(&mut self, token: FetchToken, sequence: Arc<StepSequence>) -> bool {
        if !self.accepts_fetch(token) {
            warn!(token = token.value(), "Dropping stale fetch result");
            return false;
        }

        info!(steps = sequence.len(), "Step sequence loaded");
        self.session.pending_fetch = None;
        self.session.sequence = Some(sequence);
        self.session.current_index = 0;
        self.arm_timer();
        self.set_state(PlaybackState::Running);
        true
    }

    /// Deliver a fetch failure
    ///
    /// Returns `false` when `token` is not the pending fetch.
    pub fn fetch_failed(&mut self, token: FetchToken, error: FetchError) -> bool {
        if !self.accepts_fetch(token) {
            warn!(token = token.value(), "Dropping stale fetch failure");
            return false;
        }

        self.session.pending_fetch = None;
        self.fail(PlaybackError::FetchFailed(error));
        true
    }

    /// Advance playback by one step
    ///
    /// Renders the step at the current index and moves past it. The tick
    /// after the last render finishes the session.
    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        let armed = self.session.timer.map(|t| t.token);
        if self.session.state != PlaybackState::Running || armed != Some(token) {
            debug!(token = token.value(), "Ignoring stale tick");
            return TickOutcome::Ignored;
        }

        let Some(sequence) = self.session.sequence.clone() else {
            return TickOutcome::Ignored;
        };

        let index = self.session.current_index;
        let Some(step) = sequence.get(index) else {
            self.finish();
            return TickOutcome::Finished;
        };

        let previous = index.checked_sub(1).and_then(|i| sequence.get(i));
        if let Err(e) = check_step(previous, step, self.session.expected_len(), index) {
            self.fail(e.into());
            return TickOutcome::Halted;
        }

        self.renderer.render_step(step);
        self.statistics.project(step);
        self.session.current_index += 1;

        debug!(index, total = sequence.len(), "Rendered step");
        self.pending_events.push(PlaybackEvent::StepRendered {
            index,
            total: sequence.len(),
        });

        TickOutcome::Rendered { index }
    }

    /// Pause playback
    ///
    /// Returns `false` (no-op) unless running.
    pub fn pause(&mut self) -> bool {
        if self.session.state != PlaybackState::Running {
            return false;
        }
        self.session.timer = None;
        self.set_state(PlaybackState::Paused);
        true
    }

    /// Resume playback at the current index
    ///
    /// Returns `false` (no-op) unless paused.
    pub fn resume(&mut self) -> bool {
        if self.session.state != PlaybackState::Paused {
            return false;
        }
        self.arm_timer();
        self.set_state(PlaybackState::Running);
        true
    }

    /// Set speed level (1-100, clamped)
    ///
    /// While running, the armed timer is replaced by one with the new delay;
    /// the current index is preserved. In every other state only the stored
    /// level changes.
    pub fn set_speed(&mut self, level: u8) {
        let previous = self.session.speed;
        self.session.speed.set_level(level);
        if self.session.speed == previous {
            return;
        }

        if self.session.state == PlaybackState::Running {
            self.arm_timer();
        }

        debug!(level = self.session.speed.level(), "Speed changed");
        self.pending_events.push(PlaybackEvent::SpeedChanged {
            level: self.session.speed.level(),
        });
    }

    /// Return to idle from any state
    ///
    /// Disarms the timer, invalidates the pending fetch, drops the sequence
    /// and zeroes index and statistics. The speed level is kept.
    pub fn reset(&mut self) {
        let was = self.session.state;
        self.session.clear();
        self.statistics.reset();

        if was != PlaybackState::Idle {
            info!(from = ?was, "Playback reset");
            self.pending_events.push(PlaybackEvent::StateChanged {
                state: PlaybackState::Idle,
            });
        }
    }

    // ===== Driver Interface =====

    /// Timer the driver must keep running, if any
    pub fn armed_timer(&self) -> Option<ArmedTimer> {
        self.session.timer
    }

    /// Fetch the driver is expected to complete, if any
    pub fn pending_fetch(&self) -> Option<FetchToken> {
        self.session.pending_fetch
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consume the controller, handing back its renderer
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    // ===== Observers =====

    pub fn state(&self) -> PlaybackState {
        self.session.state
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics.current()
    }

    /// Index of the next step to render
    pub fn current_index(&self) -> usize {
        self.session.current_index
    }

    pub fn total_steps(&self) -> usize {
        self.session.total_steps()
    }

    pub fn speed(&self) -> u8 {
        self.session.speed.level()
    }

    pub fn is_finished(&self) -> bool {
        self.session.state == PlaybackState::Finished
    }

    /// Message of the error that stopped the session
    pub fn last_error(&self) -> Option<&str> {
        self.session.last_error.as_deref()
    }

    /// Fraction of steps rendered (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        self.snapshot().progress()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.session.state,
            current_index: self.session.current_index,
            total_steps: self.session.total_steps(),
            speed: self.session.speed.level(),
            statistics: self.statistics.current(),
            algorithm: self.session.request.as_ref().map(|r| r.algorithm),
            error: self.session.last_error.clone(),
        }
    }

    // ===== Internal =====

    fn ensure_can_start(&self) -> Result<()> {
        match self.session.state {
            PlaybackState::Idle | PlaybackState::Loading => Ok(()),
            state => Err(PlaybackError::InvalidOperation(format!(
                "cannot start while {:?}; reset first",
                state
            ))),
        }
    }

    fn accepts_fetch(&self, token: FetchToken) -> bool {
        self.session.state == PlaybackState::Loading && self.session.pending_fetch == Some(token)
    }

    /// Replace the armed timer with a fresh one at the current speed
    fn arm_timer(&mut self) {
        let token = self.generation.timer();
        self.session.timer = Some(ArmedTimer {
            token,
            period: self.session.speed.delay(self.tick_unit),
        });
    }

    fn finish(&mut self) {
        self.session.timer = None;
        self.renderer.render_final();
        info!(steps = self.session.total_steps(), "Playback finished");
        self.set_state(PlaybackState::Finished);
        self.pending_events.push(PlaybackEvent::Finished);
    }

    fn fail(&mut self, err: PlaybackError) {
        error!(error = %err, "Playback failed");
        let message = err.to_string();
        self.session.timer = None;
        self.session.pending_fetch = None;
        self.session.last_error = Some(message.clone());
        self.set_state(PlaybackState::Error);
        self.pending_events.push(PlaybackEvent::Error { message });
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.session.state != state {
            self.session.state = state;
            self.pending_events.push(PlaybackEvent::StateChanged { state });
        }
    }
}
