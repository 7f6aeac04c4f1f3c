//! Sortvis - Playback Engine
//!
//! Step-indexed playback of precomputed sorting traces.
//!
//! This crate provides:
//! - A session state machine (Idle, Loading, Running, Paused, Finished, Error)
//! - Speed control (1-100, mapped inversely to the tick delay)
//! - Statistics projection (comparisons and swaps of the current step)
//! - A renderer contract plus a terminal bar-chart renderer
//! - Generation tokens so stale fetches and ticks are dropped
//! - A tokio driver (`engine` feature, on by default)
//!
//! # Architecture
//!
//! `PlaybackController` is pure: it performs no I/O and keeps no clock. It
//! hands out a `FetchTicket` when a run starts and exposes the `ArmedTimer`
//! it wants running; callers feed back fetch results and ticks. This keeps
//! every transition testable without a runtime.
//!
//! `PlaybackEngine` owns a controller inside one tokio task and drives it
//! from a `StepFetcher`, a single re-armed sleep and a command channel.
//!
//! # Example: Driving the controller by hand
//!
//! ```rust
//! use sortvis_core::{Step, StepSequence};
//! use sortvis_playback::{PlaybackConfig, PlaybackController, PlaybackState, Renderer, TickOutcome};
//! use std::sync::Arc;
//!
//! struct Silent;
//!
//! impl Renderer for Silent {
//!     fn render_step(&mut self, _step: &Step) {}
//!     fn render_final(&mut self) {}
//! }
//!
//! let mut controller = PlaybackController::new(Silent, PlaybackConfig::default());
//! let ticket = controller.start(&[2, 1], "bubble").unwrap();
//!
//! // Normally produced by a StepFetcher
//! let sequence = StepSequence::new(vec![
//!     Step::new(vec![2, 1], 0, 0),
//!     Step::new(vec![1, 2], 1, 1),
//! ])
//! .unwrap();
//! controller.fetch_succeeded(ticket.token, Arc::new(sequence));
//!
//! while let Some(timer) = controller.armed_timer() {
//!     controller.tick(timer.token);
//! }
//!
//! assert_eq!(controller.state(), PlaybackState::Finished);
//! assert_eq!(controller.statistics().swaps, 1);
//! ```

#![forbid(unsafe_code)]

mod controller;
#[cfg(feature = "engine")]
mod engine;
mod error;
pub mod events;
mod renderer;
mod session;
mod speed;
mod statistics;
pub mod types;

// Public exports
pub use controller::{PlaybackController, TickOutcome};
#[cfg(feature = "engine")]
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use renderer::{Renderer, TextRenderer, DEFAULT_ROWS};
pub use session::{ArmedTimer, FetchTicket, FetchToken, TimerToken};
pub use speed::{Speed, MAX_SPEED, MIN_SPEED};
pub use statistics::{Statistics, StatisticsView};
pub use types::{PlaybackConfig, PlaybackSnapshot, PlaybackState};
