//! Engine tests
//!
//! Run the tokio driver on a paused clock so timers and fetch delays are
//! deterministic.

use async_trait::async_trait;
use sortvis_core::{AlgorithmId, FetchError, SortRequest, Step, StepFetcher, StepSequence};
use sortvis_playback::{
    PlaybackConfig, PlaybackEngine, PlaybackError, PlaybackEvent, PlaybackState, Renderer,
    Statistics,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;

// ===== Test Helpers =====

#[derive(Default)]
struct RecordingRenderer {
    steps: Vec<Step>,
    finals: usize,
}

impl Renderer for RecordingRenderer {
    fn render_step(&mut self, step: &Step) {
        self.steps.push(step.clone());
    }

    fn render_final(&mut self) {
        self.finals += 1;
    }
}

/// In-memory fetcher backed by the generator
///
/// Requests for `slow` take ten seconds, everything else ten milliseconds.
struct GeneratingFetcher {
    slow: Option<AlgorithmId>,
    calls: AtomicUsize,
}

impl GeneratingFetcher {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            slow: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn slow(algorithm: AlgorithmId) -> Arc<Self> {
        Arc::new(Self {
            slow: Some(algorithm),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl StepFetcher for GeneratingFetcher {
    async fn fetch(&self, request: &SortRequest) -> Result<StepSequence, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = if self.slow == Some(request.algorithm) {
            Duration::from_secs(10)
        } else {
            Duration::from_millis(10)
        };
        tokio::time::sleep(delay).await;
        sortvis_steps::generate_for(request).map_err(FetchError::from)
    }
}

struct FailingFetcher;

#[async_trait]
impl StepFetcher for FailingFetcher {
    async fn fetch(&self, _request: &SortRequest) -> Result<StepSequence, FetchError> {
        Err(FetchError::Status {
            status: 503,
            message: "maintenance".to_string(),
        })
    }
}

fn spawn(fetcher: Arc<dyn StepFetcher>) -> PlaybackEngine<RecordingRenderer> {
    PlaybackEngine::spawn(RecordingRenderer::default(), fetcher, PlaybackConfig::default())
}

fn expected(values: &[u32], algorithm: AlgorithmId) -> StepSequence {
    sortvis_steps::generate(values, algorithm).unwrap()
}

// ===== Tests =====

#[tokio::test(start_paused = true)]
async fn test_runs_to_completion() {
    let engine = spawn(GeneratingFetcher::new());

    engine.start(&[5, 3, 4, 1, 2], "bubble").await.unwrap();
    assert_eq!(engine.state(), PlaybackState::Loading);

    let done = engine.wait_until(|s| s.state.is_terminal()).await.unwrap();
    let sequence = expected(&[5, 3, 4, 1, 2], AlgorithmId::Bubble);

    assert_eq!(done.state, PlaybackState::Finished);
    assert_eq!(done.current_index, sequence.len());
    assert_eq!(done.algorithm, Some(AlgorithmId::Bubble));
    assert_eq!(
        done.statistics,
        Statistics {
            comparisons: sequence.last().comparisons,
            swaps: sequence.last().swaps,
        }
    );

    let renderer = engine.shutdown().await.unwrap();
    assert_eq!(renderer.steps, sequence.steps());
    assert_eq!(renderer.finals, 1);
}

#[tokio::test(start_paused = true)]
async fn test_ticks_follow_speed_delay() {
    let engine = spawn(GeneratingFetcher::new());
    engine.set_speed(1).await.unwrap();
    engine.start(&[3, 1, 2], "insertion").await.unwrap();

    engine
        .wait_until(|s| s.state == PlaybackState::Running)
        .await
        .unwrap();
    let started = tokio::time::Instant::now();

    engine.wait_until(|s| s.current_index == 2).await.unwrap();

    // Two ticks at 100 ms each
    assert_eq!(started.elapsed(), Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn test_speed_changes_mid_run() {
    let values = [9, 4, 7, 1, 8, 2];
    let engine = spawn(GeneratingFetcher::new());

    engine.start(&[9, 4, 7, 1, 8, 2], "heap").await.unwrap();

    engine.wait_until(|s| s.current_index >= 2).await.unwrap();
    engine.set_speed(100).await.unwrap();
    let index = engine.snapshot().current_index;
    assert!(index >= 2);

    engine.wait_until(|s| s.current_index >= index + 3).await.unwrap();
    engine.set_speed(1).await.unwrap();

    let done = engine.wait_until(|s| s.state.is_terminal()).await.unwrap();
    assert_eq!(done.state, PlaybackState::Finished);
    assert_eq!(done.speed, 1);

    let renderer = engine.shutdown().await.unwrap();
    assert_eq!(renderer.steps, expected(&values, AlgorithmId::Heap).steps());
}

#[tokio::test(start_paused = true)]
async fn test_pause_holds_index_then_resumes() {
    let values = [6, 5, 4, 3, 2, 1];
    let engine = spawn(GeneratingFetcher::new());
    engine.start(&[6, 5, 4, 3, 2, 1], "selection").await.unwrap();

    engine.wait_until(|s| s.current_index >= 3).await.unwrap();
    assert!(engine.pause().await.unwrap());
    assert!(!engine.pause().await.unwrap());

    let paused = engine.snapshot();
    assert_eq!(paused.state, PlaybackState::Paused);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(engine.snapshot().current_index, paused.current_index);

    assert!(engine.resume().await.unwrap());
    engine.wait_until(|s| s.is_finished()).await.unwrap();

    let renderer = engine.shutdown().await.unwrap();
    assert_eq!(renderer.steps, expected(&values, AlgorithmId::Selection).steps());
}

#[tokio::test(start_paused = true)]
async fn test_reset_during_pending_fetch() {
    let fetcher = GeneratingFetcher::slow(AlgorithmId::Merge);
    let engine = spawn(fetcher.clone());

    engine.start(&[4, 2, 3, 1], "merge").await.unwrap();
    engine.reset().await.unwrap();

    tokio::time::sleep(Duration::from_secs(60)).await;

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.state, PlaybackState::Idle);
    assert_eq!(snapshot.statistics, Statistics::default());
    assert_eq!(snapshot.total_steps, 0);
    assert!(fetcher.calls.load(Ordering::SeqCst) <= 1);

    let renderer = engine.shutdown().await.unwrap();
    assert!(renderer.steps.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_restart_while_loading_uses_latest_request() {
    let engine = spawn(GeneratingFetcher::slow(AlgorithmId::Bubble));

    engine.start(&[3, 1, 2], "bubble").await.unwrap();
    engine.start(&[3, 1, 2], "quick").await.unwrap();

    let done = engine.wait_until(|s| s.is_finished()).await.unwrap();
    assert_eq!(done.algorithm, Some(AlgorithmId::Quick));

    // Long enough for the superseded fetch to have completed
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(engine.is_finished());

    let renderer = engine.shutdown().await.unwrap();
    assert_eq!(renderer.steps, expected(&[3, 1, 2], AlgorithmId::Quick).steps());
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_enters_error() {
    let engine = spawn(Arc::new(FailingFetcher));
    let mut events = engine.events();

    engine.start(&[2, 1], "bubble").await.unwrap();
    let done = engine.wait_until(|s| s.state.is_terminal()).await.unwrap();

    assert_eq!(done.state, PlaybackState::Error);
    assert_eq!(done.statistics, Statistics::default());
    assert!(done.error.as_deref().unwrap().contains("maintenance"));

    let mut saw_error = false;
    loop {
        match events.try_recv() {
            Ok(PlaybackEvent::Error { message }) => {
                assert!(message.contains("503"));
                saw_error = true;
            }
            Ok(_) => {}
            Err(TryRecvError::Empty) => break,
            Err(e) => panic!("unexpected receive error: {:?}", e),
        }
    }
    assert!(saw_error);

    // Terminal until reset
    assert!(matches!(
        engine.start(&[2, 1], "bubble").await,
        Err(PlaybackError::InvalidOperation(_))
    ));
    engine.reset().await.unwrap();
    assert_eq!(engine.state(), PlaybackState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_input_rejected_without_fetch() {
    let fetcher = GeneratingFetcher::new();
    let engine = spawn(fetcher.clone());

    assert!(matches!(
        engine.start(&[], "bubble").await,
        Err(PlaybackError::InvalidInput(_))
    ));
    assert!(matches!(
        engine.start(&[0, 4], "bubble").await,
        Err(PlaybackError::InvalidInput(_))
    ));
    assert!(matches!(
        engine.start(&[4, 1], "shell").await,
        Err(PlaybackError::InvalidInput(_))
    ));

    assert_eq!(engine.state(), PlaybackState::Idle);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_event_order_for_complete_run() {
    let engine = spawn(GeneratingFetcher::new());
    let mut events = engine.events();

    engine.start(&[2, 3, 1], "insertion").await.unwrap();
    let done = engine.wait_until(|s| s.is_finished()).await.unwrap();

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }

    assert_eq!(
        received.first(),
        Some(&PlaybackEvent::StateChanged {
            state: PlaybackState::Loading
        })
    );
    assert_eq!(received.last(), Some(&PlaybackEvent::Finished));

    let rendered = received
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::StepRendered { .. }))
        .count();
    assert_eq!(rendered, done.total_steps);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_returns_renderer() {
    let engine = spawn(GeneratingFetcher::new());
    let watcher = engine.subscribe();

    let renderer = engine.shutdown().await.unwrap();
    assert!(renderer.steps.is_empty());
    assert!(watcher.has_changed().is_err());
}
