//! Tokio driver for `PlaybackController`
//!
//! One spawned task owns the controller and serializes every input in a
//! single `select!` loop: caller commands, fetch completions and the timer.
//! At most one fetch task and one timer exist at a time. After each handled
//! input the task forwards drained events and publishes a fresh snapshot.

use crate::{
    controller::PlaybackController,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    renderer::Renderer,
    session::{ArmedTimer, FetchToken, TimerToken},
    statistics::Statistics,
    types::{PlaybackConfig, PlaybackSnapshot, PlaybackState},
};
use sortvis_core::{FetchError, SortRequest, StepFetcher, StepSequence};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant, Sleep};
use tracing::{debug, info, warn};

/// Capacity of the event broadcast channel
const EVENT_CAPACITY: usize = 256;

enum Command {
    Start {
        request: SortRequest,
        reply: oneshot::Sender<Result<()>>,
    },
    Pause {
        reply: oneshot::Sender<bool>,
    },
    Resume {
        reply: oneshot::Sender<bool>,
    },
    SetSpeed {
        level: u8,
        reply: oneshot::Sender<()>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
}

struct FetchOutcome {
    token: FetchToken,
    result: std::result::Result<StepSequence, FetchError>,
}

/// Answer to a command, sent after the snapshot is published
enum Reply {
    Started(oneshot::Sender<Result<()>>, Result<()>),
    Applied(oneshot::Sender<bool>, bool),
    Done(oneshot::Sender<()>),
}

impl Reply {
    fn send(self) {
        // The caller may have stopped waiting
        let _ = match self {
            Reply::Started(tx, result) => tx.send(result).map_err(drop),
            Reply::Applied(tx, applied) => tx.send(applied).map_err(drop),
            Reply::Done(tx) => tx.send(()).map_err(drop),
        };
    }
}

enum Input {
    Command(Command),
    Fetched(FetchOutcome),
    Tick(TimerToken),
}

/// The one live timer, re-armed after every fire
struct ArmedSleep {
    timer: ArmedTimer,
    sleep: Pin<Box<Sleep>>,
}

impl ArmedSleep {
    fn new(timer: ArmedTimer) -> Self {
        Self {
            timer,
            sleep: Box::pin(sleep(timer.period)),
        }
    }

    /// Next fire is one full period after now, so a stalled loop never
    /// bursts through missed ticks
    fn rearm(&mut self) {
        self.sleep.as_mut().reset(Instant::now() + self.timer.period);
    }
}

/// Wait for the armed timer, or forever when none is armed
async fn next_tick(timer: &mut Option<ArmedSleep>) -> TimerToken {
    match timer {
        Some(armed) => {
            armed.sleep.as_mut().await;
            armed.rearm();
            armed.timer.token
        }
        None => std::future::pending().await,
    }
}

/// Match the live timer to the one the controller wants armed
fn sync_timer(wanted: Option<ArmedTimer>, timer: &mut Option<ArmedSleep>) {
    match (wanted, timer.as_ref()) {
        (None, _) => *timer = None,
        (Some(w), Some(live)) if live.timer.token == w.token => {}
        (Some(w), _) => *timer = Some(ArmedSleep::new(w)),
    }
}

/// Handle to a running playback task
///
/// Commands are answered in the order they are sent. Dropping the handle
/// stops the task.
pub struct PlaybackEngine<R: Renderer + 'static> {
    commands: mpsc::UnboundedSender<Command>,
    snapshot: watch::Receiver<PlaybackSnapshot>,
    events: broadcast::Sender<PlaybackEvent>,
    task: JoinHandle<R>,
}

impl<R: Renderer + 'static> PlaybackEngine<R> {
    /// Spawn the playback task on the current tokio runtime
    pub fn spawn(renderer: R, fetcher: Arc<dyn StepFetcher>, config: PlaybackConfig) -> Self {
        let controller = PlaybackController::new(renderer, config);
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);

        let task = tokio::spawn(run(
            controller,
            fetcher,
            commands_rx,
            snapshot_tx,
            events_tx.clone(),
        ));

        Self {
            commands: commands_tx,
            snapshot: snapshot_rx,
            events: events_tx,
            task,
        }
    }

    /// Start a run from untyped input
    ///
    /// # Errors
    /// `InvalidInput` for bad values or an unknown algorithm,
    /// `InvalidOperation` unless idle or loading.
    pub async fn start(&self, values: &[i64], algorithm: &str) -> Result<()> {
        let request = SortRequest::parse(values, algorithm)?;
        self.start_request(request).await
    }

    /// Start a run from a validated request
    pub async fn start_request(&self, request: SortRequest) -> Result<()> {
        self.call(|reply| Command::Start { request, reply }).await?
    }

    /// Pause playback; `false` unless it was running
    pub async fn pause(&self) -> Result<bool> {
        self.call(|reply| Command::Pause { reply }).await
    }

    /// Resume playback; `false` unless it was paused
    pub async fn resume(&self) -> Result<bool> {
        self.call(|reply| Command::Resume { reply }).await
    }

    pub async fn set_speed(&self, level: u8) -> Result<()> {
        self.call(|reply| Command::SetSpeed { level, reply }).await
    }

    pub async fn reset(&self) -> Result<()> {
        self.call(|reply| Command::Reset { reply }).await
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn state(&self) -> PlaybackState {
        self.snapshot.borrow().state
    }

    pub fn statistics(&self) -> Statistics {
        self.snapshot.borrow().statistics
    }

    pub fn is_finished(&self) -> bool {
        self.snapshot.borrow().is_finished()
    }

    /// Receiver notified on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshot.clone()
    }

    /// Receiver for every event emitted from now on
    pub fn events(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Wait for the first snapshot satisfying `done`
    ///
    /// # Errors
    /// `EngineStopped` if the task exits first.
    pub async fn wait_until(
        &self,
        done: impl FnMut(&PlaybackSnapshot) -> bool,
    ) -> Result<PlaybackSnapshot> {
        let mut rx = self.snapshot.clone();
        let snapshot = rx
            .wait_for(done)
            .await
            .map_err(|_| PlaybackError::EngineStopped)?;
        Ok(snapshot.clone())
    }

    /// Stop the task and hand back the renderer
    pub async fn shutdown(self) -> Result<R> {
        drop(self.commands);
        self.task.await.map_err(|_| PlaybackError::EngineStopped)
    }

    async fn call<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .map_err(|_| PlaybackError::EngineStopped)?;
        response.await.map_err(|_| PlaybackError::EngineStopped)
    }
}

async fn run<R: Renderer + 'static>(
    mut controller: PlaybackController<R>,
    fetcher: Arc<dyn StepFetcher>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshot: watch::Sender<PlaybackSnapshot>,
    events: broadcast::Sender<PlaybackEvent>,
) -> R {
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let mut fetch_task: Option<JoinHandle<()>> = None;
    let mut timer: Option<ArmedSleep> = None;

    info!("Playback engine started");

    loop {
        let input = tokio::select! {
            command = commands.recv() => match command {
                Some(command) => Input::Command(command),
                None => break,
            },
            Some(outcome) = fetch_rx.recv() => Input::Fetched(outcome),
            token = next_tick(&mut timer) => Input::Tick(token),
        };

        let reply = match input {
            Input::Command(Command::Start { request, reply }) => {
                let result = controller.start_request(request).map(|ticket| {
                    if let Some(previous) = fetch_task.take() {
                        previous.abort();
                    }
                    let fetcher = Arc::clone(&fetcher);
                    let tx = fetch_tx.clone();
                    fetch_task = Some(tokio::spawn(async move {
                        let result = fetcher.fetch(&ticket.request).await;
                        // Receiver only closes when the engine stops
                        let _ = tx.send(FetchOutcome {
                            token: ticket.token,
                            result,
                        });
                    }));
                });
                Some(Reply::Started(reply, result))
            }
            Input::Command(Command::Pause { reply }) => {
                Some(Reply::Applied(reply, controller.pause()))
            }
            Input::Command(Command::Resume { reply }) => {
                Some(Reply::Applied(reply, controller.resume()))
            }
            Input::Command(Command::SetSpeed { level, reply }) => {
                controller.set_speed(level);
                Some(Reply::Done(reply))
            }
            Input::Command(Command::Reset { reply }) => {
                if let Some(task) = fetch_task.take() {
                    debug!("Aborting in-flight fetch");
                    task.abort();
                }
                controller.reset();
                Some(Reply::Done(reply))
            }
            Input::Fetched(FetchOutcome { token, result }) => {
                if controller.pending_fetch() == Some(token) {
                    fetch_task = None;
                }
                match result {
                    Ok(sequence) => controller.fetch_succeeded(token, Arc::new(sequence)),
                    Err(e) => controller.fetch_failed(token, e),
                };
                None
            }
            Input::Tick(token) => {
                controller.tick(token);
                None
            }
        };

        sync_timer(controller.armed_timer(), &mut timer);

        for event in controller.drain_events() {
            // No subscribers is fine
            let _ = events.send(event);
        }
        snapshot.send_replace(controller.snapshot());

        // Callers see the published snapshot once their command returns
        if let Some(reply) = reply {
            reply.send();
        }
    }

    if let Some(task) = fetch_task.take() {
        warn!("Engine stopped with a fetch in flight");
        task.abort();
    }
    info!("Playback engine stopped");

    controller.into_renderer()
}
