//! Runs the Pomodoro state machine against the wall clock.
//!
//! A `TimerService` owns one [`PomodoroTimer`] and at most one countdown task on
//! the tokio runtime. The countdown ticks the machine once per second and, on
//! completion, notifies the user, plays the completion sound and writes a
//! [`WorkSession`] through the [`SessionLedger`] on a detached task.
//!
//! ## Cancellation
//!
//! Every countdown is tagged with a generation number. `start`, `pause`,
//! `switch_mode` and `cancel` bump the generation under the same lock that
//! changes the machine, so a tick that was already in flight sees a stale
//! generation and does nothing. A second can therefore never be counted twice,
//! even if the old task has not yet observed its abort.
//!
//! ## Observing the timer
//!
//! - [`TimerService::snapshot`] / [`TimerService::watch`]: latest state, with a
//!   change notification (intermediate values may be coalesced).
//! - [`TimerService::subscribe`]: every event in order, including each tick,
//!   each completion and the outcome of each ledger write. Tick counts are
//!   strictly increasing.

use super::error::{StateError, ValidationError};
use super::ledger::SessionLedger;
use super::notify::{Notifier, SoundPlayer};
use super::session::{SessionMode, WorkSession};
use super::timer::{Completion, PomodoroTimer, TickOutcome, TimerDurations, TimerState};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    /// Seconds counted down over the lifetime of the service.
    pub ticks: u64,
    pub requested_minutes: u32,
    pub task_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    Started { mode: SessionMode, duration_minutes: u32, task_id: Option<i64> },
    Tick { ticks: u64, remaining: u64 },
    Paused { remaining: u64 },
    Resumed { remaining: u64 },
    ModeSwitched { mode: SessionMode, remaining: u64 },
    Cancelled { remaining: u64 },
    Completed(Completion),
    SessionRecorded(WorkSession),
    /// The completion write failed; the message is the storage error.
    RecordFailed(String),
}

struct Shared {
    timer: PomodoroTimer,
    generation: u64,
    task_id: Option<i64>,
    countdown: Option<JoinHandle<()>>,
}

impl Shared {
    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.timer.state(),
            ticks: self.timer.elapsed_ticks(),
            requested_minutes: self.timer.requested_minutes(),
            task_id: self.task_id,
        }
    }

    /// Invalidates any running countdown.
    fn stop_countdown(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.countdown.take() {
            handle.abort();
        }
    }
}

struct Inner {
    shared: Mutex<Shared>,
    ledger: SessionLedger,
    notifier: Arc<dyn Notifier>,
    sound: Arc<dyn SoundPlayer>,
    snapshots: watch::Sender<TimerSnapshot>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<TimerEvent>>>,
}

impl Inner {
    fn emit(&self, event: TimerEvent) {
        self.subscribers.lock().retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn publish(&self, shared: &Shared) {
        self.snapshots.send_replace(shared.snapshot());
    }

    /// Spawns a fresh countdown for the current generation.
    fn spawn_countdown(self: &Arc<Self>, shared: &mut Shared) {
        shared.stop_countdown();
        let generation = shared.generation;
        let inner = Arc::clone(self);
        shared.countdown = Some(tokio::spawn(run_countdown(inner, generation)));
    }

    fn on_completion(self: &Arc<Self>, completion: Completion, task_id: Option<i64>) {
        info!(mode = %completion.mode, minutes = completion.duration_minutes, "countdown completed");

        self.notifier.notify_completion(completion.mode);
        if let Err(e) = self.sound.play_completion_sound() {
            warn!("completion sound failed: {}", e);
        }

        let inner = Arc::clone(self);
        tokio::spawn(async move {
            let recorded = inner
                .ledger
                .record_session(task_id, completion.duration_minutes, completion.mode.is_break())
                .await;
            match recorded {
                Ok(session) => inner.emit(TimerEvent::SessionRecorded(session)),
                Err(e) => {
                    error!("failed to record {} session: {}", completion.mode, e);
                    inner.emit(TimerEvent::RecordFailed(e.to_string()));
                }
            }
        });
    }
}

async fn run_countdown(inner: Arc<Inner>, generation: u64) {
    let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let completed = {
            let mut shared = inner.shared.lock();
            if shared.generation != generation {
                return;
            }
            match shared.timer.tick() {
                TickOutcome::Ignored => return,
                TickOutcome::Ticked { remaining } => {
                    inner.emit(TimerEvent::Tick {
                        ticks: shared.timer.elapsed_ticks(),
                        remaining,
                    });
                    inner.publish(&shared);
                    None
                }
                TickOutcome::Completed(completion) => {
                    // Detach rather than abort: this task is the one finishing.
                    shared.countdown = None;
                    inner.emit(TimerEvent::Tick {
                        ticks: shared.timer.elapsed_ticks(),
                        remaining: 0,
                    });
                    inner.emit(TimerEvent::Completed(completion));
                    inner.publish(&shared);
                    Some((completion, shared.task_id))
                }
            }
        };

        if let Some((completion, task_id)) = completed {
            inner.on_completion(completion, task_id);
            return;
        }
    }
}

/// One Pomodoro timer bound to a ledger and the completion collaborators.
///
/// Must be used from within a tokio runtime.
pub struct TimerService {
    inner: Arc<Inner>,
}

impl TimerService {
    pub fn new(durations: TimerDurations, ledger: SessionLedger, notifier: Arc<dyn Notifier>, sound: Arc<dyn SoundPlayer>) -> Self {
        let shared = Shared {
            timer: PomodoroTimer::new(durations),
            generation: 0,
            task_id: None,
            countdown: None,
        };
        let (snapshots, _) = watch::channel(shared.snapshot());

        TimerService {
            inner: Arc::new(Inner {
                shared: Mutex::new(shared),
                ledger,
                notifier,
                sound,
                snapshots,
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        *self.inner.snapshots.borrow()
    }

    pub fn watch(&self) -> watch::Receiver<TimerSnapshot> {
        self.inner.snapshots.subscribe()
    }

    /// Receives every event from now on. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<TimerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.subscribers.lock().push(tx);
        rx
    }

    pub fn set_durations(&self, durations: TimerDurations) {
        self.inner.shared.lock().timer.set_durations(durations);
    }

    /// Starts a countdown of `duration_minutes`, replacing any countdown in flight.
    pub fn start(&self, mode: SessionMode, duration_minutes: u32, task_id: Option<i64>) -> Result<(), ValidationError> {
        let mut shared = self.inner.shared.lock();
        shared.timer.start(mode, duration_minutes)?;
        shared.task_id = task_id;
        self.inner.spawn_countdown(&mut shared);

        debug!(%mode, duration_minutes, ?task_id, "timer started");
        self.inner.emit(TimerEvent::Started {
            mode,
            duration_minutes,
            task_id,
        });
        self.inner.publish(&shared);
        Ok(())
    }

    pub fn pause(&self) -> Result<(), StateError> {
        let mut shared = self.inner.shared.lock();
        if let Err(e) = shared.timer.pause() {
            debug!("{}", e);
            return Err(e);
        }
        shared.stop_countdown();

        let remaining = shared.timer.state().remaining();
        self.inner.emit(TimerEvent::Paused { remaining });
        self.inner.publish(&shared);
        Ok(())
    }

    pub fn resume(&self) -> Result<(), StateError> {
        let mut shared = self.inner.shared.lock();
        if let Err(e) = shared.timer.resume() {
            debug!("{}", e);
            return Err(e);
        }
        self.inner.spawn_countdown(&mut shared);

        let remaining = shared.timer.state().remaining();
        self.inner.emit(TimerEvent::Resumed { remaining });
        self.inner.publish(&shared);
        Ok(())
    }

    /// Pauses a running countdown or resumes an idle one. Returns `true` when
    /// the timer is now paused.
    pub fn toggle_pause(&self) -> Result<bool, StateError> {
        if self.snapshot().state.is_running() {
            self.pause().map(|_| true)
        } else {
            self.resume().map(|_| false)
        }
    }

    pub fn switch_mode(&self) -> SessionMode {
        let mut shared = self.inner.shared.lock();
        shared.stop_countdown();
        let mode = shared.timer.switch_mode();

        let remaining = shared.timer.state().remaining();
        self.inner.emit(TimerEvent::ModeSwitched { mode, remaining });
        self.inner.publish(&shared);
        mode
    }

    /// Stops the tick source. A running countdown is left paused.
    pub fn cancel(&self) {
        let mut shared = self.inner.shared.lock();
        shared.stop_countdown();
        if shared.timer.state().is_running() {
            let _ = shared.timer.pause();
        }

        let remaining = shared.timer.state().remaining();
        self.inner.emit(TimerEvent::Cancelled { remaining });
        self.inner.publish(&shared);
    }
}

impl Drop for TimerService {
    fn drop(&mut self) {
        self.inner.shared.lock().stop_countdown();
    }
}
