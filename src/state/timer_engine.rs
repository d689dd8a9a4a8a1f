//! Countdown engine owning the authoritative timer state

use std::{
    future::ready,
    ops::ControlFlow,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use futures::stream::{self, Stream, StreamExt};
use tokio::{
    runtime::Handle,
    sync::{broadcast, broadcast::error::RecvError, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use super::{DigitWheels, TimerState};
use crate::tasks::countdown_task;

/// Buffered snapshots per event subscriber before it starts lagging
const SNAPSHOT_BUFFER: usize = 64;

/// Countdown state machine.
///
/// `Idle --start()--> Running --(last tick | stop())--> Idle`
///
/// Every transition replaces the whole [`TimerState`] and publishes it. The
/// latest value is kept on a watch channel; every individual change also goes
/// out on a broadcast channel. Invalid commands (start while running, start at
/// `0:00`, turning a wheel while running) are ignored.
#[derive(Debug)]
pub struct TimerEngine {
    shared: Arc<EngineShared>,
}

/// State shared between the engine handle and its countdown task
#[derive(Debug)]
pub struct EngineShared {
    inner: Mutex<EngineInner>,
    snapshot_tx: watch::Sender<TimerState>,
    change_tx: broadcast::Sender<TimerState>,
}

#[derive(Debug)]
struct EngineInner {
    state: TimerState,
    /// Bumped on every start and stop; ticks carrying an older epoch are stale
    epoch: u64,
    countdown: Option<JoinHandle<()>>,
}

/// State before and after one command, read under the same lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub before: TimerState,
    pub after: TimerState,
}

impl TimerEngine {
    /// Create an engine in `Idle` with all wheels at zero
    pub fn new() -> Self {
        let initial = TimerState::new();
        let (snapshot_tx, _) = watch::channel(initial);
        let (change_tx, _) = broadcast::channel(SNAPSHOT_BUFFER);

        Self {
            shared: Arc::new(EngineShared {
                inner: Mutex::new(EngineInner {
                    state: initial,
                    epoch: 0,
                    countdown: None,
                }),
                snapshot_tx,
                change_tx,
            }),
        }
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> TimerState {
        self.shared.lock().state
    }

    /// Latest-value subscription; the current state is readable immediately
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Stream of snapshots starting with the current state, then every change
    /// in publication order.
    ///
    /// A subscriber more than `SNAPSHOT_BUFFER` changes behind skips the
    /// oldest ones and a warning is logged.
    pub fn snapshots(&self) -> impl Stream<Item = TimerState> + Send + 'static {
        let (current, rx) = {
            let inner = self.shared.lock();
            (inner.state, self.shared.change_tx.subscribe())
        };

        let changes = stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(snapshot) => return Some((snapshot, rx)),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Snapshot subscriber lagged, skipped {} snapshots", skipped);
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        });

        stream::once(ready(current)).chain(changes)
    }

    pub fn increment_minutes(&self) -> Transition {
        self.update_wheels("minutes", DigitWheels::increment_minutes)
    }

    pub fn increment_tens_seconds(&self) -> Transition {
        self.update_wheels("tens", DigitWheels::increment_tens_seconds)
    }

    pub fn increment_units_seconds(&self) -> Transition {
        self.update_wheels("units", DigitWheels::increment_units_seconds)
    }

    /// Apply a wheel update while idle and publish the result
    fn update_wheels<F>(&self, wheel: &str, updater: F) -> Transition
    where
        F: FnOnce(DigitWheels) -> DigitWheels,
    {
        let mut inner = self.shared.lock();
        let before = inner.state;

        if let TimerState::Idle { wheels } = before {
            let wheels = updater(wheels);
            debug!("{} wheel turned, clock now set to {}s", wheel, wheels.total_seconds());
            self.shared.publish(&mut inner, TimerState::idle(wheels));
        } else {
            debug!("Ignoring {} wheel press while countdown is running", wheel);
        }

        Transition { before, after: inner.state }
    }

    /// Start counting down from the configured wheels.
    ///
    /// Ignored unless idle with a non-zero duration. Must be called from
    /// within a tokio runtime; otherwise the call is logged and ignored.
    pub fn start(&self) -> Transition {
        let mut inner = self.shared.lock();
        let before = inner.state;

        if let Some((wheels, runtime)) = Self::startable(before) {
            inner.epoch = inner.epoch.wrapping_add(1);
            let epoch = inner.epoch;

            info!("Starting countdown of {}s", wheels.total_seconds());
            self.shared.publish(&mut inner, TimerState::started(wheels));

            let shared = Arc::clone(&self.shared);
            inner.countdown = Some(runtime.spawn(countdown_task(shared, epoch, wheels)));
        }

        Transition { before, after: inner.state }
    }

    /// Wheels to count down from and the runtime to tick on, if `state` may start
    fn startable(state: TimerState) -> Option<(DigitWheels, Handle)> {
        let TimerState::Idle { wheels } = state else {
            debug!("Ignoring start while countdown is already running");
            return None;
        };

        if wheels.total_seconds() == 0 {
            debug!("Ignoring start with a zero-length duration");
            return None;
        }

        match Handle::try_current() {
            Ok(handle) => Some((wheels, handle)),
            Err(e) => {
                error!("Cannot start countdown outside a tokio runtime: {}", e);
                None
            }
        }
    }

    /// Cancel any running countdown and reset to `Idle` with all wheels at zero.
    ///
    /// Once this returns, no tick from the cancelled countdown can publish.
    pub fn stop(&self) -> Transition {
        let mut inner = self.shared.lock();
        let before = inner.state;

        inner.epoch = inner.epoch.wrapping_add(1);
        if let Some(countdown) = inner.countdown.take() {
            countdown.abort();
            info!("Countdown cancelled");
        }

        self.shared.publish(&mut inner, TimerState::new());
        Transition { before, after: inner.state }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        inner.epoch = inner.epoch.wrapping_add(1);
        if let Some(countdown) = inner.countdown.take() {
            countdown.abort();
        }
    }
}

impl EngineShared {
    fn lock(&self) -> MutexGuard<'_, EngineInner> {
        // The state is always replaced whole, so a poisoned guard is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the state and notify subscribers while the lock is held
    fn publish(&self, inner: &mut EngineInner, next: TimerState) {
        inner.state = next;
        self.snapshot_tx.send_replace(next);
        // Err only means no event subscriber is connected
        let _ = self.change_tx.send(next);
    }

    /// Apply one tick from the countdown task running under `epoch`.
    ///
    /// `wheels` is the time left after this tick. Returns `Break` when the
    /// countdown is over or was cancelled.
    pub(crate) fn apply_tick(&self, epoch: u64, wheels: DigitWheels) -> ControlFlow<()> {
        let mut inner = self.lock();

        if inner.epoch != epoch {
            debug!("Discarding stale tick from epoch {} (current {})", epoch, inner.epoch);
            return ControlFlow::Break(());
        }

        let TimerState::Running { total_seconds, remaining_seconds, configured } = inner.state else {
            warn!("Tick received while idle, stopping countdown task");
            return ControlFlow::Break(());
        };

        if wheels.is_zero() {
            if remaining_seconds > 1 {
                warn!("Clock reached 0:00 with {} ticks still scheduled", remaining_seconds - 1);
            }
            info!("Countdown of {}s complete", total_seconds);
            inner.countdown = None;
            self.publish(&mut inner, TimerState::new());
            return ControlFlow::Break(());
        }

        let remaining_seconds = wheels.total_seconds();
        debug!("Tick: {}s of {}s remaining", remaining_seconds, total_seconds);
        self.publish(
            &mut inner,
            TimerState::Running {
                total_seconds,
                remaining_seconds,
                configured,
            },
        );
        ControlFlow::Continue(())
    }
}
