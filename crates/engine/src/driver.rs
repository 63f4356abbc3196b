//! Async driver: the single owner of [`GameState`].
//!
//! Each armed timer runs as its own tokio task built on
//! [`tokio::time::interval_at`]. Tasks never touch state; they only report
//! `(kind, handle, deadline)` to the owner loop, which applies it through
//! [`GameState::fire`]. After every event the owner reconciles tasks with the
//! game's armed timers: a task whose handle is no longer armed is aborted,
//! and a freshly armed timer gets a new task. Fires already queued from an
//! aborted task carry an old handle and are rejected by the core.

use std::time::Duration;

use log::{debug, trace};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::core::{GameSnapshot, GameState, TimerHandle, TimerSpec};
use crate::types::{Command, TimerKind};

/// Capacity of the timer fire queue.
const FIRE_QUEUE: usize = 16;

/// One timer fire reported by a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub kind: TimerKind,
    pub handle: TimerHandle,
    pub at: Instant,
}

/// A running timer task and the handle it fires under.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: TimerHandle,
    join: JoinHandle<()>,
}

impl ScheduledTask {
    /// Spawn a periodic task for `spec`, with deadlines measured from `origin`.
    pub fn spawn(kind: TimerKind, spec: TimerSpec, origin: Instant, tx: mpsc::Sender<Fired>) -> Self {
        let start = origin + Duration::from_millis(spec.next_due_ms);
        let period = Duration::from_millis(spec.period_ms as u64);
        let handle = spec.handle;

        let join = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                let at = interval.tick().await;
                if tx.send(Fired { kind, handle, at }).await.is_err() {
                    break;
                }
            }
        });

        Self { handle, join }
    }

    pub fn handle(&self) -> TimerHandle {
        self.handle
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    pub fn cancel(self) {
        self.join.abort();
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.join.abort();
    }
}

/// Owner loop state.
pub struct Driver {
    game: GameState,
    origin: Instant,
    countdown: Option<ScheduledTask>,
    spawner: Option<ScheduledTask>,
    fired_tx: mpsc::Sender<Fired>,
    fired_rx: mpsc::Receiver<Fired>,
    snapshot: GameSnapshot,
    snapshot_tx: watch::Sender<GameSnapshot>,
}

impl Driver {
    /// Create a driver whose clock starts now.
    ///
    /// Returns the driver and a receiver that always holds the latest snapshot.
    pub fn new(game: GameState) -> (Self, watch::Receiver<GameSnapshot>) {
        let snapshot = game.snapshot();
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot.clone());
        let (fired_tx, fired_rx) = mpsc::channel(FIRE_QUEUE);
        let driver = Self {
            game,
            origin: Instant::now(),
            countdown: None,
            spawner: None,
            fired_tx,
            fired_rx,
            snapshot,
            snapshot_tx,
        };
        (driver, snapshot_rx)
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Number of timer tasks currently alive.
    pub fn live_tasks(&self) -> usize {
        [self.countdown.as_ref(), self.spawner.as_ref()]
            .into_iter()
            .flatten()
            .filter(|t| !t.is_finished())
            .count()
    }

    fn now_ms(&self) -> u64 {
        self.ms_at(Instant::now())
    }

    fn ms_at(&self, at: Instant) -> u64 {
        at.saturating_duration_since(self.origin).as_millis() as u64
    }

    /// Apply one player command at the current instant.
    pub fn handle_command(&mut self, command: Command) -> bool {
        let now = self.now_ms();
        let changed = self.game.apply(command, now);
        trace!("command {} at {}ms -> {}", command.as_str(), now, changed);
        self.after_event();
        changed
    }

    /// Apply one timer fire.
    pub fn handle_fired(&mut self, fired: Fired) -> bool {
        let at = self.ms_at(fired.at);
        let accepted = self.game.fire(fired.kind, fired.handle, at);
        self.after_event();
        accepted
    }

    fn after_event(&mut self) {
        self.reconcile();
        self.publish();
    }

    /// Make the set of running tasks match the game's armed timers.
    fn reconcile(&mut self) {
        for kind in TimerKind::ALL {
            let wanted = self.game.timer_spec(kind);
            let slot = match kind {
                TimerKind::Countdown => &mut self.countdown,
                TimerKind::Spawner => &mut self.spawner,
            };

            let current = slot.as_ref().map(ScheduledTask::handle);
            if current == wanted.map(|s| s.handle) {
                continue;
            }

            if let Some(old) = slot.take() {
                debug!("cancel {} task (handle {})", kind.as_str(), old.handle().id());
                old.cancel();
            }
            if let Some(spec) = wanted {
                debug!(
                    "spawn {} task (handle {}, every {}ms, first at {}ms)",
                    kind.as_str(),
                    spec.handle.id(),
                    spec.period_ms,
                    spec.next_due_ms
                );
                *slot = Some(ScheduledTask::spawn(
                    kind,
                    spec,
                    self.origin,
                    self.fired_tx.clone(),
                ));
            }
        }
    }

    fn publish(&mut self) {
        self.game.snapshot_into(&mut self.snapshot);
        self.snapshot_tx.send_if_modified(|current| {
            if *current == self.snapshot {
                false
            } else {
                current.clone_from(&self.snapshot);
                true
            }
        });
    }

    /// Run until the command channel closes. Returns the final snapshot.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> GameSnapshot {
        self.after_event();
        loop {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(cmd) => {
                        self.handle_command(cmd);
                    }
                    None => break,
                },
                Some(fired) = self.fired_rx.recv() => {
                    self.handle_fired(fired);
                }
            }
        }

        self.countdown.take();
        self.spawner.take();
        self.game.snapshot()
    }
}
