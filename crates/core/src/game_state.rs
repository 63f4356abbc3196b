//! Game state module - round lifecycle, countdown, cell scheduler, clicks
//!
//! [`GameState`] is the single owner of everything mutable in a game. Time
//! enters only through explicit `now_ms` arguments, so the same state machine
//! runs under a virtual clock ([`GameState::advance_to`]) or under the async
//! engine, which fires the timers from real tokio tasks.

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::cells::ActiveCells;
use crate::rng::CellPicker;
use crate::settings::{clamp_grid_size, Settings};
use crate::snapshot::GameSnapshot;
use crate::timer::{HandleAllocator, PeriodicTimer, TimerHandle, TimerSpec};
use crate::types::*;

#[derive(Debug, Clone)]
pub struct GameState {
    settings: Settings,
    score: u32,
    seconds_remaining: u32,
    running: bool,
    countdown_phase: CountdownPhase,
    active: ActiveCells,
    countdown: PeriodicTimer,
    spawner: PeriodicTimer,
    handles: HandleAllocator,
    picker: CellPicker,
    /// Increments on every accepted start.
    round_id: u32,
    last_outcome: Option<RoundOutcome>,
    past_scores: ArrayVec<u32, PAST_SCORES_LIMIT>,
    /// Latest time observed from the driver.
    now_ms: u64,
}

impl GameState {
    /// Create a game with default settings and the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::default(), seed)
    }

    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        Self {
            settings,
            score: 0,
            seconds_remaining: ROUND_SECONDS,
            running: false,
            countdown_phase: CountdownPhase::Idle,
            active: ActiveCells::new(),
            countdown: PeriodicTimer::new(COUNTDOWN_PERIOD_MS),
            spawner: PeriodicTimer::new(settings.difficulty.interval_ms()),
            handles: HandleAllocator::new(),
            picker: CellPicker::new(seed),
            round_id: 0,
            last_outcome: None,
            past_scores: ArrayVec::new(),
            now_ms: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn countdown_phase(&self) -> CountdownPhase {
        self.countdown_phase
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn grid_size(&self) -> u8 {
        self.settings.grid_size
    }

    pub fn difficulty(&self) -> Difficulty {
        self.settings.difficulty
    }

    pub fn active_cells(&self) -> &ActiveCells {
        &self.active
    }

    pub fn is_active(&self, index: u16) -> bool {
        self.active.contains(index)
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    pub fn past_scores(&self) -> &[u32] {
        &self.past_scores
    }

    pub fn seed(&self) -> u64 {
        self.picker.seed()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Start is offered when idle and the grid is playable.
    pub fn can_start(&self) -> bool {
        !self.running && self.settings.is_playable()
    }

    // ------------------------------------------------------------------
    // Round lifecycle
    // ------------------------------------------------------------------

    /// Start a round at `now_ms`.
    ///
    /// Returns false (no-op) when already running or the grid is disabled.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if !self.can_start() {
            debug!(
                "start rejected (running={}, grid_size={})",
                self.running, self.settings.grid_size
            );
            return false;
        }
        self.observe(now_ms);

        self.score = 0;
        self.seconds_remaining = ROUND_SECONDS;
        self.active.clear();
        self.last_outcome = None;
        self.running = true;
        self.countdown_phase = CountdownPhase::Running;
        self.round_id = self.round_id.wrapping_add(1);

        let countdown = self.handles.allocate();
        self.countdown
            .arm(countdown, COUNTDOWN_PERIOD_MS, self.now_ms, COUNTDOWN_PERIOD_MS);
        // The scheduler's first tick lands on the start instant.
        let spawner = self.handles.allocate();
        let interval = self.settings.difficulty.interval_ms();
        self.spawner.arm(spawner, interval, self.now_ms, 0);

        info!(
            "round {} started: grid={} difficulty={}",
            self.round_id,
            self.settings.grid_size,
            self.settings.difficulty.as_str()
        );
        true
    }

    /// Stop everything and clear the board. Always allowed.
    pub fn reset(&mut self) {
        if self.running {
            info!("round {} reset at score {}", self.round_id, self.score);
        }
        self.cancel_timers();
        self.running = false;
        self.countdown_phase = CountdownPhase::Idle;
        self.score = 0;
        self.seconds_remaining = ROUND_SECONDS;
        self.active.clear();
        self.last_outcome = None;
    }

    /// Change the grid edge (clamped). Rejected while running.
    pub fn set_grid_size(&mut self, requested: i64) -> bool {
        if self.running {
            return false;
        }
        self.settings.grid_size = clamp_grid_size(requested);
        true
    }

    /// Change the difficulty. Rejected while running.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.running {
            return false;
        }
        self.settings.difficulty = difficulty;
        true
    }

    /// Whack cell `index`. Returns true when a point was scored.
    pub fn click(&mut self, index: u16) -> bool {
        if !self.running {
            return false;
        }
        if self.active.remove(index).is_none() {
            return false;
        }
        self.score += 1;
        true
    }

    /// Apply a player command. Returns true when state changed.
    pub fn apply(&mut self, command: Command, now_ms: u64) -> bool {
        match command {
            Command::Start => self.start(now_ms),
            Command::Reset => {
                self.reset();
                true
            }
            Command::Click(index) => self.click(index),
            Command::SetGridSize(size) => self.set_grid_size(size),
            Command::GrowGrid => {
                let next = self.settings.grid_size as i64 + 1;
                // Growing a disabled grid lands on the smallest playable one.
                self.set_grid_size(next.max(MIN_GRID_SIZE as i64))
            }
            Command::ShrinkGrid => {
                let next = (self.settings.grid_size as i64 - 1).max(MIN_GRID_SIZE as i64);
                self.set_grid_size(next)
            }
            Command::SetDifficulty(d) => self.set_difficulty(d),
            Command::CycleDifficulty => self.set_difficulty(self.settings.difficulty.next()),
        }
    }

    // ------------------------------------------------------------------
    // Timers
    // ------------------------------------------------------------------

    /// Schedule of an armed timer, if any.
    pub fn timer_spec(&self, kind: TimerKind) -> Option<TimerSpec> {
        match kind {
            TimerKind::Countdown => self.countdown.spec(),
            TimerKind::Spawner => self.spawner.spec(),
        }
    }

    /// Earliest deadline among armed timers.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match (self.countdown.next_due_ms(), self.spawner.next_due_ms()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Deliver a timer fire.
    ///
    /// Returns false for stale fires (cancelled timer or an old round); those
    /// never touch state.
    pub fn fire(&mut self, kind: TimerKind, handle: TimerHandle, now_ms: u64) -> bool {
        let accepted = match kind {
            TimerKind::Countdown => self.countdown.acknowledge(handle),
            TimerKind::Spawner => self.spawner.acknowledge(handle),
        };
        if !accepted {
            debug!("stale {} fire (handle {}) ignored", kind.as_str(), handle.id());
            return false;
        }
        self.observe(now_ms);

        match kind {
            TimerKind::Countdown => self.on_countdown_tick(),
            TimerKind::Spawner => self.on_spawner_tick(),
        }
        true
    }

    /// Virtual-time driver: fire every timer due at or before `now_ms`.
    ///
    /// Fires happen in deadline order, each at its own deadline; the
    /// countdown goes first when both are due at the same instant.
    pub fn advance_to(&mut self, now_ms: u64) {
        loop {
            let countdown = self.countdown.spec().filter(|s| s.next_due_ms <= now_ms);
            let spawner = self.spawner.spec().filter(|s| s.next_due_ms <= now_ms);
            let (kind, spec) = match (countdown, spawner) {
                (Some(c), Some(s)) if s.next_due_ms < c.next_due_ms => (TimerKind::Spawner, s),
                (Some(c), _) => (TimerKind::Countdown, c),
                (None, Some(s)) => (TimerKind::Spawner, s),
                (None, None) => break,
            };
            self.fire(kind, spec.handle, spec.next_due_ms);
        }
        self.observe(now_ms);
    }

    fn on_countdown_tick(&mut self) {
        if !self.running {
            return;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.countdown_phase = CountdownPhase::Expired;
            self.end_round(RoundOutcome::TimeUp);
        }
    }

    fn on_spawner_tick(&mut self) {
        if !self.settings.is_playable() {
            self.active.clear();
            self.spawner.cancel();
            return;
        }

        let now = self.now_ms;
        let max_age = self.settings.difficulty.max_duration_ms();
        let (expired, first) = self.active.expire(now, max_age);
        if let Some(cell) = first {
            debug!(
                "{} cell(s) overstayed, first index {} aged {}ms",
                expired,
                cell.index,
                cell.age_ms(now)
            );
            self.countdown_phase = CountdownPhase::Idle;
            self.end_round(RoundOutcome::Missed { index: cell.index });
            return;
        }

        if !self.running {
            return;
        }
        let total = self.settings.total_cells();
        if let Some(index) = self.picker.pick_free(total, &self.active) {
            self.active.insert(index, now, total);
        }
    }

    fn end_round(&mut self, outcome: RoundOutcome) {
        self.cancel_timers();
        self.running = false;
        self.active.clear();
        self.last_outcome = Some(outcome);

        if self.past_scores.is_full() {
            self.past_scores.remove(0);
        }
        self.past_scores.push(self.score);

        info!(
            "round {} ended ({}) with score {}",
            self.round_id,
            outcome.as_str(),
            self.score
        );
    }

    fn cancel_timers(&mut self) {
        self.countdown.cancel();
        self.spawner.cancel();
    }

    fn observe(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill an existing snapshot without allocating.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.round_id = self.round_id;
        out.score = self.score;
        out.seconds_remaining = self.seconds_remaining;
        out.grid_size = self.settings.grid_size;
        out.difficulty = self.settings.difficulty;
        out.running = self.running;
        out.countdown = self.countdown_phase;
        out.active.clear();
        out.active.extend(self.active.iter().map(|c| c.index));
        out.last_outcome = self.last_outcome;
        out.past_scores.clear();
        out.past_scores.extend(self.past_scores.iter().copied());
        out.can_start = self.can_start();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
