//! Periodic timers with cancellation handles.
//!
//! A timer is armed with a fresh [`TimerHandle`] each time a round starts.
//! Every fire must present the handle it was scheduled under; fires carrying
//! any other handle are stale (from a cancelled timer or a previous round)
//! and are rejected without touching game state.

use serde::Serialize;

/// Generation id of one arming of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerHandle(u32);

impl TimerHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Hands out monotonically increasing handles.
#[derive(Debug, Clone, Default)]
pub struct HandleAllocator {
    next: u32,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> TimerHandle {
        let h = TimerHandle(self.next.max(1));
        self.next = h.0.wrapping_add(1);
        h
    }
}

/// What a driver needs to know to schedule a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSpec {
    pub handle: TimerHandle,
    pub period_ms: u32,
    /// Absolute time of the next fire on the driver's clock.
    pub next_due_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Armed {
    handle: TimerHandle,
    next_due_ms: u64,
}

/// Fixed-rate periodic timer (like `setInterval`), cancellable.
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    period_ms: u32,
    armed: Option<Armed>,
}

impl PeriodicTimer {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            armed: None,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Arm the timer; the first fire is due `first_delay_ms` after `now_ms`.
    ///
    /// Re-arming an armed timer replaces its handle, which orphans any fire
    /// still in flight for the old one.
    pub fn arm(&mut self, handle: TimerHandle, period_ms: u32, now_ms: u64, first_delay_ms: u32) {
        self.period_ms = period_ms.max(1);
        self.armed = Some(Armed {
            handle,
            next_due_ms: now_ms + first_delay_ms as u64,
        });
    }

    /// Cancel the timer, returning the handle it was armed with.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.armed.take().map(|a| a.handle)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.armed.map(|a| a.handle)
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.armed.map(|a| a.next_due_ms)
    }

    pub fn spec(&self) -> Option<TimerSpec> {
        self.armed.map(|a| TimerSpec {
            handle: a.handle,
            period_ms: self.period_ms,
            next_due_ms: a.next_due_ms,
        })
    }

    /// Accept a fire for `handle`.
    ///
    /// Returns false (and changes nothing) when the handle is stale. On
    /// success the next deadline moves one period forward.
    pub fn acknowledge(&mut self, handle: TimerHandle) -> bool {
        match self.armed.as_mut() {
            Some(a) if a.handle == handle => {
                a.next_due_ms += self.period_ms as u64;
                true
            }
            _ => false,
        }
    }
}
