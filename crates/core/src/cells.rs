//! Active cell set.
//!
//! Fixed capacity (one slot per possible cell), unique by index. The set
//! never allocates after construction.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::MAX_CELLS;

/// A cell that can currently be whacked for a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveCell {
    pub index: u16,
    pub activated_at_ms: u64,
}

impl ActiveCell {
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.activated_at_ms)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActiveCells {
    cells: ArrayVec<ActiveCell, MAX_CELLS>,
}

impl ActiveCells {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, index: u16) -> bool {
        self.cells.iter().any(|c| c.index == index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveCell> {
        self.cells.iter()
    }

    /// Activate `index` at `now_ms`.
    ///
    /// Rejects indices outside `[0, total)` and indices already active.
    pub fn insert(&mut self, index: u16, now_ms: u64, total: u16) -> bool {
        if index >= total || self.contains(index) || self.cells.is_full() {
            return false;
        }
        self.cells.push(ActiveCell {
            index,
            activated_at_ms: now_ms,
        });
        true
    }

    pub fn remove(&mut self, index: u16) -> Option<ActiveCell> {
        let pos = self.cells.iter().position(|c| c.index == index)?;
        Some(self.cells.remove(pos))
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Remove every cell whose age has reached `max_age_ms`.
    ///
    /// Returns how many were removed and the first (oldest) of them.
    pub fn expire(&mut self, now_ms: u64, max_age_ms: u32) -> (usize, Option<ActiveCell>) {
        let mut first: Option<ActiveCell> = None;
        let before = self.cells.len();
        self.cells.retain(|c| {
            if c.age_ms(now_ms) >= max_age_ms as u64 {
                if first.is_none() {
                    first = Some(*c);
                }
                false
            } else {
                true
            }
        });
        (before - self.cells.len(), first)
    }
}
