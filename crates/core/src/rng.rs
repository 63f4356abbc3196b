//! RNG module - uniform choice of a free cell
//!
//! Wraps a seeded [`StdRng`] so a round can be replayed from its seed
//! (simulator, tests). Picking never retries: it counts the free cells,
//! draws a rank in `[0, free)`, and walks to the cell with that rank.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cells::ActiveCells;

#[derive(Debug, Clone)]
pub struct CellPicker {
    rng: StdRng,
    seed: u64,
}

impl CellPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Pick a uniformly random index in `[0, total)` not present in `active`.
    ///
    /// Returns `None` when every index is taken (or `total` is 0).
    pub fn pick_free(&mut self, total: u16, active: &ActiveCells) -> Option<u16> {
        let taken = active.iter().filter(|c| c.index < total).count();
        let free = (total as usize).checked_sub(taken)?;
        if free == 0 {
            return None;
        }

        let mut rank = self.rng.random_range(0..free);
        for index in 0..total {
            if active.contains(index) {
                continue;
            }
            if rank == 0 {
                return Some(index);
            }
            rank -= 1;
        }
        None
    }
}

impl Default for CellPicker {
    fn default() -> Self {
        Self::new(1)
    }
}
