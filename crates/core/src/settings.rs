//! Round settings and their input normalization.
//!
//! Settings never fail: out-of-range numbers are clamped, unparseable text is
//! ignored. A grid size of 0 is kept as-is and means "disabled" (start is
//! refused and the scheduler clears the board).

use crate::types::{Difficulty, DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub grid_size: u8,
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            difficulty: Difficulty::default(),
        }
    }
}

impl Settings {
    pub fn new(grid_size: i64, difficulty: Difficulty) -> Self {
        Self {
            grid_size: clamp_grid_size(grid_size),
            difficulty,
        }
    }

    /// Number of cells on the grid (0 when disabled).
    pub fn total_cells(&self) -> u16 {
        (self.grid_size as u16) * (self.grid_size as u16)
    }

    pub fn is_playable(&self) -> bool {
        self.grid_size > 0
    }
}

/// Clamp a requested grid edge.
///
/// `<= 0` → 0 (disabled), `1..3` → 3, `> 10` → 10.
pub fn clamp_grid_size(requested: i64) -> u8 {
    if requested <= 0 {
        0
    } else {
        requested.clamp(MIN_GRID_SIZE as i64, MAX_GRID_SIZE as i64) as u8
    }
}

/// Parse a grid size typed by a user. Non-numeric input yields `None`.
pub fn parse_grid_size(text: &str) -> Option<u8> {
    text.trim().parse::<i64>().ok().map(clamp_grid_size)
}
