//! Keyboard cursor over the grid.
//!
//! Lets the game be played without a mouse: arrows move a highlighted cell,
//! and whacking it issues the same click the mouse would.

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    row: u8,
    col: u8,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Move one cell, stopping at the grid edges.
    pub fn apply(&mut self, mv: CursorMove, grid_size: u8) {
        if grid_size == 0 {
            return;
        }
        let last = grid_size - 1;
        match mv {
            CursorMove::Up => self.row = self.row.saturating_sub(1),
            CursorMove::Down => self.row = (self.row + 1).min(last),
            CursorMove::Left => self.col = self.col.saturating_sub(1),
            CursorMove::Right => self.col = (self.col + 1).min(last),
        }
    }

    /// Pull the cursor back inside a (possibly shrunk) grid.
    pub fn clamp(&mut self, grid_size: u8) {
        let last = grid_size.saturating_sub(1);
        self.row = self.row.min(last);
        self.col = self.col.min(last);
    }

    /// Row-major cell index under the cursor, if the grid is playable.
    pub fn index(&self, grid_size: u8) -> Option<u16> {
        if self.row >= grid_size || self.col >= grid_size {
            return None;
        }
        Some(self.row as u16 * grid_size as u16 + self.col as u16)
    }
}
