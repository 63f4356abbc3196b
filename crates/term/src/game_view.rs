//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). The same [`GridLayout`] is used to draw the
//! grid and to resolve mouse clicks back to cell indices, so a click always
//! lands on the cell that was drawn under it.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{RoundOutcome, MIN_GRID_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Screen geometry of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub grid_size: u8,
    /// Score/time row.
    pub header_y: u16,
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    /// Top-left of cell 0.
    pub origin_x: u16,
    pub origin_y: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    pub pitch_x: u16,
    pub pitch_y: u16,
    /// Round status line under the frame.
    pub status_y: u16,
}

impl GridLayout {
    /// Screen rectangle `(x, y, w, h)` of cell `index`.
    pub fn cell_rect(&self, index: u16) -> Option<(u16, u16, u16, u16)> {
        let n = self.grid_size as u16;
        if n == 0 || index >= n * n {
            return None;
        }
        let (row, col) = (index / n, index % n);
        Some((
            self.origin_x + col * self.pitch_x,
            self.origin_y + row * self.pitch_y,
            self.cell_w,
            self.cell_h,
        ))
    }

    /// Cell index under a screen position; gaps and borders hit nothing.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<u16> {
        let n = self.grid_size as u16;
        if n == 0 || x < self.origin_x || y < self.origin_y {
            return None;
        }
        let (dx, dy) = (x - self.origin_x, y - self.origin_y);
        let (col, row) = (dx / self.pitch_x, dy / self.pitch_y);
        if col >= n || row >= n {
            return None;
        }
        if dx % self.pitch_x >= self.cell_w || dy % self.pitch_y >= self.cell_h {
            return None;
        }
        Some(row * n + col)
    }
}

const BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(25, 28, 36);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 120);

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Cell width in terminal columns.
    cell_w: u16,
    /// Cell height in terminal rows.
    cell_h: u16,
    /// Blank columns/rows between cells.
    gap: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x1 with a 1-cell gap keeps a 10x10 grid inside 80x24.
        Self {
            cell_w: 4,
            cell_h: 1,
            gap: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16, gap: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            gap,
        }
    }

    /// Compute where everything goes for a grid of `grid_size` in `viewport`.
    pub fn layout(&self, grid_size: u8, viewport: Viewport) -> GridLayout {
        let pitch_x = self.cell_w + self.gap;
        let pitch_y = self.cell_h + self.gap;
        // A disabled grid still reserves the smallest frame.
        let n = grid_size.max(MIN_GRID_SIZE) as u16;
        let inner_w = n * pitch_x - self.gap;
        let inner_h = n * pitch_y - self.gap;
        let frame_w = inner_w + 4;
        let frame_h = inner_h + 2;
        let total_h = frame_h + 3;

        let frame_x = viewport.width.saturating_sub(frame_w) / 2;
        let header_y = viewport.height.saturating_sub(total_h) / 2;
        let frame_y = header_y + 2;

        GridLayout {
            grid_size,
            header_y,
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            origin_x: frame_x + 2,
            origin_y: frame_y + 1,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            pitch_x,
            pitch_y,
            status_y: frame_y + frame_h,
        }
    }

    /// Cell index under a mouse position for the current snapshot.
    pub fn hit_test(&self, snap: &GameSnapshot, viewport: Viewport, x: u16, y: u16) -> Option<u16> {
        self.layout(snap.grid_size, viewport).hit_test(x, y)
    }

    /// Render into an existing framebuffer (no allocation once sized).
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<u16>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), BG).cell(' '));

        let layout = self.layout(snap.grid_size, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), BG);

        self.draw_header(fb, snap, &layout);
        fb.fill_rect(
            layout.frame_x + 1,
            layout.frame_y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        draw_border(fb, layout.frame_x, layout.frame_y, layout.frame_w, layout.frame_h, border);

        for index in 0..snap.total_cells() {
            self.draw_cell(fb, &layout, index, snap.is_active(index), cursor == Some(index));
        }

        self.draw_status(fb, snap, &layout);
        self.draw_side_panel(fb, snap, viewport, &layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, cursor: Option<u16>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &GridLayout) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), BG).bold();
        let value = CellStyle::new(Rgb::new(120, 230, 140), BG).bold();
        let y = layout.header_y;

        let x = fb.put_str(layout.frame_x, y, "SCORE ", label);
        fb.put_u32(x, y, snap.score, value);

        // "TIME 60s", right-aligned to the frame.
        let digits = if snap.seconds_remaining >= 10 { 2 } else { 1 };
        let time_w = 5 + digits + 1;
        let right = layout.frame_x + layout.frame_w;
        let time_value = if snap.seconds_remaining <= 10 && snap.running {
            CellStyle::new(Rgb::new(240, 90, 80), BG).bold()
        } else {
            value
        };
        let x = fb.put_str(right.saturating_sub(time_w), y, "TIME ", label);
        let x = fb.put_u32(x, y, snap.seconds_remaining, time_value);
        fb.put_char(x, y, 's', time_value);
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, layout: &GridLayout, index: u16, active: bool, cursor: bool) {
        let Some((x, y, w, h)) = layout.cell_rect(index) else {
            return;
        };
        let bg = if cursor { CURSOR_BG } else { BOARD_BG };
        let (ch, style) = if active {
            let fg = if cursor {
                Rgb::new(250, 230, 90)
            } else {
                Rgb::new(90, 220, 110)
            };
            ('█', CellStyle::new(fg, bg).bold())
        } else {
            ('░', CellStyle::new(Rgb::new(110, 110, 120), bg).dim())
        };
        fb.fill_rect(x, y, w, h, ch, style);
    }

    fn draw_status(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &GridLayout) {
        let text = status_text(snap);
        let style = match (snap.running, snap.last_outcome) {
            (true, _) => CellStyle::new(Rgb::new(120, 230, 140), BG).bold(),
            (false, Some(_)) => CellStyle::new(Rgb::new(240, 200, 90), BG).bold(),
            (false, None) => CellStyle::new(Rgb::new(200, 200, 200), BG),
        };
        let w = text.chars().count() as u16;
        let x = layout.frame_x + layout.frame_w.saturating_sub(w) / 2;
        fb.put_str(x, layout.status_y, text, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &GridLayout,
    ) {
        let panel_x = layout.frame_x.saturating_add(layout.frame_w).saturating_add(3);
        if panel_x >= viewport.width || viewport.width - panel_x < 14 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), BG).bold();
        let mut value = CellStyle::new(Rgb::new(200, 200, 200), BG);
        if snap.settings_locked() {
            value = value.dim();
        }
        let hint = CellStyle::new(Rgb::new(150, 150, 160), BG).dim();

        let mut y = layout.header_y;
        let x = fb.put_str(panel_x, y, "SETTINGS", label);
        if snap.settings_locked() {
            fb.put_str(x + 1, y, "(locked)", hint);
        }
        y += 1;

        let x = fb.put_str(panel_x, y, "GRID  ", value);
        if snap.grid_size == 0 {
            fb.put_str(x, y, "off", value);
        } else {
            let x = fb.put_u32(x, y, snap.grid_size as u32, value);
            let x = fb.put_str(x, y, "x", value);
            fb.put_u32(x, y, snap.grid_size as u32, value);
        }
        y += 1;
        let x = fb.put_str(panel_x, y, "LEVEL ", value);
        fb.put_str(x, y, snap.difficulty.as_str(), value);
        y += 2;

        fb.put_str(panel_x, y, "PAST SCORES", label);
        y += 1;
        if snap.past_scores.is_empty() {
            fb.put_str(panel_x, y, "-", hint);
            y += 1;
        }
        // Most recent first, as many as fit above the key help.
        let help_rows = 4;
        for score in snap.past_scores.iter().rev() {
            if y + help_rows + 1 >= viewport.height {
                break;
            }
            fb.put_u32(panel_x, y, *score, CellStyle::new(Rgb::new(200, 200, 200), BG));
            y += 1;
        }
        y += 1;

        if y >= viewport.height {
            return;
        }
        // Start is unavailable mid-round or on a disabled grid.
        let keys = CellStyle::new(Rgb::new(150, 150, 160), BG);
        let start = if snap.can_start { keys } else { keys.dim() };
        let x = fb.put_str(panel_x, y, "g start", start);
        fb.put_str(x, y, "  r reset", keys);
        y += 1;

        for line in ["+/- grid  d level", "arrows+space/click", "q quit"] {
            if y >= viewport.height {
                break;
            }
            let style = if snap.settings_locked() && line.starts_with('+') {
                hint
            } else {
                keys
            };
            fb.put_str(panel_x, y, line, style);
            y += 1;
        }
    }
}

/// Round status line shown under the grid.
pub fn status_text(snap: &GameSnapshot) -> &'static str {
    if snap.running {
        return "WHACK!";
    }
    if snap.grid_size == 0 {
        return "GRID DISABLED";
    }
    match snap.last_outcome {
        Some(RoundOutcome::TimeUp) => "TIME UP - G TO PLAY AGAIN",
        Some(RoundOutcome::Missed { .. }) => "MISSED - G TO PLAY AGAIN",
        None => "PRESS G TO START",
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}
