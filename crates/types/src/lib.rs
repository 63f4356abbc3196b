//! Core types module - shared data structures and constants
//!
//! Everything here is plain data: difficulty levels with their timing table,
//! the commands a player (or a script) can issue, and the small enums that
//! describe a round's lifecycle. Used by core logic, the engine, input mapping,
//! and the terminal view alike.
//!
//! # Difficulty Timing
//!
//! | Difficulty | Scheduler interval | Max cell lifetime |
//! |------------|--------------------|-------------------|
//! | easy       | 1000ms             | 3000ms            |
//! | medium     | 750ms              | 2000ms            |
//! | hard       | 250ms              | 1000ms            |
//!
//! # Examples
//!
//! ```
//! use tui_whack_types::{Command, Difficulty};
//!
//! let d = Difficulty::from_str("Medium").unwrap();
//! assert_eq!(d.interval_ms(), 750);
//! assert_eq!(d.max_duration_ms(), 2000);
//!
//! assert_eq!(Command::from_str("start"), Some(Command::Start));
//! ```

use serde::Serialize;

/// Round length in seconds.
pub const ROUND_SECONDS: u32 = 60;

/// Countdown period (one decrement per second).
pub const COUNTDOWN_PERIOD_MS: u32 = 1000;

/// Smallest playable grid edge.
pub const MIN_GRID_SIZE: u8 = 3;

/// Largest grid edge.
pub const MAX_GRID_SIZE: u8 = 10;

/// Grid edge used when nothing else is configured.
pub const DEFAULT_GRID_SIZE: u8 = 3;

/// Upper bound on cell count (`MAX_GRID_SIZE²`).
pub const MAX_CELLS: usize = (MAX_GRID_SIZE as usize) * (MAX_GRID_SIZE as usize);

/// How many finished-round scores are kept in memory.
pub const PAST_SCORES_LIMIT: usize = 10;

/// Terminal input poll / redraw interval in milliseconds.
pub const TICK_MS: u32 = 16;

/// Difficulty levels.
///
/// Difficulty sets both how often the cell scheduler fires and how long an
/// active cell may stay unclicked before the round is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse difficulty from string (case-insensitive, full name or initial)
    ///
    /// ```
    /// use tui_whack_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str(" H "), Some(Difficulty::Hard));
    /// assert_eq!(Difficulty::from_str("nightmare"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "medium" | "m" => Some(Difficulty::Medium),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Cell scheduler period in milliseconds.
    pub fn interval_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 1000,
            Difficulty::Medium => 750,
            Difficulty::Hard => 250,
        }
    }

    /// Age at which an unclicked cell ends the round, in milliseconds.
    pub fn max_duration_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 3000,
            Difficulty::Medium => 2000,
            Difficulty::Hard => 1000,
        }
    }

    /// Next difficulty in the easy → medium → hard → easy cycle.
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// Commands that change game state.
///
/// Human input, the headless simulator, and tests all speak this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a round (ignored while running or with a disabled grid)
    Start,
    /// Stop everything and clear the board
    Reset,
    /// Whack the cell at this row-major index
    Click(u16),
    /// Set the grid edge (clamped; locked while running)
    SetGridSize(i64),
    /// Grid edge + 1
    GrowGrid,
    /// Grid edge - 1 (never below the minimum)
    ShrinkGrid,
    SetDifficulty(Difficulty),
    CycleDifficulty,
}

impl Command {
    /// Parse an argument-free command name (case-insensitive)
    ///
    /// ```
    /// use tui_whack_types::Command;
    ///
    /// assert_eq!(Command::from_str("reset"), Some(Command::Reset));
    /// assert_eq!(Command::from_str("growGrid"), Some(Command::GrowGrid));
    /// assert_eq!(Command::from_str("click"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "reset" => Some(Command::Reset),
            "growgrid" => Some(Command::GrowGrid),
            "shrinkgrid" => Some(Command::ShrinkGrid),
            "cycledifficulty" => Some(Command::CycleDifficulty),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Reset => "reset",
            Command::Click(_) => "click",
            Command::SetGridSize(_) => "setGridSize",
            Command::GrowGrid => "growGrid",
            Command::ShrinkGrid => "shrinkGrid",
            Command::SetDifficulty(_) => "setDifficulty",
            Command::CycleDifficulty => "cycleDifficulty",
        }
    }
}

/// The two scheduled tasks that drive a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    /// One-second round countdown
    Countdown,
    /// Difficulty-paced cell expiry/activation
    Spawner,
}

impl TimerKind {
    pub const ALL: [TimerKind; 2] = [TimerKind::Countdown, TimerKind::Spawner];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerKind::Countdown => "countdown",
            TimerKind::Spawner => "spawner",
        }
    }
}

/// Countdown ticker states.
///
/// `Idle → Running` on start, `Running → Expired` when the clock hits zero,
/// and any external stop returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownPhase {
    #[default]
    Idle,
    Running,
    Expired,
}

/// How a round ended on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RoundOutcome {
    /// Countdown reached zero
    TimeUp,
    /// A cell overstayed its lifetime
    Missed { index: u16 },
}

impl RoundOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundOutcome::TimeUp => "timeUp",
            RoundOutcome::Missed { .. } => "missed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_timing_table() {
        assert_eq!(Difficulty::Easy.interval_ms(), 1000);
        assert_eq!(Difficulty::Easy.max_duration_ms(), 3000);
        assert_eq!(Difficulty::Medium.interval_ms(), 750);
        assert_eq!(Difficulty::Medium.max_duration_ms(), 2000);
        assert_eq!(Difficulty::Hard.interval_ms(), 250);
        assert_eq!(Difficulty::Hard.max_duration_ms(), 1000);
    }

    #[test]
    fn difficulty_cycle_visits_all() {
        let mut d = Difficulty::default();
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(d);
            d = d.next();
        }
        assert_eq!(d, Difficulty::Easy);
        assert_eq!(seen, Difficulty::ALL.to_vec());
    }

    #[test]
    fn difficulty_string_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
    }

    #[test]
    fn grid_bounds_are_consistent() {
        assert!(MIN_GRID_SIZE <= DEFAULT_GRID_SIZE);
        assert!(DEFAULT_GRID_SIZE <= MAX_GRID_SIZE);
        assert_eq!(MAX_CELLS, 100);
    }

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let json = serde_json::to_string(&RoundOutcome::Missed { index: 4 }).unwrap();
        assert_eq!(json, r#"{"kind":"missed","index":4}"#);
    }
}
