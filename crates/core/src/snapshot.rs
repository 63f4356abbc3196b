use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{
    CountdownPhase, Difficulty, RoundOutcome, MAX_CELLS, PAST_SCORES_LIMIT, ROUND_SECONDS,
};

/// Observable copy of the game state.
///
/// Cheap to build (no heap), so the engine can publish one after every event
/// and the view can render straight from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub round_id: u32,
    pub score: u32,
    pub seconds_remaining: u32,
    pub grid_size: u8,
    pub difficulty: Difficulty,
    pub running: bool,
    pub countdown: CountdownPhase,
    /// Active cell indices, in activation order.
    pub active: ArrayVec<u16, MAX_CELLS>,
    pub last_outcome: Option<RoundOutcome>,
    /// Finished-round scores, oldest first.
    pub past_scores: ArrayVec<u32, PAST_SCORES_LIMIT>,
    pub can_start: bool,
}

impl GameSnapshot {
    pub fn is_active(&self, index: u16) -> bool {
        self.active.contains(&index)
    }

    /// Settings controls are locked while a round runs.
    pub fn settings_locked(&self) -> bool {
        self.running
    }

    pub fn total_cells(&self) -> u16 {
        (self.grid_size as u16) * (self.grid_size as u16)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            round_id: 0,
            score: 0,
            seconds_remaining: ROUND_SECONDS,
            grid_size: crate::types::DEFAULT_GRID_SIZE,
            difficulty: Difficulty::default(),
            running: false,
            countdown: CountdownPhase::Idle,
            active: ArrayVec::new(),
            last_outcome: None,
            past_scores: ArrayVec::new(),
            can_start: true,
        }
    }
}
