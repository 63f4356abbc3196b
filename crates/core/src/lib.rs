//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole rule set of the game: the round lifecycle,
//! the one-second countdown, the difficulty-paced cell scheduler, and click
//! scoring. It does no I/O and never reads a clock; every time-dependent
//! operation takes `now_ms` from its caller, which makes it:
//!
//! - **Deterministic**: Same seed and same inputs produce the same round
//! - **Testable**: Rounds can be played under a virtual clock
//! - **Portable**: The async engine, the terminal game, and the headless
//!   simulator all drive the same state machine
//!
//! # Module Structure
//!
//! - [`cells`]: Active cell set (unique by index, fixed capacity)
//! - [`game_state`]: Round lifecycle, countdown, scheduler, clicks
//! - [`rng`]: Seeded uniform choice of a free cell
//! - [`settings`]: Grid size / difficulty normalization
//! - [`snapshot`]: Serializable view of the state
//! - [`timer`]: Periodic timers with cancellation handles
//!
//! # Rules
//!
//! - **Start** resets score to 0 and the clock to 60s, then arms both timers
//! - **Countdown** ticks every second; at 0 the round ends (time up)
//! - **Scheduler** ticks on the difficulty interval, first at the start
//!   instant: any cell whose age reached the difficulty's lifetime ends the
//!   round (miss); otherwise one new cell appears on a random free index
//! - **Click** on an active cell scores 1 and removes it
//!
//! # Example
//!
//! ```
//! use tui_whack_core::{GameState, Settings};
//! use tui_whack_types::Difficulty;
//!
//! let mut game = GameState::with_settings(Settings::new(3, Difficulty::Easy), 42);
//! assert!(game.start(0));
//!
//! // The scheduler's first tick lands on the start instant.
//! game.advance_to(0);
//! let idx = game.active_cells().iter().next().unwrap().index;
//! assert!(game.click(idx));
//! assert_eq!(game.score(), 1);
//!
//! // Nobody clicks for a while: the next cell overstays and the round ends.
//! game.advance_to(5000);
//! assert!(!game.running());
//! ```
//!
//! # Timing
//!
//! The state never sleeps. Drivers either call
//! [`GameState::advance_to`](game_state::GameState::advance_to) with a
//! virtual clock, or schedule real timers from
//! [`GameState::timer_spec`](game_state::GameState::timer_spec) and deliver
//! fires through [`GameState::fire`](game_state::GameState::fire).

pub mod cells;
pub mod game_state;
pub mod rng;
pub mod settings;
pub mod snapshot;
pub mod timer;

pub use tui_whack_types as types;

// Re-export commonly used types for convenience
pub use cells::{ActiveCell, ActiveCells};
pub use game_state::GameState;
pub use rng::CellPicker;
pub use settings::{clamp_grid_size, parse_grid_size, Settings};
pub use snapshot::GameSnapshot;
pub use timer::{HandleAllocator, PeriodicTimer, TimerHandle, TimerSpec};
