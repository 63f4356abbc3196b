//! Engine module - real-time driver for the game state
//!
//! The core crate never reads a clock. This crate supplies one: it owns a
//! [`GameState`](tui_whack_core::GameState) inside a single tokio task and
//! runs each armed timer (countdown, cell scheduler) as an independently
//! cancellable task of its own.
//!
//! - [`driver`]: the owner loop and the per-timer tasks
//! - [`runtime`]: a dedicated runtime plus channels for a sync caller

pub mod driver;
pub mod runtime;

pub use tui_whack_core as core;
pub use tui_whack_types as types;

pub use driver::{Driver, Fired, ScheduledTask};
pub use runtime::Engine;
