//! Terminal whack-a-mole (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binaries, tests and
//! benches can use `tui_whack::{core,engine,input,term,types}`.

pub use tui_whack_core as core;
pub use tui_whack_engine as engine;
pub use tui_whack_input as input;
pub use tui_whack_term as term;
pub use tui_whack_types as types;

pub mod config;
pub mod logging;
pub mod sim;
