//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s or cursor
//! moves, and keeps the keyboard cursor used to whack cells without a mouse.
//! Mouse clicks are resolved by the terminal view, which knows the layout.

pub mod cursor;
pub mod map;

pub use tui_whack_types as types;

pub use cursor::{Cursor, CursorMove};
pub use map::{handle_key_event, should_quit, KeyAction};
