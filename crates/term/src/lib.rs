//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a snapshot into a
//! plain framebuffer, and the renderer flushes only what changed to the
//! terminal. No widget toolkit is involved.
//!
//! Goals:
//! - Keep `core` free of any terminal concerns
//! - Make rendering testable without a terminal (framebuffers are plain data)
//! - Share one layout between drawing and mouse hit-testing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_whack_core as core;
pub use tui_whack_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{status_text, GameView, GridLayout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
