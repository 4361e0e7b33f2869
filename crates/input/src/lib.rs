//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::InputEvent`] and runs the
//! blocking terminal reader on its own thread, feeding an unbounded channel
//! the scene loop drains.

pub mod map;
pub mod source;

pub use tui_flappy_types as types;

pub use map::{map_key_event, should_quit};
pub use source::{forward_events, spawn_terminal_input, POLL_INTERVAL};
