//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the scene paints into a pixel
//! framebuffer through [`TerminalCanvas`], and [`TerminalRenderer`] flushes
//! it to the terminal two pixels per cell.
//!
//! - [`fb`]: the pixel framebuffer
//! - [`atlas`]: procedural sprites standing in for image files
//! - [`canvas`]: playfield-to-pixel scaling, texture sampling and flips
//! - [`renderer`]: full and diff encoding of frames

pub mod atlas;
pub mod canvas;
pub mod fb;
pub mod renderer;

pub use tui_flappy_core as core;
pub use tui_flappy_types as types;

pub use atlas::{Sprite, SpriteAtlas};
pub use canvas::{TerminalCanvas, Viewport};
pub use fb::{CellPair, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
