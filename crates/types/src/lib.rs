//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, so they
//! can be shared by the simulation core, the terminal front end and the input
//! source.
//!
//! # Playfield
//!
//! The playfield is a fixed 800x600 unit rectangle. Model coordinates put the
//! origin at the bottom edge with `y` growing upwards; screen rectangles
//! ([`Rect`]) use the usual top-left origin.
//!
//! # Simulation Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 10 | Fixed simulation step interval |
//! | `SPAWN_INTERVAL_MS` | 1000 | One new pipe per second |
//! | `GAME_OVER_PAUSE_MS` | 2000 | Pause on the game-over indicator |
//! | `GRAVITY` | 0.1 | Units/tick² added to the bird's speed |
//! | `JUMP_SPEED` | 5.0 | Magnitude of the upward jump impulse |
//! | `SCROLL_SPEED` | 3 | Units/tick every pipe moves left |
//!
//! # Examples
//!
//! ```
//! use tui_flappy_types::{Rect, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT};
//!
//! let screen = Rect::new(0, 0, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
//! assert_eq!(screen.right(), 800);
//! ```

/// Playfield width in model units
pub const PLAYFIELD_WIDTH: i32 = 800;

/// Playfield height in model units
pub const PLAYFIELD_HEIGHT: i32 = 600;

/// Fixed timestep interval in milliseconds
pub const TICK_MS: u64 = 10;

/// Pipe spawn cadence in milliseconds
pub const SPAWN_INTERVAL_MS: u64 = 1000;

/// How long the game-over indicator stays up before the round restarts
pub const GAME_OVER_PAUSE_MS: u64 = 2000;

/// Vertical acceleration (units/tick²)
pub const GRAVITY: f64 = 0.1;

/// Jump impulse magnitude (units/tick). Applied as a negative speed.
pub const JUMP_SPEED: f64 = 5.0;

/// Horizontal distance every pipe travels per tick
pub const SCROLL_SPEED: i32 = 3;

/// Fixed horizontal lane of the bird
pub const BIRD_X: i32 = 50;

/// Bird height above the ground at the start of every round
pub const BIRD_START_Y: i32 = 300;

pub const BIRD_WIDTH: i32 = 50;
pub const BIRD_HEIGHT: i32 = 43;

/// Number of animation frames (one texture each)
pub const BIRD_FRAMES: usize = 4;

/// Ticks each animation frame stays on screen
pub const BIRD_TICKS_PER_FRAME: u32 = 10;

pub const PIPE_WIDTH: i32 = 50;

/// Inclusive lower bound of a spawned pipe's height
pub const PIPE_MIN_HEIGHT: i32 = 100;

/// Exclusive upper bound of a spawned pipe's height
pub const PIPE_MAX_HEIGHT: i32 = 400;


/// Abstract input events produced by the input source.
///
/// The scene loop consumes at most one of these per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Give the bird an upward impulse
    Jump,
    /// End the session
    Quit,
    /// Anything else (ignored by the loop)
    Other,
}

/// Axis-aligned rectangle in screen space (origin top-left, `y` grows down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// Mirroring applied when a texture is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flip {
    #[default]
    None,
    Vertical,
}

/// Opaque handle to a texture owned by the renderer collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);
