//! Shared rectangle primitive for the bird and the pipes.
//!
//! Entities live in model space: `x` grows to the right, `y` grows upwards
//! from the ground line.

/// Axis-aligned rectangle with a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Entity {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn half_height(&self) -> i32 {
        self.h / 2
    }

    /// Closed-interval overlap of the horizontal spans (shared edges count).
    pub const fn overlaps_x(&self, other: &Entity) -> bool {
        !(other.x > self.right() || other.right() < self.x)
    }

    /// Fully scrolled past the left edge of the playfield.
    pub const fn is_off_left(&self) -> bool {
        self.right() <= 0
    }
}
