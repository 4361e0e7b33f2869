use crate::scene::SceneState;

/// Copy of the bird's state at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdSnapshot {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub speed: f64,
    pub alive: bool,
    pub animation_tick: u32,
}

/// Copy of one pipe's state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipeSnapshot {
    pub x: i32,
    pub height: i32,
    pub width: i32,
    pub inverted: bool,
}

impl PipeSnapshot {
    pub fn right(&self) -> i32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    pub frames: u64,
    pub rounds: u32,
    pub state: SceneState,
    pub bird: BirdSnapshot,
    /// Live pipes in spawn order.
    pub pipes: Vec<PipeSnapshot>,
}

impl SceneSnapshot {
    pub fn playable(&self) -> bool {
        self.state == SceneState::Running && self.bird.alive
    }
}
