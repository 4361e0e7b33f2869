//! The player entity.
//!
//! All state sits behind one reader/writer lock. Readers (`is_alive`,
//! `snapshot`, `paint`) take it shared; `update`, `jump`, `touch` and
//! `restart` take it exclusive. `touch` locks the bird before the pipe.

use parking_lot::RwLock;

use crate::config::GameConfig;
use crate::entity::Entity;
use crate::error::{GameError, GameResult, ResourceError};
use crate::pipe::{Pipe, PipeState};
use crate::render::{bird_frame_texture, Canvas, TextureLoader};
use crate::snapshot::BirdSnapshot;
use crate::types::{Flip, Rect, TextureId, BIRD_FRAMES, BIRD_TICKS_PER_FRAME};

#[derive(Debug, Clone, Copy, PartialEq)]
struct BirdState {
    /// `y` is the vertical center, measured up from the ground.
    body: Entity,
    /// Speed set by the last jump (0 after a restart).
    impulse: f64,
    /// Gravity steps applied since `impulse` was set.
    ticks_since_impulse: u32,
    alive: bool,
    time: u32,
}

impl BirdState {
    fn initial(config: &GameConfig) -> Self {
        Self {
            body: Entity::new(
                config.bird_x,
                config.bird_start_y,
                config.bird_width,
                config.bird_height,
            ),
            impulse: 0.0,
            ticks_since_impulse: 0,
            alive: true,
            time: 0,
        }
    }

    /// Recomputed from the step count so that `n` steps from rest give exactly `n * gravity`.
    fn speed(&self, gravity: f64) -> f64 {
        self.impulse + self.ticks_since_impulse as f64 * gravity
    }
}

pub struct Bird {
    state: RwLock<BirdState>,
    frames: [TextureId; BIRD_FRAMES],
    gravity: f64,
    jump_speed: f64,
    start_y: i32,
    field_height: i32,
}

impl Bird {
    /// Load the animation frames and create a bird at its start position.
    pub fn new<L: TextureLoader + ?Sized>(
        loader: &mut L,
        config: &GameConfig,
    ) -> Result<Self, ResourceError> {
        let mut frames = [TextureId(0); BIRD_FRAMES];
        for (i, slot) in frames.iter_mut().enumerate() {
            *slot = loader.load_texture(&bird_frame_texture(i))?;
        }
        Ok(Self::from_textures(frames, config))
    }

    /// Create a bird from already-loaded animation frames.
    pub fn from_textures(frames: [TextureId; BIRD_FRAMES], config: &GameConfig) -> Self {
        Self {
            state: RwLock::new(BirdState::initial(config)),
            frames,
            gravity: config.gravity,
            jump_speed: config.jump_speed,
            start_y: config.bird_start_y,
            field_height: config.height,
        }
    }

    /// Advance one tick: animate, fall by `floor(speed)`, die below the ground, accelerate.
    pub fn update(&self) {
        let mut s = self.state.write();
        s.time = s.time.wrapping_add(1);
        s.body.y = s.body.y.saturating_sub(s.speed(self.gravity).floor() as i32);
        if s.body.y < 0 {
            s.alive = false;
        }
        s.ticks_since_impulse = s.ticks_since_impulse.saturating_add(1);
    }

    /// Overwrite the current speed with the (negative) jump impulse.
    pub fn jump(&self) {
        let mut s = self.state.write();
        s.impulse = -self.jump_speed;
        s.ticks_since_impulse = 0;
    }

    /// Kill the bird if it overlaps `pipe`.
    pub fn touch(&self, pipe: &Pipe) {
        let mut s = self.state.write();
        let p = pipe.read();
        if collides(&s.body, &p, self.field_height) {
            s.alive = false;
        }
    }

    /// The `touch` predicate without the side effect.
    pub fn would_touch(&self, pipe: &Pipe) -> bool {
        let s = self.state.read();
        let p = pipe.read();
        collides(&s.body, &p, self.field_height)
    }

    pub fn is_alive(&self) -> bool {
        self.state.read().alive
    }

    /// Back to the start height, at rest and alive. The animation clock keeps running.
    pub fn restart(&self) {
        let mut s = self.state.write();
        s.body.y = self.start_y;
        s.impulse = 0.0;
        s.ticks_since_impulse = 0;
        s.alive = true;
    }

    pub fn snapshot(&self) -> BirdSnapshot {
        let s = *self.state.read();
        BirdSnapshot {
            x: s.body.x,
            y: s.body.y,
            w: s.body.w,
            h: s.body.h,
            speed: s.speed(self.gravity),
            alive: s.alive,
            animation_tick: s.time,
        }
    }

    /// Texture for the current animation frame.
    pub fn frame_texture(&self) -> TextureId {
        let time = self.state.read().time;
        self.frame_at(time)
    }

    fn frame_at(&self, time: u32) -> TextureId {
        self.frames[(time / BIRD_TICKS_PER_FRAME) as usize % BIRD_FRAMES]
    }

    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C) -> GameResult<()> {
        let (body, time) = {
            let s = self.state.read();
            (s.body, s.time)
        };
        let dst = Rect::new(
            body.x,
            self.field_height
                .saturating_sub(body.y)
                .saturating_sub(body.half_height()),
            body.w,
            body.h,
        );
        canvas
            .draw(self.frame_at(time), None, dst, Flip::None)
            .map_err(GameError::render("bird"))
    }
}

/// Horizontal overlap first, then the vertical test picked by orientation.
fn collides(bird: &Entity, pipe: &PipeState, field_height: i32) -> bool {
    if !bird.overlaps_x(&pipe.body) {
        return false;
    }
    if pipe.inverted {
        field_height - pipe.body.h <= bird.y.saturating_add(bird.half_height())
    } else {
        pipe.body.h >= bird.y.saturating_sub(bird.half_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAMES: [TextureId; BIRD_FRAMES] =
        [TextureId(1), TextureId(2), TextureId(3), TextureId(4)];

    fn bird() -> Bird {
        Bird::from_textures(FRAMES, &GameConfig::default())
    }

    #[test]
    fn starts_alive_at_rest() {
        let s = bird().snapshot();
        assert_eq!((s.x, s.y, s.w, s.h), (50, 300, 50, 43));
        assert_eq!(s.speed, 0.0);
        assert!(s.alive);
    }

    #[test]
    fn first_update_does_not_move() {
        let b = bird();
        b.update();
        let s = b.snapshot();
        assert_eq!(s.y, 300);
        assert_eq!(s.speed, 0.1);
        assert_eq!(s.animation_tick, 1);
    }

    #[test]
    fn jump_overrides_speed() {
        let b = bird();
        for _ in 0..40 {
            b.update();
        }
        b.jump();
        assert_eq!(b.snapshot().speed, -5.0);
        b.jump();
        assert_eq!(b.snapshot().speed, -5.0);
    }

    #[test]
    fn jump_moves_up_by_impulse() {
        let b = bird();
        b.jump();
        b.update();
        assert_eq!(b.snapshot().y, 305);
    }

    #[test]
    fn animation_frame_advances_every_ten_ticks() {
        let b = bird();
        assert_eq!(b.frame_texture(), TextureId(1));
        for _ in 0..10 {
            b.update();
        }
        assert_eq!(b.frame_texture(), TextureId(2));
        for _ in 0..30 {
            b.update();
        }
        assert_eq!(b.frame_texture(), TextureId(1));
    }

    #[test]
    fn restart_keeps_animation_clock() {
        let b = bird();
        for _ in 0..100 {
            b.update();
        }
        assert!(!b.is_alive());
        b.restart();
        let s = b.snapshot();
        assert!(s.alive);
        assert_eq!(s.y, 300);
        assert_eq!(s.speed, 0.0);
        assert_eq!(s.animation_tick, 100);
    }

    #[test]
    fn huge_gravity_saturates_instead_of_overflowing() {
        let config = GameConfig {
            gravity: 1e300,
            ..GameConfig::default()
        };
        let b = Bird::from_textures(FRAMES, &config);
        for _ in 0..1000 {
            b.update();
        }
        let s = b.snapshot();
        assert_eq!(s.y, i32::MIN);
        assert!(!s.alive);
        assert!(b.would_touch(&Pipe::new(60, 100, 50, false)));
    }

    #[test]
    fn touch_ignores_pipe_outside_lane() {
        let b = bird();
        // Would collide vertically, but sits right of the bird.
        let pipe = Pipe::new(101, 599, 50, false);
        b.touch(&pipe);
        assert!(b.is_alive());
    }

    #[test]
    fn touch_kills_on_inverted_overlap() {
        let b = bird();
        // Gap above the pipe is 600 - 279 = 321 = 300 + 21.
        let pipe = Pipe::new(60, 279, 50, true);
        b.touch(&pipe);
        assert!(!b.is_alive());
    }

    #[test]
    fn inverted_pipe_one_short_misses() {
        let b = bird();
        let pipe = Pipe::new(60, 278, 50, true);
        b.touch(&pipe);
        assert!(b.is_alive());
    }
}
