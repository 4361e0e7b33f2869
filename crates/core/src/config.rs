//! Tunable game constants.
//!
//! Defaults come from `tui_flappy_types`; every value can be overridden from
//! the environment (see [`GameConfig::from_env`]).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::types::*;

/// All tunables of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub tick: Duration,
    pub spawn_interval: Duration,
    pub game_over_pause: Duration,
    pub gravity: f64,
    /// Magnitude of the jump impulse; the bird's speed becomes `-jump_speed`.
    pub jump_speed: f64,
    pub scroll_speed: i32,
    pub bird_x: i32,
    pub bird_start_y: i32,
    pub bird_width: i32,
    pub bird_height: i32,
    pub pipe_width: i32,
    pub pipe_min_height: i32,
    pub pipe_max_height: i32,
    /// Seed for pipe generation. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            tick: Duration::from_millis(TICK_MS),
            spawn_interval: Duration::from_millis(SPAWN_INTERVAL_MS),
            game_over_pause: Duration::from_millis(GAME_OVER_PAUSE_MS),
            gravity: GRAVITY,
            jump_speed: JUMP_SPEED,
            scroll_speed: SCROLL_SPEED,
            bird_x: BIRD_X,
            bird_start_y: BIRD_START_Y,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            pipe_width: PIPE_WIDTH,
            pipe_min_height: PIPE_MIN_HEIGHT,
            pipe_max_height: PIPE_MAX_HEIGHT,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables.
    ///
    /// - `FLAPPY_TICK_MS`, `FLAPPY_SPAWN_MS`, `FLAPPY_PAUSE_MS`: timings
    /// - `FLAPPY_GRAVITY`, `FLAPPY_JUMP_SPEED`, `FLAPPY_SCROLL_SPEED`: physics
    /// - `FLAPPY_SEED`: fixed pipe sequence
    ///
    /// Missing or unparseable values keep their defaults, as do gravity and
    /// jump speeds that are not finite and positive. Scroll speed is at
    /// least 1 so pipes always leave the screen.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let tick_ms = env_or("FLAPPY_TICK_MS", TICK_MS).max(1);
        let spawn_ms = env_or("FLAPPY_SPAWN_MS", SPAWN_INTERVAL_MS).max(1);
        let pause_ms = env_or("FLAPPY_PAUSE_MS", GAME_OVER_PAUSE_MS);

        Self {
            tick: Duration::from_millis(tick_ms),
            spawn_interval: Duration::from_millis(spawn_ms),
            game_over_pause: Duration::from_millis(pause_ms),
            gravity: positive_or("FLAPPY_GRAVITY", defaults.gravity),
            jump_speed: positive_or("FLAPPY_JUMP_SPEED", defaults.jump_speed),
            scroll_speed: env_or("FLAPPY_SCROLL_SPEED", defaults.scroll_speed).max(1),
            seed: env::var("FLAPPY_SEED").ok().and_then(|s| s.trim().parse().ok()),
            ..defaults
        }
    }

    /// Same config with a fixed pipe seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn positive_or(key: &str, default: f64) -> f64 {
    Some(env_or(key, default))
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}
