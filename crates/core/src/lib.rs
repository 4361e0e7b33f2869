//! Core game logic - entities, the pipe spawner and the scene loop
//!
//! This crate contains all game rules and the concurrency discipline around
//! them. It does not know about terminals: drawing and texture loading go
//! through the [`Canvas`] and [`TextureLoader`] traits.
//!
//! # Module Structure
//!
//! - [`entity`]: rectangle primitive shared by the bird and the pipes
//! - [`bird`]: the player entity (gravity, jump, collision)
//! - [`pipe`]: obstacles and the [`PipeField`] with its background spawner
//! - [`scene`]: the fixed-tick loop and its `Running`/`GameOver`/`Terminating` states
//! - [`config`]: tunables with environment overrides
//! - [`render`]: collaborator traits
//! - [`snapshot`]: plain copies of entity state for painting and tests
//! - [`error`]: resource and render failures
//!
//! # Concurrency
//!
//! Three units of execution touch the entities: the spawner task, the scene
//! loop and the input source. The bird, the pipe sequence and every pipe each
//! sit behind their own reader/writer lock, always taken in the order
//! field → bird → pipe and never held across an `.await` or a draw call.
//!
//! # Example
//!
//! ```
//! use tui_flappy_core::{Bird, GameConfig, Pipe, PipeField};
//! use tui_flappy_core::types::TextureId;
//!
//! let config = GameConfig::default();
//! let bird = Bird::from_textures([TextureId(0); 4], &config);
//! let field = PipeField::detached(TextureId(1), &config);
//!
//! // A pipe reaching up to the bird's lower half.
//! field.insert(Pipe::new(60, 290, 50, false));
//! field.touch(&bird);
//! assert!(!bird.is_alive());
//!
//! bird.restart();
//! field.restart();
//! assert!(bird.is_alive());
//! assert!(field.is_empty());
//! ```
//!
//! # Timing
//!
//! - **Tick**: 10ms per simulation step
//! - **Spawn**: one pipe per second, on its own task
//! - **Game over**: 2s pause, then an automatic restart

pub mod bird;
pub mod config;
pub mod entity;
pub mod error;
pub mod pipe;
pub mod render;
pub mod scene;
pub mod snapshot;

pub use tui_flappy_types as types;

pub use bird::Bird;
pub use config::GameConfig;
pub use entity::Entity;
pub use error::{GameError, GameResult, RenderError, ResourceError};
pub use pipe::{Pipe, PipeField};
pub use render::{Canvas, TextureLoader};
pub use scene::{Scene, SceneState, SessionSummary};
pub use snapshot::{BirdSnapshot, PipeSnapshot, SceneSnapshot};
