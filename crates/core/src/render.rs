//! Collaborator boundary: drawing and texture loading.
//!
//! The core never talks to a window or terminal directly. Paint passes go
//! through [`Canvas`]; textures are obtained once at construction through
//! [`TextureLoader`].

use crate::error::{RenderError, ResourceError};
use crate::types::{Flip, Rect, TextureId};

pub const BACKGROUND_TEXTURE: &str = "img/background.png";
pub const PIPE_TEXTURE: &str = "img/pipe.png";
pub const GAME_OVER_TEXTURE: &str = "img/game-over.png";

/// Path of bird animation frame `index` (0-based).
pub fn bird_frame_texture(index: usize) -> String {
    format!("img/frame-{}.png", index + 1)
}

/// Renderer collaborator.
pub trait Canvas {
    fn clear(&mut self) -> Result<(), RenderError>;

    /// Copy `src` (whole texture when `None`) of `texture` into `dst`.
    fn draw(
        &mut self,
        texture: TextureId,
        src: Option<Rect>,
        dst: Rect,
        flip: Flip,
    ) -> Result<(), RenderError>;

    fn present(&mut self) -> Result<(), RenderError>;
}

/// Resource loader collaborator.
pub trait TextureLoader {
    fn load_texture(&mut self, path: &str) -> Result<TextureId, ResourceError>;
}
