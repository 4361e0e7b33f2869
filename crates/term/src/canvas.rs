//! TerminalCanvas: the core's [`Canvas`] on top of a pixel framebuffer.
//!
//! Draw calls arrive in playfield coordinates (800x600 by default) and are
//! scaled to the current viewport. Textures are looked up in the
//! [`SpriteAtlas`] and sampled per destination pixel.

use crate::atlas::{Sprite, SpriteAtlas};
use crate::core::{Canvas, RenderError};
use crate::fb::{FrameBuffer, Rgb};
use crate::renderer::TerminalRenderer;
use crate::types::{Flip, Rect, TextureId};

/// Terminal size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Current terminal size, 80x24 when it cannot be queried.
    pub fn current() -> Self {
        crossterm::terminal::size()
            .map(|(cols, rows)| Self::new(cols, rows))
            .unwrap_or(Self::new(80, 24))
    }
}

pub struct TerminalCanvas {
    atlas: SpriteAtlas,
    renderer: TerminalRenderer,
    fb: FrameBuffer,
    playfield: (i32, i32),
    /// `None` follows the terminal size on every frame.
    fixed: Option<Viewport>,
}

impl TerminalCanvas {
    pub fn new(atlas: SpriteAtlas, renderer: TerminalRenderer, width: i32, height: i32) -> Self {
        Self {
            atlas,
            renderer,
            fb: FrameBuffer::new(0, 0),
            playfield: (width.max(1), height.max(1)),
            fixed: None,
        }
    }

    /// Pin the viewport instead of querying the terminal.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.fixed = Some(viewport);
        self
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer {
        &mut self.renderer
    }

    /// The frame being painted. After `present` this is the previous frame.
    pub fn pixels(&self) -> &FrameBuffer {
        &self.fb
    }

    fn blit(&mut self, sprite: Sprite, src: Option<Rect>, dst: Rect, flip: Flip) {
        if dst.is_empty() {
            return;
        }
        let (fw, fh) = self.playfield;
        let (pw, ph) = (self.fb.width() as i32, self.fb.height() as i32);
        let x0 = scale(dst.x, fw, pw);
        let x1 = scale(dst.right(), fw, pw);
        let y0 = scale(dst.y, fh, ph);
        let y1 = scale(dst.bottom(), fh, ph);
        if x1 <= x0 || y1 <= y0 {
            return;
        }

        let (tw, th) = sprite.size();
        let src = src.unwrap_or(Rect::new(0, 0, tw, th));
        let (dw, dh) = ((x1 - x0) as f32, (y1 - y0) as f32);

        for py in y0.max(0)..y1.min(ph) {
            let mut v = ((py - y0) as f32 + 0.5) / dh;
            if flip == Flip::Vertical {
                v = 1.0 - v;
            }
            let tv = (src.y as f32 + v * src.h as f32) / th as f32;
            for px in x0.max(0)..x1.min(pw) {
                let u = ((px - x0) as f32 + 0.5) / dw;
                let tu = (src.x as f32 + u * src.w as f32) / tw as f32;
                if let Some(c) = sprite.sample(tu, tv) {
                    self.fb.set(px, py, c);
                }
            }
        }
    }
}

/// Map a playfield coordinate onto `to` pixels.
fn scale(v: i32, from: i32, to: i32) -> i32 {
    (v as i64 * to as i64).div_euclid(from as i64) as i32
}

impl Canvas for TerminalCanvas {
    fn clear(&mut self) -> Result<(), RenderError> {
        let viewport = self.fixed.unwrap_or_else(Viewport::current);
        self.fb.resize(viewport.cols, viewport.rows.saturating_mul(2));
        self.fb.fill(Rgb::BLACK);
        Ok(())
    }

    fn draw(
        &mut self,
        texture: TextureId,
        src: Option<Rect>,
        dst: Rect,
        flip: Flip,
    ) -> Result<(), RenderError> {
        let sprite = self
            .atlas
            .get(texture)
            .ok_or_else(|| RenderError::new(format!("unknown texture {}", texture.0)))?;
        self.blit(sprite, src, dst, flip);
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.renderer
            .draw_swap(&mut self.fb)
            .map_err(|err| RenderError::new(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{BACKGROUND_TEXTURE, PIPE_TEXTURE};
    use crate::core::TextureLoader;
    use std::io;

    fn canvas() -> (TerminalCanvas, TextureId, TextureId) {
        let mut atlas = SpriteAtlas::new();
        let background = atlas.load_texture(BACKGROUND_TEXTURE).unwrap();
        let pipe = atlas.load_texture(PIPE_TEXTURE).unwrap();
        let renderer = TerminalRenderer::with_output(Box::new(io::sink()));
        let canvas = TerminalCanvas::new(atlas, renderer, 800, 600).with_viewport(Viewport::new(80, 30));
        (canvas, background, pipe)
    }

    #[test]
    fn clear_sizes_to_viewport() {
        let (mut canvas, _, _) = canvas();
        canvas.clear().unwrap();
        assert_eq!((canvas.pixels().width(), canvas.pixels().height()), (80, 60));
    }

    #[test]
    fn draw_scales_playfield_to_pixels() {
        let (mut canvas, background, _) = canvas();
        canvas.clear().unwrap();
        canvas
            .draw(background, None, Rect::new(0, 0, 400, 300), Flip::None)
            .unwrap();

        let fb = canvas.pixels();
        assert_ne!(fb.get(39, 29), Some(Rgb::BLACK));
        assert_eq!(fb.get(40, 29), Some(Rgb::BLACK));
        assert_eq!(fb.get(39, 30), Some(Rgb::BLACK));
    }

    #[test]
    fn vertical_flip_mirrors_rows() {
        let dst = Rect::new(0, 0, 50, 300);

        let (mut plain, _, pipe) = canvas();
        plain.clear().unwrap();
        plain.draw(pipe, None, dst, Flip::None).unwrap();

        let (mut flipped, _, pipe) = canvas();
        flipped.clear().unwrap();
        flipped.draw(pipe, None, dst, Flip::Vertical).unwrap();

        // 300 playfield units are 30 pixel rows.
        assert_eq!(plain.pixels().get(2, 0), flipped.pixels().get(2, 29));
        assert_eq!(plain.pixels().get(2, 29), flipped.pixels().get(2, 0));
        assert_ne!(plain.pixels().get(2, 0), plain.pixels().get(2, 29));
    }

    #[test]
    fn source_rect_selects_part_of_texture() {
        let (mut canvas, _, pipe) = canvas();
        canvas.clear().unwrap();
        // Only the shaft: no cap at the top of the destination.
        canvas
            .draw(pipe, Some(Rect::new(0, 200, 50, 200)), Rect::new(0, 0, 50, 300), Flip::None)
            .unwrap();
        assert_eq!(canvas.pixels().get(2, 0), canvas.pixels().get(2, 15));
    }

    #[test]
    fn unknown_texture_is_a_render_error() {
        let (mut canvas, _, _) = canvas();
        canvas.clear().unwrap();
        let err = canvas
            .draw(TextureId(99), None, Rect::new(0, 0, 10, 10), Flip::None)
            .unwrap_err();
        assert!(err.reason.contains("99"));
    }
}
