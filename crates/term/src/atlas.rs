//! Sprite atlas: the terminal's texture loader.
//!
//! A terminal has no image decoder, so every known texture path maps to a
//! procedural [`Sprite`] that is sampled per pixel when drawn. Unknown paths
//! fail to load like a missing file would.

use crate::core::render::{BACKGROUND_TEXTURE, GAME_OVER_TEXTURE, PIPE_TEXTURE};
use crate::core::{ResourceError, TextureLoader};
use crate::fb::Rgb;
use crate::types::{TextureId, BIRD_FRAMES};

const SKY_TOP: Rgb = Rgb::new(78, 192, 202);
const SKY_BOTTOM: Rgb = Rgb::new(170, 225, 235);
const GRASS: Rgb = Rgb::new(115, 191, 46);
const DIRT: Rgb = Rgb::new(222, 216, 149);
const DIRT_DARK: Rgb = Rgb::new(196, 180, 110);

const BIRD_BODY: Rgb = Rgb::new(248, 200, 40);
const BIRD_LIGHT: Rgb = Rgb::new(252, 228, 120);
const BIRD_WING: Rgb = Rgb::new(240, 240, 220);
const BIRD_BEAK: Rgb = Rgb::new(240, 100, 30);
const EYE_WHITE: Rgb = Rgb::new(255, 255, 255);
const PUPIL: Rgb = Rgb::new(20, 20, 20);

const PIPE_LIGHT: Rgb = Rgb::new(156, 230, 89);
const PIPE_DARK: Rgb = Rgb::new(62, 128, 30);
const PIPE_RIM: Rgb = Rgb::new(40, 90, 20);

const PANEL: Rgb = Rgb::new(222, 216, 149);
const PANEL_BORDER: Rgb = Rgb::new(84, 56, 71);
const TEXT: Rgb = Rgb::new(232, 97, 1);

/// Share of the background height that is sky.
const GROUND_START: f32 = 0.96;

/// Wing center (v) per animation frame.
const WING_V: [f32; BIRD_FRAMES] = [0.5, 0.6, 0.7, 0.6];

/// 3x5 glyphs for the game-over banner, row-major.
const GLYPH_W: usize = 3;
const GLYPH_H: usize = 5;
const BANNER: &str = "GAME OVER";

fn glyph(ch: char) -> [u8; GLYPH_W * GLYPH_H] {
    match ch {
        'G' => [1, 1, 1, 1, 0, 0, 1, 0, 1, 1, 0, 1, 1, 1, 1],
        'A' => [0, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1],
        'M' => [1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1],
        'E' => [1, 1, 1, 1, 0, 0, 1, 1, 0, 1, 0, 0, 1, 1, 1],
        'O' => [1, 1, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 1, 1],
        'V' => [1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 0, 1, 0],
        'R' => [1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
        _ => [0; GLYPH_W * GLYPH_H],
    }
}

/// A procedural texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Bird { frame: usize },
    Pipe,
    GameOver,
}

impl Sprite {
    /// The sprite a texture path names, if any.
    pub fn for_path(path: &str) -> Option<Sprite> {
        match path {
            BACKGROUND_TEXTURE => Some(Sprite::Background),
            PIPE_TEXTURE => Some(Sprite::Pipe),
            GAME_OVER_TEXTURE => Some(Sprite::GameOver),
            _ => path
                .strip_prefix("img/frame-")
                .and_then(|rest| rest.strip_suffix(".png"))
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| (1..=BIRD_FRAMES).contains(n))
                .map(|n| Sprite::Bird { frame: n - 1 }),
        }
    }

    /// Nominal size in texels; source rectangles are relative to it.
    pub fn size(&self) -> (i32, i32) {
        match self {
            Sprite::Background => (800, 600),
            Sprite::Bird { .. } => (50, 43),
            Sprite::Pipe => (50, 400),
            Sprite::GameOver => (400, 200),
        }
    }

    /// Color at normalized texture coordinates (`u` right, `v` down, both in
    /// [0, 1]). `None` is transparent.
    pub fn sample(&self, u: f32, v: f32) -> Option<Rgb> {
        match *self {
            Sprite::Background => Some(background(u, v)),
            Sprite::Bird { frame } => bird(frame, u, v),
            Sprite::Pipe => Some(pipe(u, v)),
            Sprite::GameOver => Some(game_over(u, v)),
        }
    }
}

fn background(u: f32, v: f32) -> Rgb {
    if v < GROUND_START {
        return Rgb::lerp(SKY_TOP, SKY_BOTTOM, v / GROUND_START);
    }
    if v < GROUND_START + 0.01 {
        return GRASS;
    }
    let stripe = (u * 80.0) as i32 + (v * 120.0) as i32;
    if stripe % 4 < 2 {
        DIRT
    } else {
        DIRT_DARK
    }
}

fn in_ellipse(u: f32, v: f32, cu: f32, cv: f32, ru: f32, rv: f32) -> bool {
    let du = (u - cu) / ru;
    let dv = (v - cv) / rv;
    du * du + dv * dv <= 1.0
}

fn bird(frame: usize, u: f32, v: f32) -> Option<Rgb> {
    if in_ellipse(u, v, 0.72, 0.36, 0.05, 0.07) {
        return Some(PUPIL);
    }
    if in_ellipse(u, v, 0.68, 0.36, 0.12, 0.14) {
        return Some(EYE_WHITE);
    }
    if u >= 0.78 && (0.48..0.64).contains(&v) {
        return Some(BIRD_BEAK);
    }
    let wing_v = WING_V[frame % BIRD_FRAMES];
    if in_ellipse(u, v, 0.32, wing_v, 0.2, 0.12) {
        return Some(BIRD_WING);
    }
    if in_ellipse(u, v, 0.45, 0.55, 0.42, 0.42) {
        return Some(if v < 0.35 { BIRD_LIGHT } else { BIRD_BODY });
    }
    None
}

/// Horizontal shading: lit from the left.
fn pipe_shade(u: f32) -> Rgb {
    if u < 0.06 || u > 0.94 {
        return PIPE_RIM;
    }
    let t = ((u - 0.3).abs() / 0.7).min(1.0);
    Rgb::lerp(PIPE_LIGHT, PIPE_DARK, t)
}

fn pipe(u: f32, v: f32) -> Rgb {
    // Cap at the open end (top of the texture).
    if v < 0.08 {
        if v < 0.01 || v > 0.07 {
            return PIPE_RIM;
        }
        return Rgb::lerp(pipe_shade(u), PIPE_LIGHT, 0.35);
    }
    // The shaft is narrower than the cap.
    if u < 0.04 || u > 0.96 {
        return PIPE_RIM;
    }
    pipe_shade((u - 0.04) / 0.92)
}

fn game_over(u: f32, v: f32) -> Rgb {
    if u < 0.03 || u > 0.97 || v < 0.06 || v > 0.94 {
        return PANEL_BORDER;
    }

    let chars = BANNER.chars().count();
    let cols = chars * (GLYPH_W + 1) - 1;
    let (left, right, top, bottom) = (0.1, 0.9, 0.3, 0.7);
    if u < left || u >= right || v < top || v >= bottom {
        return PANEL;
    }

    let gx = ((u - left) / (right - left) * cols as f32) as usize;
    let gy = ((v - top) / (bottom - top) * GLYPH_H as f32) as usize;
    let (index, col) = (gx / (GLYPH_W + 1), gx % (GLYPH_W + 1));
    if col == GLYPH_W || gy >= GLYPH_H {
        return PANEL;
    }
    let lit = BANNER
        .chars()
        .nth(index)
        .map(|ch| glyph(ch)[gy * GLYPH_W + col] == 1)
        .unwrap_or(false);
    if lit {
        TEXT
    } else {
        PANEL
    }
}

/// Registry of loaded sprites, indexed by [`TextureId`].
#[derive(Debug, Clone, Default)]
pub struct SpriteAtlas {
    sprites: Vec<Sprite>,
}

impl SpriteAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TextureId) -> Option<Sprite> {
        self.sprites.get(id.0 as usize).copied()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl TextureLoader for SpriteAtlas {
    fn load_texture(&mut self, path: &str) -> Result<TextureId, ResourceError> {
        let sprite = Sprite::for_path(path).ok_or_else(|| ResourceError::new(path, "no such sprite"))?;
        let id = TextureId(self.sprites.len() as u32);
        self.sprites.push(sprite);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::bird_frame_texture;

    #[test]
    fn every_game_texture_loads() {
        let mut atlas = SpriteAtlas::new();
        for path in [BACKGROUND_TEXTURE, PIPE_TEXTURE, GAME_OVER_TEXTURE] {
            atlas.load_texture(path).unwrap();
        }
        for i in 0..BIRD_FRAMES {
            let id = atlas.load_texture(&bird_frame_texture(i)).unwrap();
            assert_eq!(atlas.get(id), Some(Sprite::Bird { frame: i }));
        }
        assert_eq!(atlas.len(), 3 + BIRD_FRAMES);
    }

    #[test]
    fn unknown_paths_fail() {
        let mut atlas = SpriteAtlas::new();
        for path in ["img/frame-0.png", "img/frame-5.png", "img/bird.png", ""] {
            let err = atlas.load_texture(path).unwrap_err();
            assert_eq!(err.path, path);
        }
        assert!(atlas.is_empty());
    }

    #[test]
    fn bird_frames_differ_and_corners_are_transparent() {
        let frames: Vec<_> = (0..BIRD_FRAMES).map(|frame| Sprite::Bird { frame }).collect();
        assert_eq!(frames[0].sample(0.0, 0.0), None);
        assert_ne!(frames[0].sample(0.32, 0.5), frames[2].sample(0.32, 0.5));
        assert!(frames[0].sample(0.45, 0.8).is_some());
    }

    #[test]
    fn pipe_cap_differs_from_shaft() {
        assert_ne!(Sprite::Pipe.sample(0.5, 0.04), Sprite::Pipe.sample(0.5, 0.5));
        assert_eq!(Sprite::Pipe.sample(0.0, 0.5), Some(PIPE_RIM));
    }

    #[test]
    fn banner_spells_text() {
        // Top-left texel of the first glyph is lit ('G').
        assert_eq!(game_over(0.101, 0.301), TEXT);
        assert_eq!(game_over(0.5, 0.15), PANEL);
        assert_eq!(game_over(0.01, 0.5), PANEL_BORDER);
    }
}
