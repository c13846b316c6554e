//! The display surface: an RGB pixel buffer the frame is composed into
//! before it is presented.

use crate::assets::Sprite;
use crate::entities::{GameState, Hero, Rect, Renderable};

#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Surface {
    /// A black surface.
    pub fn new(width: u32, height: u32) -> Surface {
        Surface {
            width,
            height,
            pixels: vec![[0, 0, 0]; width as usize * height as usize],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Copy `sprite` onto the surface with its top-left at `rect`, blending
    /// by the sprite's alpha.  Anything outside the surface is clipped.
    pub fn blit(&mut self, sprite: &Sprite, rect: Rect) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + sprite.width() as i32).min(self.width as i32);
        let y1 = (rect.y + sprite.height() as i32).min(self.height as i32);

        for y in y0..y1 {
            let sy = (y - rect.y) as u32;
            let row = y as usize * self.width as usize;
            for x in x0..x1 {
                let [r, g, b, a] = sprite.pixel((x - rect.x) as u32, sy);
                if a == 0 {
                    continue;
                }
                let dst = &mut self.pixels[row + x as usize];
                *dst = if a == 255 {
                    [r, g, b]
                } else {
                    [blend(dst[0], r, a), blend(dst[1], g, a), blend(dst[2], b, a)]
                };
            }
        }
    }

    /// Draw an entity at its rect.
    pub fn draw(&mut self, entity: &Renderable) {
        self.blit(&entity.sprite, entity.rect);
    }

    /// Draw the hero's slice overlay, if one is active.
    pub fn draw_slice(&mut self, hero: &Hero) {
        if let Some(slice) = &hero.slice {
            self.blit(&hero.slice_sprite, slice.rect);
        }
    }

    /// Compose a full frame: background, hero, slice overlay, then every
    /// enemy regardless of where it is.
    pub fn draw_frame(&mut self, state: &GameState) {
        self.draw(&state.background);
        self.draw(&state.hero.body);
        self.draw_slice(&state.hero);
        for enemy in &state.enemies {
            self.draw(&enemy.body);
        }
    }
}

fn blend(dst: u8, src: u8, alpha: u8) -> u8 {
    let a = u16::from(alpha);
    ((u16::from(src) * a + u16::from(dst) * (255 - a)) / 255) as u8
}
