//! Static images, decoded once at startup.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;

use crate::config::Config;
use crate::error::{GameError, Result};

/// A decoded RGBA image.  Entities share sprites through `Rc` handles.
pub struct Sprite {
    pixels: RgbaImage,
}

impl Sprite {
    pub fn load(path: &Path) -> Result<Sprite> {
        let pixels = image::open(path)
            .map_err(|source| GameError::Asset {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        log::info!(
            "Loaded '{}' ({}x{})",
            path.display(),
            pixels.width(),
            pixels.height()
        );
        Ok(Sprite { pixels })
    }

    pub fn from_rgba(pixels: RgbaImage) -> Sprite {
        Sprite { pixels }
    }

    /// A sprite of one flat colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Sprite {
        Sprite {
            pixels: RgbaImage::from_pixel(width, height, image::Rgba(rgba)),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sprite({}x{})", self.width(), self.height())
    }
}

/// The four images the game needs.
#[derive(Clone, Debug)]
pub struct Assets {
    pub background: Rc<Sprite>,
    pub hero: Rc<Sprite>,
    pub enemy: Rc<Sprite>,
    pub slice: Rc<Sprite>,
}

impl Assets {
    /// Load every sprite from `config.asset_dir`.  A missing or undecodable
    /// file aborts startup.
    pub fn load(config: &Config) -> Result<Assets> {
        let path = |name: &str| -> PathBuf { config.asset_dir.join(name) };
        Ok(Assets {
            background: Rc::new(Sprite::load(&path("bg.png"))?),
            hero: Rc::new(Sprite::load(&path("hero.png"))?),
            enemy: Rc::new(Sprite::load(&path("enemy.png"))?),
            slice: Rc::new(Sprite::load(&path("slice.png"))?),
        })
    }
}
