//! Every tunable the session needs, gathered into one explicit context value.
//!
//! `main` builds a `Config` once and hands it to `init_state`; nothing else
//! reads constants from global state.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Logical surface size in windowed mode.
    pub window_width: u32,
    pub window_height: u32,
    pub fps: u32,
    /// How long the slice overlay stays up after activation.
    pub slice_display_ms: u64,
    /// Escape must be held this long before the game quits.
    pub esc_hold_ms: u64,
    pub asset_dir: PathBuf,
    pub hero_spawn: (i32, i32),
    pub enemy_spawns: Vec<(i32, i32)>,
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_width: 800,
            window_height: 600,
            fps: 60,
            slice_display_ms: 100,
            esc_hold_ms: 2000,
            asset_dir: PathBuf::from("assets"),
            hero_spawn: (0, 300),
            enemy_spawns: vec![(500, 100)],
            title: "Soul Smasher".to_string(),
        }
    }
}

impl Config {
    /// Target duration of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)))
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
