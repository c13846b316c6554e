//! All game entity types — plain data, no behaviour beyond geometry.

use std::rc::Rc;

use crate::assets::Sprite;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in surface pixels.  `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Midpoint of the right edge.
    pub fn mid_right(&self) -> (i32, i32) {
        (self.right(), self.y + self.h / 2)
    }

    /// A `w`×`h` rect whose top-edge midpoint sits on `point`.
    pub fn with_mid_top(point: (i32, i32), w: i32, h: i32) -> Rect {
        Rect::new(point.0 - w / 2, point.1, w, h)
    }

    pub fn top_left(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

// ── Renderable ────────────────────────────────────────────────────────────────

/// A sprite placed on the surface.  Width and height follow the sprite.
#[derive(Clone, Debug)]
pub struct Renderable {
    pub sprite: Rc<Sprite>,
    pub rect: Rect,
}

impl Renderable {
    pub fn new(sprite: Rc<Sprite>, position: (i32, i32)) -> Renderable {
        let rect = Rect::new(
            position.0,
            position.1,
            sprite.width() as i32,
            sprite.height() as i32,
        );
        Renderable { sprite, rect }
    }
}

// ── Hero & enemy ──────────────────────────────────────────────────────────────

/// An active slice overlay.  The rect is fixed where the slice started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slice {
    pub rect: Rect,
    /// Elapsed-ms timestamp at which the overlay disappears.
    pub until_ms: u64,
}

#[derive(Clone, Debug)]
pub struct Hero {
    pub body: Renderable,
    /// Pixels per frame while strafing.
    pub speed: i32,
    /// Initial upward velocity of a jump.
    pub jump_height: i32,
    pub gravity: i32,
    pub is_jumping: bool,
    /// Positive moves up the screen.
    pub jump_velocity: i32,
    pub health: i32,
    pub damage_min: i32,
    pub damage_max: i32,
    pub slice_sprite: Rc<Sprite>,
    pub slice: Option<Slice>,
}

impl Hero {
    pub fn new(sprite: Rc<Sprite>, slice_sprite: Rc<Sprite>, position: (i32, i32)) -> Hero {
        Hero {
            body: Renderable::new(sprite, position),
            speed: 5,
            jump_height: 10,
            gravity: 1,
            is_jumping: false,
            jump_velocity: 10,
            health: 80,
            damage_min: 40,
            damage_max: 75,
            slice_sprite,
            slice: None,
        }
    }

    pub fn slice_active(&self) -> bool {
        self.slice.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Renderable,
    pub health: i32,
    pub damage: i32,
}

impl Enemy {
    pub fn new(sprite: Rc<Sprite>, position: (i32, i32)) -> Enemy {
        Enemy {
            body: Renderable::new(sprite, position),
            health: 120,
            damage: 65,
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuitReason {
    /// Close control used.
    Closed,
    /// Escape held past the hold threshold.
    EscapeHeld,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Quit(QuitReason),
}

/// The entire session state.  Cloneable so the update functions can return
/// a new copy without mutating the original; sprites are shared handles.
#[derive(Clone, Debug)]
pub struct GameState {
    pub hero: Hero,
    pub enemies: Vec<Enemy>,
    pub background: Renderable,
    /// When Escape was first seen held, in ms since start.  `None` while
    /// Escape is up.
    pub esc_pressed_at: Option<u64>,
    pub esc_hold_ms: u64,
    pub slice_display_ms: u64,
    pub fullscreen: bool,
    /// Current surface size in pixels.
    pub width: u32,
    pub height: u32,
    /// Size to return to when leaving fullscreen.
    pub window_size: (u32, u32),
    pub status: SessionStatus,
    pub frame: u64,
}
