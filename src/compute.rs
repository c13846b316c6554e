//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current state
//! (and, where needed, the current time and an RNG handle) and returns a
//! brand-new value.  Side effects are limited to the injected RNG and log
//! records.

use rand::Rng;

use crate::assets::Assets;
use crate::config::Config;
use crate::entities::{
    Enemy, GameState, Hero, QuitReason, Rect, Renderable, SessionStatus, Slice,
};
use crate::input::{GameEvent, Keys};

/// Health lost when the Down-key hazard fires.
const DOWN_PENALTY: i32 = 65;

/// Rolls at or above this value trigger the Down-key hazard (p = 0.2).
const DOWN_HAZARD_THRESHOLD: f64 = 0.8;

/// Pixels an enemy closes per axis per frame.
const ENEMY_STEP: i32 = 2;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session from the startup context.
pub fn init_state(config: &Config, assets: &Assets) -> GameState {
    let (width, height) = config.window_size();
    GameState {
        hero: Hero::new(assets.hero.clone(), assets.slice.clone(), config.hero_spawn),
        enemies: config
            .enemy_spawns
            .iter()
            .map(|&pos| Enemy::new(assets.enemy.clone(), pos))
            .collect(),
        background: Renderable::new(assets.background.clone(), (0, 0)),
        esc_pressed_at: None,
        esc_hold_ms: config.esc_hold_ms,
        slice_display_ms: config.slice_display_ms,
        fullscreen: false,
        width,
        height,
        window_size: (width, height),
        status: SessionStatus::Running,
        frame: 0,
    }
}

// ── Hero ─────────────────────────────────────────────────────────────────────

/// Apply one frame of held keys to the hero.  Each key is handled on its own,
/// so opposing directions cancel out and Down rolls its hazard every frame it
/// is held.
pub fn hero_move(
    hero: &Hero,
    keys: &Keys,
    now_ms: u64,
    slice_ms: u64,
    rng: &mut impl Rng,
) -> Hero {
    let mut next = hero.clone();

    if keys.left {
        next.body.rect.x -= next.speed;
    }
    if keys.right {
        next.body.rect.x += next.speed;
    }
    if keys.up && !next.is_jumping {
        next.is_jumping = true;
        next.jump_velocity = next.jump_height;
    }
    if keys.down && rng.gen::<f64>() >= DOWN_HAZARD_THRESHOLD {
        next.health -= DOWN_PENALTY;
        log::debug!("Hero lost {} health, now {}", DOWN_PENALTY, next.health);
    }
    if keys.slice && next.slice.is_none() {
        let rect = Rect::with_mid_top(
            next.body.rect.mid_right(),
            next.slice_sprite.width() as i32,
            next.slice_sprite.height() as i32,
        );
        next.slice = Some(Slice {
            rect,
            until_ms: now_ms + slice_ms,
        });
        log::trace!("Slice at ({}, {}) until {}ms", rect.x, rect.y, now_ms + slice_ms);
    }

    next
}

/// Advance jump physics by one frame.  A no-op while grounded.
pub fn update_jump(hero: &Hero) -> Hero {
    let mut next = hero.clone();
    if next.is_jumping {
        next.body.rect.y -= next.jump_velocity;
        next.jump_velocity -= next.gravity;
        if next.jump_velocity < -next.jump_height {
            next.is_jumping = false;
            next.jump_velocity = next.jump_height;
        }
    }
    next
}

/// Drop the slice overlay once its deadline has passed.
pub fn expire_slice(hero: &Hero, now_ms: u64) -> Hero {
    match hero.slice {
        Some(slice) if now_ms >= slice.until_ms => {
            log::trace!("Slice expired at {}ms", now_ms);
            Hero {
                slice: None,
                ..hero.clone()
            }
        }
        _ => hero.clone(),
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

/// One pursuit step: each axis independently moves `ENEMY_STEP` toward the
/// target, or stays put when already aligned.
pub fn enemy_move_towards(enemy: &Enemy, target: (i32, i32)) -> Enemy {
    let mut next = enemy.clone();
    let rect = &mut next.body.rect;
    rect.x += ENEMY_STEP * (target.0 - rect.x).signum();
    rect.y += ENEMY_STEP * (target.1 - rect.y).signum();
    next
}

/// Whether `rect`'s top-left corner lies in `[0, width] × [0, height]`.
/// Only the corner is tested, not the whole rect.
pub fn top_left_on_screen(rect: &Rect, width: u32, height: u32) -> bool {
    let (x, y) = (i64::from(rect.x), i64::from(rect.y));
    (0..=i64::from(width)).contains(&x) && (0..=i64::from(height)).contains(&y)
}

// ── Session ──────────────────────────────────────────────────────────────────

/// Flip between the windowed size and `native`.
pub fn toggle_fullscreen(state: &GameState, native: (u32, u32)) -> GameState {
    let fullscreen = !state.fullscreen;
    let (width, height) = if fullscreen { native } else { state.window_size };
    log::debug!(
        "{} at {}x{}",
        if fullscreen { "Fullscreen" } else { "Windowed" },
        width,
        height
    );
    GameState {
        fullscreen,
        width,
        height,
        ..state.clone()
    }
}

/// React to one discrete event drained from the queue.
pub fn handle_event(state: &GameState, event: &GameEvent) -> GameState {
    match event {
        GameEvent::Quit => {
            log::debug!("Close requested");
            GameState {
                status: SessionStatus::Quit(QuitReason::Closed),
                ..state.clone()
            }
        }
        GameEvent::ToggleFullscreen { native } => toggle_fullscreen(state, *native),
    }
}

/// Track how long Escape has been held and quit once the hold threshold is
/// reached.  The start time is recorded once per hold and cleared on release.
pub fn update_quit_hold(state: &GameState, escape_held: bool, now_ms: u64) -> GameState {
    if !escape_held {
        return GameState {
            esc_pressed_at: None,
            ..state.clone()
        };
    }
    match state.esc_pressed_at {
        None => GameState {
            esc_pressed_at: Some(now_ms),
            ..state.clone()
        },
        Some(since) if now_ms.saturating_sub(since) >= state.esc_hold_ms => {
            log::debug!("Escape held for {}ms", now_ms - since);
            GameState {
                status: SessionStatus::Quit(QuitReason::EscapeHeld),
                ..state.clone()
            }
        }
        Some(_) => state.clone(),
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame, after events have been handled.
/// All randomness comes through `rng` so callers control determinism.
pub fn tick(state: &GameState, keys: &Keys, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let frame = state.frame + 1;

    // ── 1. Slice deadline ────────────────────────────────────────────────────
    let hero = expire_slice(&state.hero, now_ms);

    // ── 2. Held keys, then jump physics ──────────────────────────────────────
    let hero = hero_move(&hero, keys, now_ms, state.slice_display_ms, rng);
    let hero = update_jump(&hero);

    // ── 3. Hold-to-quit ──────────────────────────────────────────────────────
    let state = update_quit_hold(state, keys.escape, now_ms);

    // ── 4. Enemies pursue only while their corner is on screen ───────────────
    let target = hero.body.rect.top_left();
    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| {
            if top_left_on_screen(&e.body.rect, state.width, state.height) {
                enemy_move_towards(e, target)
            } else {
                e.clone()
            }
        })
        .collect();

    GameState {
        hero,
        enemies,
        frame,
        ..state
    }
}
