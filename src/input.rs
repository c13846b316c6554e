//! Input as the simulation sees it: a snapshot of held keys plus the few
//! discrete events the loop reacts to.  Terminal specifics stay in `main`.

use std::collections::HashMap;
use std::hash::Hash;

/// Keys held at the moment the frame samples the keyboard.
///
/// Every field is independent; left and right may both be held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub slice: bool,
    pub escape: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// Close request (Ctrl+C in the terminal).
    Quit,
    /// F11 pressed.  `native` is the terminal's full resolution in pixels.
    ToggleFullscreen { native: (u32, u32) },
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// How the terminal tells us a key went up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseMode {
    /// The terminal sends release events; a key stays held until its release.
    Reported,
    /// Only presses arrive, with OS auto-repeat showing up as more presses.
    /// A key counts as held until `window_ms` passes without another one.
    Inferred { window_ms: u64 },
}

/// Inferred-release window.  Must outlast the OS delay before auto-repeat
/// starts (commonly 250–660 ms), or a held key drops out until repeats begin.
pub const DEFAULT_HOLD_WINDOW_MS: u64 = 700;

/// Turns a stream of key events into "is this key down right now".
#[derive(Clone, Debug)]
pub struct HeldKeys<K> {
    mode: ReleaseMode,
    last_seen: HashMap<K, u64>,
}

impl<K: Copy + Eq + Hash> HeldKeys<K> {
    pub fn new(mode: ReleaseMode) -> HeldKeys<K> {
        HeldKeys {
            mode,
            last_seen: HashMap::new(),
        }
    }

    pub fn mode(&self) -> ReleaseMode {
        self.mode
    }

    /// Record a press.  Returns `true` only for a fresh press, not for an
    /// auto-repeat that arrives disguised as a press.
    pub fn press(&mut self, key: K, now_ms: u64) -> bool {
        let fresh = !self.is_held(&key, now_ms);
        self.last_seen.insert(key, now_ms);
        fresh
    }

    pub fn repeat(&mut self, key: K, now_ms: u64) {
        self.last_seen.insert(key, now_ms);
    }

    pub fn release(&mut self, key: &K) {
        self.last_seen.remove(key);
    }

    pub fn is_held(&self, key: &K, now_ms: u64) -> bool {
        match (self.last_seen.get(key), self.mode) {
            (None, _) => false,
            (Some(_), ReleaseMode::Reported) => true,
            (Some(&last), ReleaseMode::Inferred { window_ms }) => {
                now_ms.saturating_sub(last) <= window_ms
            }
        }
    }
}
