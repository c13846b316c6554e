mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use soul_smasher::assets::Assets;
use soul_smasher::compute::{handle_event, init_state, tick};
use soul_smasher::config::Config;
use soul_smasher::entities::{GameState, QuitReason, SessionStatus};
use soul_smasher::error::Result;
use soul_smasher::input::{GameEvent, HeldKeys, Keys, ReleaseMode, DEFAULT_HOLD_WINDOW_MS};
use soul_smasher::surface::Surface;

use display::Presenter;

/// Snapshot the keyboard the way the simulation wants it.
fn sample_keys(held: &HeldKeys<KeyCode>, now_ms: u64) -> Keys {
    let down = |key: KeyCode| held.is_held(&key, now_ms);
    Keys {
        left: down(KeyCode::Left),
        right: down(KeyCode::Right),
        up: down(KeyCode::Up),
        down: down(KeyCode::Down),
        slice: down(KeyCode::Char('z')) || down(KeyCode::Char('Z')),
        escape: down(KeyCode::Esc),
    }
}

/// Fold one terminal event into the held-key table and the session.
/// F11 toggles once per physical press, never on auto-repeat.
fn apply_event(
    state: &GameState,
    held: &mut HeldKeys<KeyCode>,
    ev: &Event,
    now_ms: u64,
    term_size: (u16, u16),
) -> GameState {
    let Event::Key(KeyEvent {
        code,
        kind,
        modifiers,
        ..
    }) = *ev
    else {
        return state.clone();
    };
    match kind {
        KeyEventKind::Press => {
            let fresh = held.press(code, now_ms);
            match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    handle_event(state, &GameEvent::Quit)
                }
                KeyCode::F(11) if fresh => {
                    let native = display::native_resolution(term_size);
                    handle_event(state, &GameEvent::ToggleFullscreen { native })
                }
                _ => state.clone(),
            }
        }
        KeyEventKind::Repeat => {
            held.repeat(code, now_ms);
            state.clone()
        }
        KeyEventKind::Release => {
            held.release(&code);
            state.clone()
        }
    }
}

fn quit_reason(state: &GameState) -> Option<QuitReason> {
    match state.status {
        SessionStatus::Quit(reason) => Some(reason),
        SessionStatus::Running => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run frames until the session quits.
///
/// Input model: a `HeldKeys` table tracks which keys are down; each frame
/// samples it into a `Keys` snapshot, so any combination of keys can be held
/// at once.  Terminals with the keyboard-enhancement protocol report
/// releases, so keys stay down until released.  Elsewhere a key stays down
/// while presses keep arriving within the hold window.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    config: &Config,
    rx: &mpsc::Receiver<Event>,
    release_mode: ReleaseMode,
) -> Result<QuitReason> {
    let mut rng = thread_rng();
    let start = Instant::now();
    let frame = config.frame_duration();

    let mut held: HeldKeys<KeyCode> = HeldKeys::new(release_mode);
    let mut term_size = terminal::size()?;
    let mut surface = Surface::new(state.width, state.height);
    let mut presenter = Presenter::new();

    loop {
        let frame_start = Instant::now();
        let now_ms = start.elapsed().as_millis() as u64;

        // ── Drain all pending events (non-blocking) ───────────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                term_size = (cols, rows);
            }
            state = apply_event(&state, &mut held, &ev, now_ms, term_size);
            if let Some(reason) = quit_reason(&state) {
                return Ok(reason);
            }
        }

        // ── Simulate ──────────────────────────────────────────────────────────
        let keys = sample_keys(&held, now_ms);
        state = tick(&state, &keys, now_ms, &mut rng);
        if let Some(reason) = quit_reason(&state) {
            return Ok(reason);
        }

        // ── Draw & present ────────────────────────────────────────────────────
        if surface.size() != (state.width, state.height) {
            surface = Surface::new(state.width, state.height);
        }
        surface.draw_frame(&state);
        presenter.present(out, &surface, term_size)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::default();
    let assets = Assets::load(&config)?;
    let state = init_state(&config, &assets);
    log::info!(
        "{} starting at {}x{}, {} fps",
        config.title,
        state.width,
        state.height,
        config.fps
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(&config.title))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    // Must be asked before the reader thread starts consuming stdin.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    let release_mode = if keyboard_enhanced {
        ReleaseMode::Reported
    } else {
        ReleaseMode::Inferred {
            window_ms: DEFAULT_HOLD_WINDOW_MS,
        }
    };
    log::info!("Key releases: {:?}", release_mode);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, state, &config, &rx, release_mode);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(reason) => {
            log::info!("Quit: {:?}", reason);
            Ok(())
        }
        Err(err) => {
            log::error!("{}", err);
            Err(err)
        }
    }
}
