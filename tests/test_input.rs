use soul_smasher::input::*;

fn inferred() -> HeldKeys<char> {
    HeldKeys::new(ReleaseMode::Inferred {
        window_ms: DEFAULT_HOLD_WINDOW_MS,
    })
}

// ── Reported releases ─────────────────────────────────────────────────────────

#[test]
fn reported_key_held_until_release() {
    let mut held = HeldKeys::new(ReleaseMode::Reported);
    assert!(!held.is_held(&'a', 0));
    held.press('a', 0);
    assert!(held.is_held(&'a', 60_000));
    held.release(&'a');
    assert!(!held.is_held(&'a', 60_000));
}

#[test]
fn reported_repeat_is_not_a_fresh_press() {
    let mut held = HeldKeys::new(ReleaseMode::Reported);
    assert!(held.press('a', 0));
    held.repeat('a', 500);
    assert!(!held.press('a', 9_000));
    held.release(&'a');
    assert!(held.press('a', 9_100));
}

// ── Inferred releases ─────────────────────────────────────────────────────────

#[test]
fn inferred_window_outlasts_repeat_delay() {
    let mut held = inferred();
    held.press('a', 0);
    // Typical OS delay before auto-repeat kicks in.
    assert!(held.is_held(&'a', 500));
    assert!(held.is_held(&'a', 660));
    assert!(!held.is_held(&'a', DEFAULT_HOLD_WINDOW_MS + 1));
}

#[test]
fn inferred_repeats_keep_key_down() {
    let mut held = inferred();
    held.press('a', 0);
    assert!(!held.press('a', 500)); // auto-repeat arrives as a press
    for t in (533..5_000).step_by(33) {
        held.press('a', t);
        assert!(held.is_held(&'a', t + 16));
    }
}

#[test]
fn inferred_press_after_gap_is_fresh() {
    let mut held = inferred();
    assert!(held.press('a', 0));
    assert!(held.press('a', DEFAULT_HOLD_WINDOW_MS + 1));
}

#[test]
fn keys_are_independent() {
    let mut held = HeldKeys::new(ReleaseMode::Reported);
    held.press('a', 0);
    held.press('b', 0);
    held.release(&'a');
    assert!(!held.is_held(&'a', 1));
    assert!(held.is_held(&'b', 1));
    assert_eq!(held.mode(), ReleaseMode::Reported);
}
