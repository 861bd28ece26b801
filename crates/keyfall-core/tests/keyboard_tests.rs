// Tests for the owned keyboard state.

use keyfall_core::{
    is_black_key, resting_color, KeyDimensions, KeyboardState, BLACK_KEY_COLOR, FIRST_NOTE,
    KEY_COUNT, LAST_NOTE, WHITE_KEY_COLOR,
};

fn keyboard() -> KeyboardState {
    KeyboardState::new(KeyDimensions::default())
}

#[test]
fn builds_one_visual_per_key_in_order() {
    let kb = keyboard();
    assert_eq!(kb.keys().len(), KEY_COUNT);
    for (i, key) in kb.keys().iter().enumerate() {
        assert_eq!(key.note, FIRST_NOTE + i as u8);
        assert!(!key.lit);
        assert_eq!(key.emissive, 0.0);
    }
}

#[test]
fn resting_colors_follow_the_classification() {
    let kb = keyboard();
    for key in kb.keys() {
        let expected = if is_black_key(key.note) {
            BLACK_KEY_COLOR
        } else {
            WHITE_KEY_COLOR
        };
        assert_eq!(key.color, expected, "wrong resting color for {}", key.note);
        assert_eq!(key.placement.black, is_black_key(key.note));
    }
}

#[test]
fn lookup_covers_exactly_the_keyboard_range() {
    let kb = keyboard();
    assert!(kb.key(FIRST_NOTE).is_some());
    assert!(kb.key(LAST_NOTE).is_some());
    assert!(kb.key(FIRST_NOTE - 1).is_none());
    assert!(kb.key(LAST_NOTE + 1).is_none());
    assert!(kb.key(0).is_none());
}

#[test]
fn highlight_off_restores_the_exact_resting_color() {
    let mut kb = keyboard();
    for note in [60u8, 61, 21, 108] {
        let before = kb.key(note).unwrap().color;
        kb.highlight_on(note);
        let lit = kb.key(note).unwrap();
        assert!(lit.lit);
        assert!(lit.emissive > 0.0);
        assert_ne!(lit.color, before, "lit key {note} should change color");
        kb.highlight_off(note);
        let after = kb.key(note).unwrap();
        assert!(!after.lit);
        assert_eq!(after.emissive, 0.0);
        assert_eq!(after.color, resting_color(note));
        assert_eq!(after.color, before);
    }
}

#[test]
fn repeated_highlight_calls_are_idempotent() {
    let mut kb = keyboard();
    kb.highlight_on(64);
    let once = kb.key(64).unwrap().clone();
    kb.highlight_on(64);
    let twice = kb.key(64).unwrap();
    assert_eq!(twice.color, once.color);
    assert_eq!(twice.emissive, once.emissive);

    kb.highlight_off(64);
    kb.highlight_off(64);
    let off = kb.key(64).unwrap();
    assert_eq!(off.color, resting_color(64));
    assert_eq!(off.emissive, 0.0);
}

#[test]
fn out_of_range_highlights_are_silently_ignored() {
    let mut kb = keyboard();
    kb.highlight_on(5);
    kb.highlight_off(5);
    kb.highlight_on(120);
    kb.highlight_off(120);
    for key in kb.keys() {
        assert!(!key.lit, "no key should be lit, but {} is", key.note);
    }
}
