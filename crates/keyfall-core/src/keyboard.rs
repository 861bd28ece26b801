//! Owned keyboard state: one visual per key, lit while its note is held.

use crate::constants::{
    BLACK_KEY_COLOR, FIRST_NOTE, GLOW_COLOR, LAST_NOTE, LIT_EMISSIVE, WHITE_KEY_COLOR,
};
use crate::layout::{is_black_key, placement_for, KeyDimensions, KeyPlacement};

/// The render-facing state of a single key. Created once at startup and never
/// destroyed; only `color`, `emissive` and `lit` change afterwards.
#[derive(Clone, Debug)]
pub struct KeyVisual {
    pub note: u8,
    pub placement: KeyPlacement,
    pub color: [f32; 3],
    pub emissive: f32,
    pub lit: bool,
}

/// All 88 key visuals, indexed by MIDI note number.
pub struct KeyboardState {
    keys: Vec<KeyVisual>,
}

impl KeyboardState {
    pub fn new(dims: KeyDimensions) -> Self {
        let keys = (FIRST_NOTE..=LAST_NOTE)
            .map(|note| {
                let placement =
                    placement_for(note, &dims).expect("note within the keyboard range");
                KeyVisual {
                    note,
                    placement,
                    color: resting_color(note),
                    emissive: 0.0,
                    lit: false,
                }
            })
            .collect();
        Self { keys }
    }

    /// Light the key for `note`. Unknown notes are silently ignored; repeated
    /// calls are idempotent.
    pub fn highlight_on(&mut self, note: u8) {
        if let Some(key) = self.key_mut(note) {
            key.lit = true;
            key.color = GLOW_COLOR;
            key.emissive = LIT_EMISSIVE;
        }
    }

    /// Restore the resting look of the key for `note`. Unknown notes are
    /// silently ignored; repeated calls are idempotent.
    pub fn highlight_off(&mut self, note: u8) {
        if let Some(key) = self.key_mut(note) {
            key.lit = false;
            key.color = resting_color(note);
            key.emissive = 0.0;
        }
    }

    pub fn key(&self, note: u8) -> Option<&KeyVisual> {
        if !(FIRST_NOTE..=LAST_NOTE).contains(&note) {
            return None;
        }
        self.keys.get((note - FIRST_NOTE) as usize)
    }

    fn key_mut(&mut self, note: u8) -> Option<&mut KeyVisual> {
        if !(FIRST_NOTE..=LAST_NOTE).contains(&note) {
            return None;
        }
        self.keys.get_mut((note - FIRST_NOTE) as usize)
    }

    /// All keys in ascending note order.
    pub fn keys(&self) -> &[KeyVisual] {
        &self.keys
    }
}

/// Resting color by the same classification rule the layout uses.
#[inline]
pub fn resting_color(note: u8) -> [f32; 3] {
    if is_black_key(note) {
        BLACK_KEY_COLOR
    } else {
        WHITE_KEY_COLOR
    }
}
