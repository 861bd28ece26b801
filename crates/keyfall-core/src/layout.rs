//! Pure keyboard geometry: MIDI note number to 3D key placement.
//!
//! The 88-key range is [`FIRST_NOTE`]..=[`LAST_NOTE`]. White keys are laid out
//! contiguously and centered on the origin; black keys sit between them with a
//! per-pitch-class horizontal bias and are raised above the white-key plane.

use crate::constants::{
    BLACK_KEY_DEPTH, BLACK_KEY_HEIGHT, BLACK_KEY_WIDTH, FIRST_NOTE, LAST_NOTE, WHITE_KEY_COUNT,
    WHITE_KEY_DEPTH, WHITE_KEY_HEIGHT, WHITE_KEY_WIDTH,
};
use glam::Vec3;
use thiserror::Error;

/// A MIDI note number outside the physical 88-key keyboard.
///
/// Such notes have no meaningful placement; callers are expected to drop the
/// event rather than clamp it onto an edge key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("MIDI note {note} is outside the 88-key range {FIRST_NOTE}..={LAST_NOTE}")]
pub struct KeyRangeError {
    pub note: u8,
}

/// Physical dimensions of white and black keys, in scene units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyDimensions {
    pub white_width: f32,
    pub white_depth: f32,
    pub white_height: f32,
    pub black_width: f32,
    pub black_depth: f32,
    pub black_height: f32,
}

impl Default for KeyDimensions {
    fn default() -> Self {
        Self {
            white_width: WHITE_KEY_WIDTH,
            white_depth: WHITE_KEY_DEPTH,
            white_height: WHITE_KEY_HEIGHT,
            black_width: BLACK_KEY_WIDTH,
            black_depth: BLACK_KEY_DEPTH,
            black_height: BLACK_KEY_HEIGHT,
        }
    }
}

/// Where a key sits and how big it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyPlacement {
    pub position: Vec3,
    pub size: Vec3,
    pub black: bool,
}

/// Black keys are the pitch classes C#, D#, F#, G#, A#.
#[inline]
pub fn is_black_key(note: u8) -> bool {
    matches!(note % 12, 1 | 3 | 6 | 8 | 10)
}

/// Horizontal bias of a black key relative to the midpoint between its white
/// neighbours, as a fraction of the black key width. C# and F# lean left,
/// D# and A# lean right, G# is centered.
#[inline]
pub fn black_key_bias(pitch_class: u8) -> f32 {
    match pitch_class {
        1 => -0.175,  // C#
        3 => 0.175,   // D#
        6 => -0.175,  // F#
        8 => 0.0,     // G#
        10 => 0.175,  // A#
        _ => 0.0,
    }
}

/// Count of white keys strictly below `note`, starting from the keyboard's
/// first note. For any in-range black key this is at least 1.
pub fn white_key_index(note: u8) -> u32 {
    (FIRST_NOTE..note).filter(|n| !is_black_key(*n)).count() as u32
}

/// Compute the placement of `note` on the keyboard. Pure and deterministic.
///
/// Notes outside the 88-key range are rejected with [`KeyRangeError`].
pub fn placement_for(note: u8, dims: &KeyDimensions) -> Result<KeyPlacement, KeyRangeError> {
    if !(FIRST_NOTE..=LAST_NOTE).contains(&note) {
        return Err(KeyRangeError { note });
    }

    let total_white_width = dims.white_width * WHITE_KEY_COUNT as f32;
    let start_x = -total_white_width / 2.0 + dims.white_width / 2.0;
    let whites_before = white_key_index(note) as f32;

    if !is_black_key(note) {
        let x = start_x + whites_before * dims.white_width;
        return Ok(KeyPlacement {
            position: Vec3::new(x, 0.0, 0.0),
            size: Vec3::new(dims.white_width, dims.white_depth, dims.white_height),
            black: false,
        });
    }

    let bias = black_key_bias(note % 12);
    let x = start_x
        + (whites_before - 1.0) * dims.white_width
        + dims.white_width * 0.5
        + bias * dims.black_width;
    let y = (dims.white_depth - dims.black_depth) / 2.0;
    let z = (dims.white_height - dims.black_height) / 2.0 + dims.black_height;
    Ok(KeyPlacement {
        position: Vec3::new(x, y, z),
        size: Vec3::new(dims.black_width, dims.black_depth, dims.black_height),
        black: true,
    })
}
