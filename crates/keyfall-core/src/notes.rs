//! Falling-note lifecycle.
//!
//! Each NoteOn spawns a bar anchored just above its key. While the note is
//! held the bar grows upward; on NoteOff it detaches and scrolls away, and it
//! is removed once its lower edge passes a fixed line above the keyboard.
//!
//! Instances are tracked by a generated [`NoteId`], not by pitch: rapid
//! retriggers of the same note coexist, and each NoteOff resolves to the
//! most-recently-created instance of that pitch that is still unresolved.

use crate::constants::{NOTE_BASE_Y, NOTE_FALL_RATE, NOTE_GROWTH_RATE, NOTE_REMOVAL_Y};
use crate::layout::{placement_for, KeyDimensions};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::time::Duration;

/// Per-instance identity of a falling note, unique for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(u64);

/// One visual bar. `y` is the vertical center; the bar's base is `y - height/2`.
#[derive(Debug, Clone, PartialEq)]
pub struct FallingNote {
    pub id: NoteId,
    pub note: u8,
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub y: f32,
    pub velocity: u8,
}

impl FallingNote {
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y - self.height / 2.0
    }
}

pub struct NoteLifecycle {
    dims: KeyDimensions,
    next_id: u64,
    active: Vec<FallingNote>,
    falling: Vec<FallingNote>,
    // pitch -> unresolved instance ids, newest last
    unresolved: FnvHashMap<u8, SmallVec<[NoteId; 4]>>,
    growth_rate: f32,
    fall_rate: f32,
    removal_y: f32,
}

impl NoteLifecycle {
    pub fn new(dims: KeyDimensions) -> Self {
        Self {
            dims,
            next_id: 0,
            active: Vec::new(),
            falling: Vec::new(),
            unresolved: FnvHashMap::default(),
            growth_rate: NOTE_GROWTH_RATE,
            fall_rate: NOTE_FALL_RATE,
            removal_y: NOTE_REMOVAL_Y,
        }
    }

    /// Spawn a growing bar for `note`. Notes outside the keyboard are dropped.
    pub fn note_on(&mut self, note: u8, velocity: u8) -> Option<NoteId> {
        let placement = match placement_for(note, &self.dims) {
            Ok(p) => p,
            Err(e) => {
                log::debug!("ignoring note-on: {e}");
                return None;
            }
        };
        let id = NoteId(self.next_id);
        self.next_id += 1;
        self.active.push(FallingNote {
            id,
            note,
            x: placement.position.x,
            width: placement.size.x,
            height: 0.0,
            y: NOTE_BASE_Y,
            velocity,
        });
        self.unresolved.entry(note).or_default().push(id);
        Some(id)
    }

    /// Detach the most recent unresolved bar for `note`. A NoteOff with no
    /// matching NoteOn is a no-op, not an error.
    pub fn note_off(&mut self, note: u8) -> Option<NoteId> {
        let stack = self.unresolved.get_mut(&note)?;
        let id = stack.pop()?;
        if stack.is_empty() {
            self.unresolved.remove(&note);
        }
        let idx = self.active.iter().rposition(|n| n.id == id)?;
        let bar = self.active.remove(idx);
        self.falling.push(bar);
        Some(id)
    }

    /// Advance all bars by `dt` and drop the ones past the removal line.
    /// Returns the ids of removed instances.
    pub fn advance(&mut self, dt: Duration) -> SmallVec<[NoteId; 4]> {
        let dt = dt.as_secs_f32();
        for bar in &mut self.active {
            bar.height += dt * self.growth_rate;
            bar.y = NOTE_BASE_Y + bar.height / 2.0;
        }
        let mut removed = SmallVec::new();
        let removal_y = self.removal_y;
        self.falling.retain_mut(|bar| {
            bar.y += dt * self.fall_rate;
            if bar.bottom() > removal_y {
                removed.push(bar.id);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Bars still held down, oldest first.
    pub fn active(&self) -> &[FallingNote] {
        &self.active
    }

    /// Bars released and scrolling away, in release order.
    pub fn falling(&self) -> &[FallingNote] {
        &self.falling
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.falling.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.falling.is_empty()
    }
}
