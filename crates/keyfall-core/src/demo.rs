//! Seeded generative note source.
//!
//! When no MIDI device is available the frontend runs this player instead, so
//! the keyboard still lights up and bars still fall. It emits the same
//! [`NoteMessage`] stream a live instrument would: a NoteOn scheduled on an
//! eighth-note grid, and the matching NoteOff once the sampled hold elapses.
//! Deterministic for a fixed seed.

use crate::midi::NoteMessage;
use rand::prelude::*;
use smallvec::SmallVec;
use std::time::Duration;

pub const C_MAJOR_PENTATONIC: &[i32] = &[0, 2, 4, 7, 9, 12];

/// One "hand" of the player: where it plays and how busy it is.
#[derive(Clone, Debug)]
pub struct HandConfig {
    pub octave_offset: i32,
    pub trigger_probability: f32,
    pub base_hold_sec: f32,
}

#[derive(Clone, Debug)]
pub struct DemoParams {
    pub bpm: f32,
    pub root_midi: i32,
    pub scale: &'static [i32],
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            bpm: 96.0,
            root_midi: 60,
            scale: C_MAJOR_PENTATONIC,
        }
    }
}

#[derive(Clone, Debug)]
struct PendingOff {
    note: u8,
    due_sec: f64,
}

pub struct DemoPlayer {
    pub params: DemoParams,
    hands: Vec<HandConfig>,
    rngs: Vec<StdRng>,
    beat_accum: f64,
    clock_sec: f64,
    pending_offs: SmallVec<[PendingOff; 8]>,
}

impl DemoPlayer {
    pub fn new(hands: Vec<HandConfig>, params: DemoParams, seed: u64) -> Self {
        // Derive per-hand RNGs from the base seed so the hands stay independent
        let rngs = (0..hands.len())
            .map(|i| {
                let mix = seed ^ (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                StdRng::seed_from_u64(mix)
            })
            .collect();
        Self {
            params,
            hands,
            rngs,
            beat_accum: 0.0,
            clock_sec: 0.0,
            pending_offs: SmallVec::new(),
        }
    }

    /// A left hand below middle C and a busier right hand above it.
    pub fn default_duet(seed: u64) -> Self {
        let hands = vec![
            HandConfig {
                octave_offset: -1,
                trigger_probability: 0.35,
                base_hold_sec: 0.5,
            },
            HandConfig {
                octave_offset: 1,
                trigger_probability: 0.55,
                base_hold_sec: 0.3,
            },
        ];
        Self::new(hands, DemoParams::default(), seed)
    }

    /// Advance the player's clock by `dt`, appending any due events to `out`.
    /// NoteOffs whose hold has elapsed are released before new NoteOns so a
    /// retrigger of the same pitch arrives in playable order.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<NoteMessage>) {
        self.clock_sec += dt.as_secs_f64();

        let now = self.clock_sec;
        let mut i = 0;
        while i < self.pending_offs.len() {
            if self.pending_offs[i].due_sec <= now {
                let off = self.pending_offs.swap_remove(i);
                out.push(NoteMessage::NoteOff { note: off.note });
            } else {
                i += 1;
            }
        }

        let seconds_per_beat = 60.0 / self.params.bpm as f64;
        self.beat_accum += dt.as_secs_f64();
        while self.beat_accum >= seconds_per_beat / 2.0 {
            // eighth notes grid
            self.beat_accum -= seconds_per_beat / 2.0;
            self.schedule_step(out);
        }
    }

    fn schedule_step(&mut self, out: &mut Vec<NoteMessage>) {
        for (i, hand) in self.hands.iter().enumerate() {
            if self.rngs[i].gen::<f32>() >= hand.trigger_probability {
                continue;
            }
            let degree = *self.params.scale.choose(&mut self.rngs[i]).unwrap_or(&0);
            let midi = self.params.root_midi + degree + hand.octave_offset * 12;
            if !(0..=127).contains(&midi) {
                continue;
            }
            let note = midi as u8;
            let velocity = (40.0 + self.rngs[i].gen::<f32>() * 80.0) as u8;
            let hold = hand.base_hold_sec + self.rngs[i].gen::<f32>() * 0.2;
            out.push(NoteMessage::NoteOn { note, velocity });
            self.pending_offs.push(PendingOff {
                note,
                due_sec: self.clock_sec + hold as f64,
            });
        }
    }

    /// Notes currently sounding (NoteOn emitted, NoteOff still pending).
    pub fn sounding(&self) -> usize {
        self.pending_offs.len()
    }
}
