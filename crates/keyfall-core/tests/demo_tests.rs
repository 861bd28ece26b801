// Tests for the generative demo player.

use keyfall_core::{DemoPlayer, NoteMessage};
use std::collections::HashMap;
use std::time::Duration;

fn run(player: &mut DemoPlayer, steps: usize, dt: Duration) -> Vec<NoteMessage> {
    let mut out = Vec::new();
    for _ in 0..steps {
        player.tick(dt, &mut out);
    }
    out
}

#[test]
fn fixed_seed_is_deterministic() {
    let dt = Duration::from_millis(16);
    let mut a = DemoPlayer::default_duet(7);
    let mut b = DemoPlayer::default_duet(7);
    let events_a = run(&mut a, 2000, dt);
    let events_b = run(&mut b, 2000, dt);
    assert!(!events_a.is_empty(), "expected some scheduled events");
    assert_eq!(events_a, events_b);
}

#[test]
fn different_seeds_diverge() {
    let dt = Duration::from_millis(16);
    let mut a = DemoPlayer::default_duet(1);
    let mut b = DemoPlayer::default_duet(2);
    let events_a = run(&mut a, 2000, dt);
    let events_b = run(&mut b, 2000, dt);
    assert_ne!(events_a, events_b);
}

#[test]
fn emits_valid_midi_values() {
    let mut player = DemoPlayer::default_duet(42);
    let events = run(&mut player, 3000, Duration::from_millis(16));
    assert!(!events.is_empty(), "expected some scheduled events");
    for ev in &events {
        if let NoteMessage::NoteOn { velocity, .. } = ev {
            assert!(*velocity > 0, "note-on with zero velocity");
            assert!(*velocity <= 127);
        }
    }
}

#[test]
fn every_note_off_matches_a_sounding_note_on() {
    let mut player = DemoPlayer::default_duet(42);
    let mut sounding: HashMap<u8, i32> = HashMap::new();
    let mut ons = 0usize;
    let mut offs = 0usize;
    let mut out = Vec::new();
    for _ in 0..5000 {
        out.clear();
        player.tick(Duration::from_millis(16), &mut out);
        for ev in &out {
            match *ev {
                NoteMessage::NoteOn { note, .. } => {
                    *sounding.entry(note).or_insert(0) += 1;
                    ons += 1;
                }
                NoteMessage::NoteOff { note } => {
                    let count = sounding.entry(note).or_insert(0);
                    assert!(*count > 0, "note-off for {note} with nothing sounding");
                    *count -= 1;
                    offs += 1;
                }
            }
        }
    }
    assert!(ons > 0, "expected some notes over 80 seconds");
    assert_eq!(ons - offs, player.sounding());
}
