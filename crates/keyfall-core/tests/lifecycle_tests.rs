// Tests for the falling-note lifecycle.

use keyfall_core::{
    placement_for, KeyDimensions, NoteLifecycle, NOTE_BASE_Y, NOTE_FALL_RATE, NOTE_GROWTH_RATE,
    NOTE_REMOVAL_Y,
};
use std::time::Duration;

fn lifecycle() -> NoteLifecycle {
    NoteLifecycle::new(KeyDimensions::default())
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn note_on_spawns_a_growing_bar_at_the_key() {
    let mut lc = lifecycle();
    let id = lc.note_on(60, 100).expect("in-range note");
    assert_eq!(lc.active().len(), 1);
    assert!(lc.falling().is_empty());

    let bar = &lc.active()[0];
    assert_eq!(bar.id, id);
    assert_eq!(bar.note, 60);
    assert_eq!(bar.height, 0.0);
    assert_eq!(bar.velocity, 100);
    let placement = placement_for(60, &KeyDimensions::default()).unwrap();
    assert_eq!(bar.x, placement.position.x);
    assert_eq!(bar.width, placement.size.x);
    assert!((bar.bottom() - NOTE_BASE_Y).abs() < 1e-6);
}

#[test]
fn out_of_range_note_on_is_dropped() {
    let mut lc = lifecycle();
    assert!(lc.note_on(5, 100).is_none());
    assert!(lc.note_on(119, 100).is_none());
    assert!(lc.is_empty());
}

#[test]
fn held_bars_grow_with_an_anchored_base() {
    let mut lc = lifecycle();
    lc.note_on(60, 100);
    lc.advance(secs(1.0));
    let bar = &lc.active()[0];
    assert!(
        (bar.height - NOTE_GROWTH_RATE).abs() < 1e-5,
        "after 1s the bar should be {NOTE_GROWTH_RATE} tall, got {}",
        bar.height
    );
    assert!(
        (bar.bottom() - NOTE_BASE_Y).abs() < 1e-5,
        "base must stay anchored while held, got {}",
        bar.bottom()
    );
}

#[test]
fn height_is_non_decreasing_while_held() {
    let mut lc = lifecycle();
    lc.note_on(72, 64);
    let mut prev = 0.0;
    for _ in 0..50 {
        lc.advance(secs(0.016));
        let h = lc.active()[0].height;
        assert!(h >= prev, "height decreased: {h} < {prev}");
        prev = h;
    }
}

#[test]
fn note_off_detaches_and_the_bar_scrolls_away() {
    let mut lc = lifecycle();
    let id = lc.note_on(60, 100).unwrap();
    lc.advance(secs(1.0));
    assert_eq!(lc.note_off(60), Some(id));
    assert!(lc.active().is_empty());
    assert_eq!(lc.falling().len(), 1);

    let height_at_release = lc.falling()[0].height;
    let mut prev_y = lc.falling()[0].y;
    for _ in 0..20 {
        lc.advance(secs(0.05));
        if lc.falling().is_empty() {
            break;
        }
        let bar = &lc.falling()[0];
        assert!(bar.y >= prev_y, "released bar moved backwards");
        assert!(
            (bar.height - height_at_release).abs() < 1e-6,
            "released bar must stop growing"
        );
        prev_y = bar.y;
    }
}

#[test]
fn released_bar_is_removed_past_the_threshold() {
    let mut lc = lifecycle();
    let id = lc.note_on(60, 100).unwrap();
    lc.advance(secs(1.0));
    lc.note_off(60);

    // bottom starts at the anchor and climbs at the fall rate
    let fall_time = (NOTE_REMOVAL_Y - NOTE_BASE_Y) / NOTE_FALL_RATE;
    let mut removed = Vec::new();
    let mut elapsed = 0.0f32;
    while removed.is_empty() && elapsed < fall_time + 2.0 {
        removed.extend(lc.advance(secs(0.25)));
        elapsed += 0.25;
    }
    assert_eq!(removed, vec![id]);
    assert!(lc.is_empty());
    assert!(
        (elapsed - fall_time).abs() <= 0.5,
        "removal at {elapsed}s, expected about {fall_time}s"
    );
}

#[test]
fn same_pitch_retriggers_resolve_to_distinct_instances() {
    let mut lc = lifecycle();
    let first = lc.note_on(60, 100).unwrap();
    lc.advance(secs(0.1));
    let second = lc.note_on(60, 100).unwrap();
    lc.advance(secs(0.1));
    let third = lc.note_on(60, 100).unwrap();
    assert_ne!(first, second);
    assert_ne!(second, third);
    assert_eq!(lc.active().len(), 3);

    // releases resolve newest-first, one instance each
    assert_eq!(lc.note_off(60), Some(third));
    assert_eq!(lc.note_off(60), Some(second));
    assert_eq!(lc.note_off(60), Some(first));
    assert_eq!(lc.note_off(60), None);
    assert!(lc.active().is_empty());
    assert_eq!(lc.falling().len(), 3);
}

#[test]
fn note_off_leaves_older_instances_growing() {
    let mut lc = lifecycle();
    let first = lc.note_on(64, 80).unwrap();
    let second = lc.note_on(64, 80).unwrap();
    assert_eq!(lc.note_off(64), Some(second));
    assert_eq!(lc.active().len(), 1);
    assert_eq!(lc.active()[0].id, first);

    let before = lc.active()[0].height;
    lc.advance(secs(0.5));
    assert!(lc.active()[0].height > before, "older instance must keep growing");
}

#[test]
fn unmatched_note_off_is_a_noop() {
    let mut lc = lifecycle();
    lc.note_on(60, 100);
    assert_eq!(lc.note_off(61), None);
    assert_eq!(lc.active().len(), 1);
    assert!(lc.falling().is_empty());
}

#[test]
fn independent_pitches_are_tracked_separately() {
    let mut lc = lifecycle();
    let a = lc.note_on(60, 100).unwrap();
    let b = lc.note_on(67, 100).unwrap();
    let c = lc.note_on(72, 100).unwrap();
    assert_eq!(lc.note_off(67), Some(b));
    assert_eq!(lc.note_off(72), Some(c));
    assert_eq!(lc.note_off(60), Some(a));
    assert_eq!(lc.len(), 3);
}
