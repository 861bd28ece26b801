// Tests for the fluid wash state.

use keyfall_core::{FluidState, FLUID_MAX_IMPULSES, FLUID_MAX_STEP_PER_SEC};

const DT: f32 = 1.0 / 60.0;

#[test]
fn first_step_snaps_to_the_target() {
    let mut fluid = FluidState::new();
    fluid.pointer_target([0.2, 0.8]);
    fluid.step(DT);
    assert_eq!(fluid.center(), [0.2, 0.8]);
    assert_eq!(fluid.velocity(), [0.0, 0.0]);
}

#[test]
fn center_converges_toward_a_still_target() {
    let mut fluid = FluidState::new();
    fluid.pointer_target([0.5, 0.5]);
    fluid.step(DT);
    fluid.pointer_target([0.9, 0.1]);
    for _ in 0..3000 {
        fluid.step(DT);
    }
    let [x, y] = fluid.center();
    assert!((x - 0.9).abs() < 0.05, "x did not converge: {x}");
    assert!((y - 0.1).abs() < 0.05, "y did not converge: {y}");
}

#[test]
fn center_stays_in_unit_square_and_respects_the_step_cap() {
    let mut fluid = FluidState::new();
    fluid.pointer_target([0.0, 0.0]);
    fluid.step(DT);
    fluid.pointer_target([1.0, 1.0]);
    let mut prev = fluid.center();
    for _ in 0..600 {
        fluid.step(DT);
        let pos = fluid.center();
        for c in pos {
            assert!((0.0..=1.0).contains(&c), "center left the unit square: {c}");
        }
        let dx = pos[0] - prev[0];
        let dy = pos[1] - prev[1];
        let step = (dx * dx + dy * dy).sqrt();
        assert!(
            step <= FLUID_MAX_STEP_PER_SEC * DT + 1e-4,
            "step {step} exceeds the cap"
        );
        prev = pos;
    }
}

#[test]
fn energy_stays_bounded_and_decays_at_rest() {
    let mut fluid = FluidState::new();
    fluid.pointer_target([0.5, 0.5]);
    fluid.step(DT);
    // thrash the pointer for a while
    for i in 0..240 {
        let t = i as f32 * 0.13;
        fluid.pointer_target([0.5 + 0.4 * t.sin(), 0.5 + 0.4 * t.cos()]);
        fluid.step(DT);
        assert!(
            (0.0..=1.0).contains(&fluid.energy()),
            "energy out of range: {}",
            fluid.energy()
        );
    }
    // then hold still
    for _ in 0..600 {
        fluid.step(DT);
    }
    assert!(
        fluid.energy() < 0.05,
        "energy should decay at rest, got {}",
        fluid.energy()
    );
}

#[test]
fn tap_queue_keeps_the_newest_impulses() {
    let mut fluid = FluidState::new();
    for i in 0..6 {
        fluid.tap([i as f32 * 0.1, 0.5], 1.0);
    }
    assert_eq!(fluid.impulses().len(), FLUID_MAX_IMPULSES);
    // the two oldest taps were evicted
    assert!((fluid.impulses()[0].uv[0] - 0.2).abs() < 1e-6);
    assert!((fluid.impulses()[FLUID_MAX_IMPULSES - 1].uv[0] - 0.5).abs() < 1e-6);
}

#[test]
fn impulses_fade_out_and_are_dropped() {
    let mut fluid = FluidState::new();
    fluid.pointer_target([0.5, 0.5]);
    fluid.step(DT);
    fluid.tap([0.3, 0.3], 1.0);
    let initial = fluid.impulses()[0].strength;
    fluid.step(DT);
    assert!(fluid.impulses()[0].strength < initial, "impulse must decay");
    assert!(fluid.impulses()[0].age_sec > 0.0, "impulse must age");
    for _ in 0..600 {
        fluid.step(DT);
    }
    assert!(
        fluid.impulses().is_empty(),
        "impulses should drain after a few seconds"
    );
}
