//! State behind the fluid-like background wash.
//!
//! This is not a solver: the renderer's background shader just needs a center
//! that trails the pointer with some inertia, a scalar energy level, and the
//! recent tap impulses. The center follows a damped spring toward the pointer
//! with a per-second step cap; energy blends toward a mix of pointer and
//! spring speed.

use crate::constants::{
    FLUID_DAMPING_RATIO, FLUID_ENERGY_BLEND_ALPHA, FLUID_IMPULSE_DECAY_PER_SEC,
    FLUID_IMPULSE_FLOOR, FLUID_MAX_IMPULSES, FLUID_MAX_STEP_PER_SEC, FLUID_OMEGA,
    FLUID_POINTER_SPEED_MAX, FLUID_TARGET_WEIGHT_POINTER, FLUID_TARGET_WEIGHT_VELOCITY,
};
use smallvec::SmallVec;

/// A velocity+dye injection from a user gesture, in screen UV space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidImpulse {
    pub uv: [f32; 2],
    pub strength: f32,
    pub age_sec: f32,
}

pub struct FluidState {
    initialized: bool,
    pos: [f32; 2],
    vel: [f32; 2],
    target: [f32; 2],
    prev_target: [f32; 2],
    energy: f32,
    impulses: SmallVec<[FluidImpulse; FLUID_MAX_IMPULSES]>,
}

impl FluidState {
    pub fn new() -> Self {
        Self {
            initialized: false,
            pos: [0.5, 0.5],
            vel: [0.0, 0.0],
            target: [0.5, 0.5],
            prev_target: [0.5, 0.5],
            energy: 0.0,
            impulses: SmallVec::new(),
        }
    }

    /// Set the attractor the wash center drifts toward (pointer position).
    pub fn pointer_target(&mut self, uv: [f32; 2]) {
        self.target = [uv[0].clamp(0.0, 1.0), uv[1].clamp(0.0, 1.0)];
    }

    /// Queue a tap impulse. Oldest impulse is evicted once the queue is full.
    pub fn tap(&mut self, uv: [f32; 2], strength: f32) {
        if self.impulses.len() == FLUID_MAX_IMPULSES {
            self.impulses.remove(0);
        }
        self.impulses.push(FluidImpulse {
            uv: [uv[0].clamp(0.0, 1.0), uv[1].clamp(0.0, 1.0)],
            strength: strength.clamp(0.0, 1.5),
            age_sec: 0.0,
        });
    }

    pub fn step(&mut self, dt_sec: f32) {
        if !self.initialized {
            self.pos = self.target;
            self.prev_target = self.target;
            self.vel = [0.0, 0.0];
            self.initialized = true;
            return;
        }

        // Damped spring toward the target, capped per second
        let omega = FLUID_OMEGA;
        let k = omega * omega;
        let c = 2.0 * omega * FLUID_DAMPING_RATIO;
        let dx = self.target[0] - self.pos[0];
        let dy = self.target[1] - self.pos[1];
        let ax = k * dx - c * self.vel[0];
        let ay = k * dy - c * self.vel[1];
        self.vel[0] += ax * dt_sec;
        self.vel[1] += ay * dt_sec;
        let mut nx = self.pos[0] + self.vel[0] * dt_sec;
        let mut ny = self.pos[1] + self.vel[1] * dt_sec;
        let sdx = nx - self.pos[0];
        let sdy = ny - self.pos[1];
        let step = (sdx * sdx + sdy * sdy).sqrt();
        let max_step = FLUID_MAX_STEP_PER_SEC * dt_sec;
        if step > max_step {
            let inv = 1.0 / (step + 1e-6);
            nx = self.pos[0] + sdx * inv * max_step;
            ny = self.pos[1] + sdy * inv * max_step;
        }
        self.pos[0] = nx.clamp(0.0, 1.0);
        self.pos[1] = ny.clamp(0.0, 1.0);

        // Energy blends toward pointer speed plus spring speed
        let du = self.target[0] - self.prev_target[0];
        let dv = self.target[1] - self.prev_target[1];
        let pointer_speed =
            ((du * du + dv * dv).sqrt() / (dt_sec + 1e-5)).min(FLUID_POINTER_SPEED_MAX);
        let spring_speed =
            (self.vel[0] * self.vel[0] + self.vel[1] * self.vel[1]).sqrt();
        let target_energy = (pointer_speed * FLUID_TARGET_WEIGHT_POINTER
            + spring_speed * FLUID_TARGET_WEIGHT_VELOCITY)
            .clamp(0.0, 1.0);
        self.energy = (1.0 - FLUID_ENERGY_BLEND_ALPHA) * self.energy
            + FLUID_ENERGY_BLEND_ALPHA * target_energy;
        self.prev_target = self.target;

        // Age and fade impulses
        let decay = (-dt_sec * FLUID_IMPULSE_DECAY_PER_SEC).exp();
        for imp in &mut self.impulses {
            imp.age_sec += dt_sec;
            imp.strength *= decay;
        }
        self.impulses.retain(|imp| imp.strength >= FLUID_IMPULSE_FLOOR);
    }

    pub fn center(&self) -> [f32; 2] {
        self.pos
    }

    pub fn velocity(&self) -> [f32; 2] {
        self.vel
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn impulses(&self) -> &[FluidImpulse] {
        &self.impulses
    }
}

impl Default for FluidState {
    fn default() -> Self {
        Self::new()
    }
}
