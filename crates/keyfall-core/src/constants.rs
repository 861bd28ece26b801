// Shared keyboard/visual tuning constants used by the core and the frontend.

// 88-key range
pub const FIRST_NOTE: u8 = 21; // A0
pub const LAST_NOTE: u8 = 108; // C8
pub const KEY_COUNT: usize = 88;
pub const WHITE_KEY_COUNT: u32 = 52;

// Key dimensions (scene units)
pub const WHITE_KEY_WIDTH: f32 = 0.025;
pub const WHITE_KEY_DEPTH: f32 = 0.15;
pub const WHITE_KEY_HEIGHT: f32 = 0.025;
pub const BLACK_KEY_WIDTH: f32 = 0.0137;
pub const BLACK_KEY_DEPTH: f32 = 0.09;
pub const BLACK_KEY_HEIGHT: f32 = 0.01;

// Falling notes
pub const NOTE_GROWTH_RATE: f32 = 0.2; // height gained per second while held
pub const NOTE_FALL_RATE: f32 = 0.2; // scroll per second after release
pub const NOTE_BASE_Y: f32 = WHITE_KEY_DEPTH / 3.0; // bar base anchor above the keys
pub const NOTE_REMOVAL_Y: f32 = WHITE_KEY_DEPTH * 10.0; // lower edge past this is gone
pub const NOTE_ROUNDNESS: f32 = 0.5; // corner radius fraction for the bar shader

// Palette
pub const WHITE_KEY_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const BLACK_KEY_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
pub const GLOW_COLOR: [f32; 3] = [0.0, 0.5, 0.5]; // lit keys, note bars, laser
pub const LIT_EMISSIVE: f32 = 2.0;

// Laser bar resting on the far edge of the keys
pub const LASER_THICKNESS: f32 = WHITE_KEY_WIDTH / 2.0;
pub const LASER_Y: f32 = WHITE_KEY_DEPTH / 2.0;
pub const LASER_EMISSIVE: f32 = 2.0;

// Bloom post-process
pub const BLOOM_STRENGTH: f32 = 1.5;
pub const BLOOM_RADIUS: f32 = 0.1;
pub const BLOOM_THRESHOLD: f32 = 0.3;

// Fluid wash spring parameters
pub const FLUID_OMEGA: f32 = 1.1; // natural frequency
pub const FLUID_DAMPING_RATIO: f32 = 0.5; // 0..1, critical at 1
pub const FLUID_MAX_STEP_PER_SEC: f32 = 0.50; // cap motion per second (uv units)

// Fluid wash energy shaping
pub const FLUID_POINTER_SPEED_MAX: f32 = 10.0; // normalized units per second
pub const FLUID_TARGET_WEIGHT_POINTER: f32 = 0.12;
pub const FLUID_TARGET_WEIGHT_VELOCITY: f32 = 0.35;
pub const FLUID_ENERGY_BLEND_ALPHA: f32 = 0.15;

// Tap impulses injected into the wash
pub const FLUID_MAX_IMPULSES: usize = 4;
pub const FLUID_IMPULSE_DECAY_PER_SEC: f32 = 1.2;
pub const FLUID_IMPULSE_FLOOR: f32 = 0.01; // below this an impulse is dropped
