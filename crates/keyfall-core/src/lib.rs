pub mod camera;
pub mod constants;
pub mod demo;
pub mod fluid;
pub mod keyboard;
pub mod layout;
pub mod midi;
pub mod notes;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use camera::Camera;
pub use constants::*;
pub use demo::{DemoParams, DemoPlayer, HandConfig, C_MAJOR_PENTATONIC};
pub use fluid::{FluidImpulse, FluidState};
pub use keyboard::{resting_color, KeyVisual, KeyboardState};
pub use layout::{
    black_key_bias, is_black_key, placement_for, white_key_index, KeyDimensions, KeyPlacement,
    KeyRangeError,
};
pub use midi::NoteMessage;
pub use notes::{FallingNote, NoteId, NoteLifecycle};
