//! Camera shared between the core and the frontend.
//!
//! Platform-free on purpose: the frontend builds its matrices from this and
//! nothing here touches windowing or GPU types.

use glam::{Mat4, Vec3};

/// Simple right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Default framing: keyboard centered low in view, bars rising above it.
    pub fn keyboard_view(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.55, 1.7),
            target: Vec3::new(0.0, 0.55, 0.0),
            up: Vec3::Y,
            aspect,
            fovy_radians: std::f32::consts::FRAC_PI_4,
            znear: 0.01,
            zfar: 100.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
