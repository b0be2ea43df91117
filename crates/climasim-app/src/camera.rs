//! Orbit camera around the globe.

use climasim_renderer::sphere::matrix::{self as mat, Mat4};

const MIN_DISTANCE: f32 = 1.6;
const MAX_DISTANCE: f32 = 12.0;
const MAX_PITCH: f32 = 85.0;
/// Degrees of orbit per pixel dragged.
const DRAG_SENSITIVITY: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Degrees around the y axis.
    pub yaw: f32,
    /// Degrees above the equator.
    pub pitch: f32,
    pub distance: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 15.0,
            distance: 4.0,
            fov_y: std::f32::consts::FRAC_PI_4,
        }
    }
}

impl OrbitCamera {
    pub fn eye(&self) -> [f32; 3] {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        [
            self.distance * pitch.cos() * yaw.sin(),
            self.distance * pitch.sin(),
            self.distance * pitch.cos() * yaw.cos(),
        ]
    }

    pub fn view(&self) -> Mat4 {
        mat::look_at(self.eye(), [0.0, 0.0, 0.0], [0.0, 1.0, 0.0])
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        mat::perspective(self.fov_y, aspect.max(1e-3), 0.1, 100.0)
    }

    /// Orbit by a mouse drag in pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw = (self.yaw - dx * DRAG_SENSITIVITY).rem_euclid(360.0);
        self.pitch = (self.pitch + dy * DRAG_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Zoom by wheel lines; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance * 0.9f32.powf(lines)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}
