use glam::Mat4;
use std::f32::consts::TAU;

/// Rotation applied to the cube around +Y each frame, in radians.
pub const DEFAULT_SPIN_STEP: f32 = 0.01;

/// Accumulated Y-axis rotation of the cube.
///
/// The angle is wrapped into `[0, 2π)` on every advance and the matrix is
/// rebuilt from it, so long runs do not accumulate matrix drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpin {
    angle: f32,
    step: f32,
}

impl Default for ModelSpin {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_STEP)
    }
}

impl ModelSpin {
    pub fn new(step: f32) -> Self {
        Self { angle: 0.0, step }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Advance by one step. Equivalent to left-multiplying the model by
    /// `Mat4::from_rotation_y(step)`.
    pub fn advance(&mut self) {
        self.angle = (self.angle + self.step).rem_euclid(TAU);
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.angle)
    }
}
