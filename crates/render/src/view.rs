use glam::{Mat4, Vec3};
use spincube_common::OrbitOptions;

/// Camera and projection parameters for the cube view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub orbit: OrbitOptions,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let orbit = OrbitOptions::default();
        Self {
            eye: orbit.eye,
            target: orbit.center,
            up: orbit.up,
            fov_y: 1.25,
            near: 0.1,
            far: 1000.0,
            orbit,
        }
    }
}

/// View and projection matrices for one aspect ratio, plus the controller
/// options that start the orbit camera at the same pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
    pub orbit: OrbitOptions,
}

impl ViewProjection {
    pub fn new(aspect: f32, config: &ViewConfig) -> Self {
        let view = Mat4::look_at_rh(config.eye, config.target, config.up);
        let projection = projection_matrix(aspect, config);
        let orbit = OrbitOptions {
            eye: config.eye,
            center: config.target,
            up: config.up,
            ..config.orbit
        };
        Self {
            view,
            projection,
            view_projection: projection * view,
            orbit,
        }
    }
}

/// Right-handed perspective with wgpu's `[0, 1]` depth range.
pub(crate) fn projection_matrix(aspect: f32, config: &ViewConfig) -> Mat4 {
    Mat4::perspective_rh(config.fov_y, aspect, config.near, config.far)
}
