use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera pose and zoom bounds as seen by the render loop.
///
/// Written only by the orbit controller, read once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

impl CameraState {
    /// Distance from the eye to the look-at target.
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }
}

/// Configuration handed to the orbit controller at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitOptions {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            eye: Vec3::new(2.0, 2.0, 3.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            zoom_min: 0.5,
            zoom_max: 100.0,
            zoom_speed: 2.0,
        }
    }
}

/// Physical pixel size of the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceExtent {
    pub width: u32,
    pub height: u32,
}

impl SurfaceExtent {
    /// Build from physical pixel dimensions, clamping each side to at least 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Scale a logical client size by the display pixel ratio.
    ///
    /// A non-positive or non-finite ratio is treated as 1.
    pub fn from_client(client_width: f64, client_height: f64, pixel_ratio: f64) -> Self {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        let scale = |v: f64| (v.max(0.0) * ratio).round().min(u32::MAX as f64) as u32;
        Self::new(scale(client_width), scale(client_height))
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Color the render pass clears to before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for ClearColor {
    fn default() -> Self {
        Self {
            r: 0.1,
            g: 0.1,
            b: 0.1,
            a: 1.0,
        }
    }
}
