use crate::action::OrbitAction;
use glam::{Mat3, Mat4, Quat, Vec2, Vec3};
use spincube_common::{CameraState, OrbitOptions};

/// Radians of orbit per pixel of pointer motion.
const ROTATE_SPEED: f32 = 0.005;
/// View-plane units per pixel, per unit of distance to the center.
const PAN_SPEED: f32 = 0.0015;
/// Exponent per scroll line, scaled by `zoom_speed`.
const ZOOM_STEP: f32 = 0.05;
/// Keeps the eye off the poles so the view basis stays well defined.
const MAX_POLE_COS: f32 = 0.995;

/// Errors from building an orbit controller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrbitError {
    #[error("eye and center coincide")]
    EyeAtCenter,
    #[error("view direction is parallel to the up vector")]
    ParallelUp,
    #[error("invalid zoom range: min {min}, max {max}")]
    InvalidZoomRange { min: f32, max: f32 },
}

/// Orbit camera around a center point.
///
/// The eye sits at `center + orientation * Z * distance`, looking at the
/// center with `orientation * Y` as its up vector.
#[derive(Debug, Clone)]
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    center: Vec3,
    up: Vec3,
    zoom_min: f32,
    zoom_max: f32,
    zoom_speed: f32,
    changed: bool,
}

impl OrbitController {
    pub fn new(options: &OrbitOptions) -> Result<Self, OrbitError> {
        if !(options.zoom_min > 0.0 && options.zoom_min <= options.zoom_max) {
            return Err(OrbitError::InvalidZoomRange {
                min: options.zoom_min,
                max: options.zoom_max,
            });
        }

        let offset = options.eye - options.center;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return Err(OrbitError::EyeAtCenter);
        }

        let up = options.up.normalize_or_zero();
        let back = offset / distance;
        let right = up.cross(back);
        if right.length_squared() <= 1e-8 {
            return Err(OrbitError::ParallelUp);
        }
        let right = right.normalize();
        let cam_up = back.cross(right);
        let orientation = Quat::from_mat3(&Mat3::from_cols(right, cam_up, back)).normalize();

        Ok(Self {
            orientation,
            distance: distance.clamp(options.zoom_min, options.zoom_max),
            center: options.center,
            up,
            zoom_min: options.zoom_min,
            zoom_max: options.zoom_max,
            zoom_speed: options.zoom_speed,
            changed: false,
        })
    }

    pub fn apply(&mut self, action: OrbitAction) {
        match action {
            OrbitAction::Rotate(delta) => self.rotate(delta),
            OrbitAction::Pan(delta) => self.pan(delta),
            OrbitAction::Zoom(lines) => self.zoom(lines),
            OrbitAction::Noop => {}
        }
    }

    /// Returns true once if the transform changed since the previous tick.
    pub fn tick(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn eye(&self) -> Vec3 {
        self.center + self.orientation * Vec3::Z * self.distance
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.center, self.orientation * Vec3::Y)
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            eye: self.eye(),
            target: self.center,
            up: self.orientation * Vec3::Y,
            zoom_min: self.zoom_min,
            zoom_max: self.zoom_max,
        }
    }

    fn rotate(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        // yaw around the world up keeps the horizon level
        let yaw = Quat::from_axis_angle(self.up, -delta.x * ROTATE_SPEED);
        self.orientation = (yaw * self.orientation).normalize();

        let right = self.orientation * Vec3::X;
        let pitch = Quat::from_axis_angle(right, -delta.y * ROTATE_SPEED);
        let pitched = (pitch * self.orientation).normalize();
        let below_pole = (pitched * Vec3::Z).dot(self.up).abs() < MAX_POLE_COS;
        let upright = (pitched * Vec3::Y).dot(self.up) > 0.0;
        if below_pole && upright {
            self.orientation = pitched;
        }
        self.changed = true;
    }

    fn pan(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        let scale = PAN_SPEED * self.distance;
        self.center += right * (-delta.x * scale) + up * (delta.y * scale);
        self.changed = true;
    }

    fn zoom(&mut self, lines: f32) {
        let factor = (-lines * self.zoom_speed * ZOOM_STEP).exp();
        let distance = (self.distance * factor).clamp(self.zoom_min, self.zoom_max);
        if distance != self.distance {
            tracing::trace!(distance, "orbit zoom");
            self.distance = distance;
            self.changed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> OrbitController {
        OrbitController::new(&OrbitOptions::default()).unwrap()
    }

    #[test]
    fn initial_view_matches_look_at() {
        let opts = OrbitOptions::default();
        let orbit = controller();
        let expected = Mat4::look_at_rh(opts.eye, opts.center, opts.up);
        assert!(orbit.view_matrix().abs_diff_eq(expected, 1e-5));
        assert!(orbit.eye().abs_diff_eq(opts.eye, 1e-5));
    }

    #[test]
    fn tick_reports_change_once() {
        let mut orbit = controller();
        assert!(!orbit.tick());
        orbit.apply(OrbitAction::Rotate(Vec2::new(10.0, 0.0)));
        assert!(orbit.tick());
        assert!(!orbit.tick());
    }

    #[test]
    fn noop_does_not_mark_change() {
        let mut orbit = controller();
        orbit.apply(OrbitAction::Noop);
        orbit.apply(OrbitAction::Pan(Vec2::ZERO));
        assert!(!orbit.tick());
    }

    #[test]
    fn rotation_keeps_distance_and_center() {
        let mut orbit = controller();
        let before = orbit.distance();
        orbit.apply(OrbitAction::Rotate(Vec2::new(120.0, -40.0)));
        let state = orbit.state();
        assert_eq!(state.target, Vec3::ZERO);
        assert!((state.distance() - before).abs() < 1e-4);
    }

    #[test]
    fn rotation_stops_short_of_pole() {
        let mut orbit = controller();
        for _ in 0..100 {
            orbit.apply(OrbitAction::Rotate(Vec2::new(0.0, 200.0)));
        }
        let dir = (orbit.eye() - orbit.state().target).normalize();
        assert!(dir.dot(Vec3::Y).abs() < MAX_POLE_COS);
    }

    #[test]
    fn zoom_clamps_to_bounds() {
        let mut orbit = controller();
        orbit.apply(OrbitAction::Zoom(-10_000.0));
        assert_eq!(orbit.distance(), 100.0);
        assert!(orbit.tick());

        orbit.apply(OrbitAction::Zoom(-1.0));
        assert!(!orbit.tick(), "already at zoom_max");

        orbit.apply(OrbitAction::Zoom(10_000.0));
        assert_eq!(orbit.distance(), 0.5);
    }

    #[test]
    fn zoom_in_moves_closer() {
        let mut orbit = controller();
        let before = orbit.distance();
        orbit.apply(OrbitAction::Zoom(1.0));
        assert!(orbit.distance() < before);
    }

    #[test]
    fn pan_moves_center_in_view_plane() {
        let mut orbit = controller();
        let forward = -(orbit.eye() - orbit.state().target).normalize();
        orbit.apply(OrbitAction::Pan(Vec2::new(50.0, 20.0)));
        let moved = orbit.state().target;
        assert_ne!(moved, Vec3::ZERO);
        assert!(moved.dot(forward).abs() < 1e-5);
    }

    #[test]
    fn rejects_degenerate_options() {
        let at_center = OrbitOptions {
            eye: Vec3::ZERO,
            ..OrbitOptions::default()
        };
        assert_eq!(
            OrbitController::new(&at_center).unwrap_err(),
            OrbitError::EyeAtCenter
        );

        let overhead = OrbitOptions {
            eye: Vec3::new(0.0, 5.0, 0.0),
            ..OrbitOptions::default()
        };
        assert_eq!(
            OrbitController::new(&overhead).unwrap_err(),
            OrbitError::ParallelUp
        );

        let inverted = OrbitOptions {
            zoom_min: 10.0,
            zoom_max: 1.0,
            ..OrbitOptions::default()
        };
        assert!(matches!(
            OrbitController::new(&inverted),
            Err(OrbitError::InvalidZoomRange { .. })
        ));
    }
}
