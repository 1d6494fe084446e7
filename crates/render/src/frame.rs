use crate::spin::ModelSpin;
use crate::view::{ViewConfig, ViewProjection, projection_matrix};
use glam::Mat4;

/// Everything the GPU side needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
    pub spin_angle: f32,
    pub mvp: Mat4,
}

impl FrameUniforms {
    /// Column-major floats, in the order the uniform buffer expects.
    pub fn mvp_cols(&self) -> [f32; 16] {
        self.mvp.to_cols_array()
    }
}

/// CPU half of the render loop: camera recombination, spin, MVP.
///
/// Owned by the render loop alone; no other writer touches the spin or the
/// matrices between frames.
#[derive(Debug, Clone)]
pub struct FrameState {
    config: ViewConfig,
    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
    spin: ModelSpin,
    frame_index: u64,
}

impl FrameState {
    pub fn new(view_projection: &ViewProjection, config: ViewConfig, spin: ModelSpin) -> Self {
        Self {
            config,
            view: view_projection.view,
            projection: view_projection.projection,
            view_projection: view_projection.view_projection,
            spin,
            frame_index: 0,
        }
    }

    /// Replace the view matrix after the camera moved.
    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.view_projection = self.projection * view;
    }

    /// Rebuild the projection for a new aspect ratio, keeping the current view.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection = projection_matrix(aspect, &self.config);
        self.view_projection = self.projection * self.view;
        tracing::debug!(aspect, "projection rebuilt");
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    pub fn model(&self) -> Mat4 {
        self.spin.matrix()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advance the spin one step and compute this frame's uniforms.
    pub fn advance(&mut self) -> FrameUniforms {
        self.spin.advance();
        let uniforms = FrameUniforms {
            frame_index: self.frame_index,
            spin_angle: self.spin.angle(),
            mvp: self.view_projection * self.spin.matrix(),
        };
        self.frame_index += 1;
        uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn state(aspect: f32, step: f32) -> FrameState {
        let config = ViewConfig::default();
        let vp = ViewProjection::new(aspect, &config);
        FrameState::new(&vp, config, ModelSpin::new(step))
    }

    #[test]
    fn identity_view_projection_and_model_give_identity() {
        let mut frame = state(1.0, 0.0);
        frame.projection = Mat4::IDENTITY;
        frame.set_view(Mat4::IDENTITY);
        let uniforms = frame.advance();
        assert_eq!(uniforms.mvp, Mat4::IDENTITY);
    }

    #[test]
    fn mvp_is_view_projection_times_model() {
        let mut frame = state(1.0, 0.25);
        let uniforms = frame.advance();
        assert_eq!(uniforms.mvp, frame.view_projection() * frame.model());
        assert_eq!(uniforms.mvp, frame.view_projection() * Mat4::from_rotation_y(0.25));
    }

    #[test]
    fn frame_index_counts_up() {
        let mut frame = state(1.0, 0.01);
        assert_eq!(frame.advance().frame_index, 0);
        assert_eq!(frame.advance().frame_index, 1);
        assert_eq!(frame.frame_index(), 2);
    }

    #[test]
    fn set_view_recombines_with_stored_projection() {
        let mut frame = state(2.0, 0.01);
        let projection = Mat4::perspective_rh(1.25, 2.0, 0.1, 1000.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        frame.set_view(view);
        assert_eq!(frame.view_projection(), projection * view);
    }

    #[test]
    fn set_aspect_keeps_view() {
        let mut frame = state(1.0, 0.01);
        let config = ViewConfig::default();
        let view = Mat4::look_at_rh(config.eye, config.target, config.up);
        frame.set_aspect(0.5);
        let expected = Mat4::perspective_rh(1.25, 0.5, 0.1, 1000.0) * view;
        assert_eq!(frame.view_projection(), expected);
    }

    #[test]
    fn mvp_cols_are_column_major() {
        let mut frame = state(1.0, 0.0);
        let uniforms = frame.advance();
        let cols = uniforms.mvp_cols();
        assert_eq!(&cols[12..16], &uniforms.mvp.w_axis.to_array()[..]);
    }
}
