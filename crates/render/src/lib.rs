//! Rendering core: everything the frame loop computes before touching a GPU.
//!
//! # Invariants
//! - Nothing here allocates or touches GPU resources.
//! - `mvp = view_projection * model`, with the model spin left-multiplied each frame.
//! - View-projection is a pure function of aspect ratio and `ViewConfig`.

mod frame;
mod geometry;
mod pacing;
mod renderer;
mod spin;
mod view;

pub use frame::{FrameState, FrameUniforms};
pub use geometry::Cube;
pub use pacing::FramePacer;
pub use renderer::{DebugTextRenderer, Renderer};
pub use spin::{DEFAULT_SPIN_STEP, ModelSpin};
pub use view::{ViewConfig, ViewProjection};

pub fn crate_info() -> &'static str {
    "spincube-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
