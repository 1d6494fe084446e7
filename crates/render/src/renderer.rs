use crate::frame::FrameUniforms;
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes the uniforms computed by `FrameState` and produces
/// output. It never feeds anything back into the frame state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&mut self, frame: &FrameUniforms) -> Self::Output;
}

/// Renders a frame as text: index, spin angle, and MVP rows.
///
/// Useful for CLI output, logging, and testing the render interface without a GPU.
#[derive(Debug)]
pub struct DebugTextRenderer {
    precision: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self { precision: 3 }
    }

    pub fn with_precision(precision: usize) -> Self {
        Self { precision }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &FrameUniforms) -> String {
        let p = self.precision;
        let mut out = format!(
            "=== Frame {} (spin={:.p$} rad) ===\n",
            frame.frame_index, frame.spin_angle
        );
        for r in 0..4 {
            let row = frame.mvp.row(r);
            // writing into a String cannot fail
            let _ = writeln!(
                out,
                "  [{:>w$.p$} {:>w$.p$} {:>w$.p$} {:>w$.p$}]",
                row.x,
                row.y,
                row.z,
                row.w,
                w = p + 4,
            );
        }
        out
    }
}
