//! wgpu render backend for the spinning cube.
//!
//! Bootstraps one device and surface, uploads the cube once, and draws it
//! every frame with a single pipeline and a single 64-byte uniform.
//!
//! # Invariants
//! - `GpuContext` is the only owner of the device and queue; every component
//!   receives it explicitly.
//! - Geometry buffers are written once at creation and never mutated.
//! - The uniform buffer is overwritten at offset 0 once per frame, by the cube pass only.

mod buffer;
mod context;
mod error;
mod gpu;
mod shaders;

pub use buffer::create_buffer;
pub use context::{GpuContext, GpuInit, SurfaceErrorAction, SurfaceTarget};
pub use error::GpuError;
pub use gpu::{CubePass, DEPTH_FORMAT, WgpuRenderer};
