//! Shared data model: camera state, orbit options, surface extent, clear color.
//!
//! # Invariants
//! - Every type here is plain data; nothing owns a GPU handle.
//! - A `SurfaceExtent` is never zero in either dimension.

pub mod types;

pub use types::{CameraState, ClearColor, OrbitOptions, SurfaceExtent};
