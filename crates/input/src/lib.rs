//! Camera input: mouse gestures mapped to orbit actions, and the orbit
//! controller that turns them into a view matrix.
//!
//! # Invariants
//! - The controller is the only writer of camera state.
//! - Distance to the orbit center stays within `[zoom_min, zoom_max]`.
//! - `tick()` reports each change exactly once.

pub mod action;
pub mod orbit;

pub use action::{DragButton, OrbitAction, PointerGesture};
pub use orbit::{OrbitController, OrbitError};
