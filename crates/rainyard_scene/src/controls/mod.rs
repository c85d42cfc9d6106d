//! Interactive camera controls
//!
//! The render loop treats a control as a black box with one per-frame
//! `update`. [`OrbitControls`] is the interactive implementation; input is
//! fed to it between frames and eased in over subsequent updates.

mod orbit;

pub use orbit::{DragMode, OrbitControls};

use crate::camera::PerspectiveCamera;

/// Per-frame camera control update
pub trait CameraControl {
    /// Move the camera toward the control's target state
    ///
    /// Called exactly once per frame, after simulation and before render.
    fn update(&mut self, camera: &mut PerspectiveCamera);
}

/// A control that never moves the camera
impl CameraControl for () {
    fn update(&mut self, _camera: &mut PerspectiveCamera) {}
}
