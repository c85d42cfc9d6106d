//! Perspective camera

use crate::math::{Mat4, Vec3};

/// Perspective camera for 3D rendering
///
/// The projection matrix is cached. Changing `fov`, `aspect`, `near`, `far`
/// or `zoom` has no effect on rendering until
/// [`update_projection_matrix`](Self::update_projection_matrix) runs.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// Field of view in radians (vertical)
    pub fov: f32,
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    /// Zoom factor (1.0 = normal)
    pub zoom: f32,
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 1000.0)
    }
}

impl PerspectiveCamera {
    /// Create a new perspective camera
    ///
    /// # Arguments
    /// * `fov` - Field of view in radians (vertical)
    /// * `aspect` - Aspect ratio (width / height)
    /// * `near` - Near clipping plane
    /// * `far` - Far clipping plane
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            zoom: 1.0,
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Set the eye position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the look-at target
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Set the aspect ratio. Call `update_projection_matrix` afterwards.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Effective field of view (accounting for zoom)
    pub fn effective_fov(&self) -> f32 {
        2.0 * ((self.fov / 2.0).tan() / self.zoom).atan()
    }

    /// Recompute the cached projection matrix from the current parameters
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.effective_fov(), self.aspect, self.near, self.far);
    }

    /// The cached projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// View matrix from position/target/up
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Combined `projection * view`
    pub fn view_projection(&self) -> Mat4 {
        self.projection.mul(&self.view_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_is_cached_until_update() {
        let mut camera = PerspectiveCamera::new(1.2, 1.0, 0.1, 100.0);
        let before = camera.projection_matrix();

        camera.set_aspect(2.0);
        assert_eq!(camera.projection_matrix(), before);

        camera.update_projection_matrix();
        let after = camera.projection_matrix();
        assert_ne!(after, before);
        // x scale halves when aspect doubles
        assert!((after.cols[0][0] * 2.0 - before.cols[0][0]).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_narrows_fov() {
        let mut camera = PerspectiveCamera::default();
        let base = camera.effective_fov();
        camera.zoom = 2.0;
        assert!(camera.effective_fov() < base);
    }
}
