//! Orbit camera controls
//!
//! Orbits around a target point like a 3D modelling tool: drag to rotate,
//! drag with the secondary button to pan, scroll to dolly.

use super::CameraControl;
use crate::camera::PerspectiveCamera;
use crate::math::Vec3;
use std::f32::consts::{PI, TAU};

/// Keeps the polar angle off the poles so the up vector stays defined
const POLE_EPSILON: f32 = 1e-6;

/// Below this, pending motion is dropped instead of decayed further
const REST_EPSILON: f32 = 1e-6;

/// What a pointer drag does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Damped orbit controls
///
/// Pointer input accumulates pending motion. Each [`update`](CameraControl::update)
/// applies a `damping_factor` share of what is pending and decays the rest,
/// so the camera eases to a stop after the pointer is released. With damping
/// disabled pending motion is applied in full on the next update.
///
/// # Example
///
/// ```ignore
/// let mut controls = OrbitControls::new(Vec3::ZERO);
/// controls.pointer_down(DragMode::Rotate, 100.0, 100.0);
/// controls.pointer_move(140.0, 100.0, 720.0);
/// controls.update(&mut camera);
/// ```
#[derive(Clone, Debug)]
pub struct OrbitControls {
    /// Point to orbit around
    pub target: Vec3,
    /// Ease toward the input instead of applying it at once
    pub enable_damping: bool,
    /// Share of pending motion applied per update (0..1]
    pub damping_factor: f32,
    /// Rotation sensitivity multiplier
    pub rotate_speed: f32,
    /// Dolly sensitivity multiplier
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier
    pub pan_speed: f32,

    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
    /// Minimum polar angle (radians, 0 = looking straight down)
    pub min_polar_angle: f32,
    /// Maximum polar angle (radians, PI = looking straight up)
    pub max_polar_angle: f32,

    /// Whether input is accepted
    pub enabled: bool,

    // Pending motion
    delta_azimuth: f32,
    delta_polar: f32,
    pan_offset: Vec3,
    scale: f32,

    // Drag state: mode and last pointer position
    drag: Option<(DragMode, f32, f32)>,

    // Camera basis after the last update, used to turn pixels into world units
    right: Vec3,
    up: Vec3,
    half_height: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl OrbitControls {
    /// Create controls orbiting `target`
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,

            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,

            enabled: true,

            delta_azimuth: 0.0,
            delta_polar: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,

            drag: None,

            right: Vec3::new(1.0, 0.0, 0.0),
            up: Vec3::UP,
            half_height: 1.0,
        }
    }

    /// Configure damping
    pub fn with_damping(mut self, enabled: bool, factor: f32) -> Self {
        self.enable_damping = enabled;
        self.damping_factor = factor.clamp(f32::EPSILON, 1.0);
        self
    }

    /// Queue a rotation around the target (radians)
    ///
    /// Positive `azimuth` swings the camera to the left of the target,
    /// positive `polar` raises it, matching a drag right/down.
    pub fn rotate(&mut self, azimuth: f32, polar: f32) {
        if !self.enabled {
            return;
        }
        self.delta_azimuth -= azimuth;
        self.delta_polar -= polar;
    }

    /// Queue a dolly toward (`scroll > 0`) or away from the target, in wheel lines
    pub fn zoom(&mut self, scroll: f32) {
        if !self.enabled || scroll == 0.0 {
            return;
        }
        let step = 0.95f32.powf(self.zoom_speed * scroll.abs());
        if scroll > 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    /// Queue a pan by a screen-space offset in pixels
    ///
    /// The target moves so that a point at target depth follows the pointer.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enabled || viewport_height <= 0.0 {
            return;
        }
        let world_per_pixel = 2.0 * self.half_height * self.pan_speed / viewport_height;
        self.pan_offset -= self.right * (dx * world_per_pixel);
        self.pan_offset += self.up * (dy * world_per_pixel);
    }

    /// Start a drag at window position (x, y)
    pub fn pointer_down(&mut self, mode: DragMode, x: f32, y: f32) {
        if self.enabled {
            self.drag = Some((mode, x, y));
        }
    }

    /// Continue a drag; `viewport_height` is in the same units as x/y
    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: f32) {
        let Some((mode, last_x, last_y)) = self.drag else {
            return;
        };
        self.drag = Some((mode, x, y));
        if viewport_height <= 0.0 {
            return;
        }

        let dx = x - last_x;
        let dy = y - last_y;
        match mode {
            DragMode::Rotate => {
                let per_pixel = TAU * self.rotate_speed / viewport_height;
                self.rotate(dx * per_pixel, dy * per_pixel);
            }
            DragMode::Pan => self.pan(dx, dy, viewport_height),
        }
    }

    /// End any drag in progress
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Whether any queued motion is still being eased in
    pub fn is_moving(&self) -> bool {
        self.delta_azimuth.abs() > REST_EPSILON
            || self.delta_polar.abs() > REST_EPSILON
            || self.pan_offset.length() > REST_EPSILON
            || (self.scale - 1.0).abs() > REST_EPSILON
    }

    fn settle(&mut self) {
        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.delta_azimuth *= keep;
            self.delta_polar *= keep;
            self.pan_offset = self.pan_offset * keep;
            if !self.is_moving() {
                self.delta_azimuth = 0.0;
                self.delta_polar = 0.0;
                self.pan_offset = Vec3::ZERO;
            }
        } else {
            self.delta_azimuth = 0.0;
            self.delta_polar = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
    }
}

impl CameraControl for OrbitControls {
    fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let (mut azimuth, mut polar) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        azimuth += self.delta_azimuth * share;
        polar += self.delta_polar * share;
        polar = polar
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * share;

        let (sin_p, cos_p) = polar.sin_cos();
        let (sin_a, cos_a) = azimuth.sin_cos();
        camera.position =
            self.target + Vec3::new(radius * sin_p * sin_a, radius * cos_p, radius * sin_p * cos_a);
        camera.target = self.target;

        let forward = (camera.target - camera.position).normalize();
        self.right = forward.cross(camera.up).normalize();
        self.up = self.right.cross(forward);
        self.half_height = radius * (camera.effective_fov() / 2.0).tan();

        self.settle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(75f32.to_radians(), 1.5, 0.1, 100.0)
            .with_position(Vec3::new(4.0, 2.0, 5.0))
            .with_target(Vec3::ZERO)
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_idle_update_keeps_camera() {
        let mut cam = camera();
        let start = cam.position;
        let mut controls = OrbitControls::new(Vec3::ZERO);
        for _ in 0..10 {
            controls.update(&mut cam);
        }
        assert!(close(cam.position, start));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn test_damped_rotation_eases_in() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::ZERO).with_damping(true, 0.05);
        controls.rotate(0.5, 0.0);

        controls.update(&mut cam);
        let first = cam.position;
        assert!(controls.is_moving());

        for _ in 0..500 {
            controls.update(&mut cam);
        }
        assert!(!controls.is_moving());
        // Moved further after the first step, distance preserved
        assert!((cam.position - first).length() > 0.0);
        assert!((cam.position.length() - Vec3::new(4.0, 2.0, 5.0).length()).abs() < 1e-3);
    }

    #[test]
    fn test_undamped_rotation_applies_at_once() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::ZERO).with_damping(false, 0.05);
        let start_azimuth = cam.position.x.atan2(cam.position.z);
        controls.rotate(0.25, 0.0);
        controls.update(&mut cam);

        let azimuth = cam.position.x.atan2(cam.position.z);
        assert!((azimuth - (start_azimuth - 0.25)).abs() < 1e-4);
        assert!(!controls.is_moving());
    }

    #[test]
    fn test_zoom_respects_distance_limits() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.min_distance = 2.0;
        for _ in 0..200 {
            controls.zoom(5.0);
            controls.update(&mut cam);
        }
        assert!((cam.position.length() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_polar_angle_never_reaches_pole() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::ZERO).with_damping(false, 1.0);
        controls.rotate(0.0, -10.0);
        controls.update(&mut cam);
        assert!(cam.position.y < cam.position.length());
        assert!(cam.view_matrix().cols.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_drag_requires_pointer_down() {
        let mut cam = camera();
        let start = cam.position;
        let mut controls = OrbitControls::new(Vec3::ZERO).with_damping(false, 1.0);
        controls.pointer_move(300.0, 300.0, 720.0);
        controls.update(&mut cam);
        assert!(close(cam.position, start));

        controls.pointer_down(DragMode::Rotate, 0.0, 0.0);
        controls.pointer_move(36.0, 0.0, 720.0);
        controls.pointer_up();
        assert!(controls.drag.is_none());
        controls.update(&mut cam);
        assert!(!close(cam.position, start));
    }

    #[test]
    fn test_pan_moves_target_and_camera_together() {
        let mut cam = camera();
        let mut controls = OrbitControls::new(Vec3::ZERO).with_damping(false, 1.0);
        controls.update(&mut cam);
        let offset = cam.position - cam.target;

        controls.pointer_down(DragMode::Pan, 0.0, 0.0);
        controls.pointer_move(100.0, 0.0, 720.0);
        controls.update(&mut cam);

        assert!(controls.target.length() > 0.0);
        assert!(close(cam.position - cam.target, offset));
    }

    #[test]
    fn test_disabled_controls_ignore_input() {
        let mut cam = camera();
        let start = cam.position;
        let mut controls = OrbitControls::new(Vec3::ZERO);
        controls.enabled = false;
        controls.rotate(1.0, 1.0);
        controls.zoom(3.0);
        controls.update(&mut cam);
        assert!(close(cam.position, start));
    }
}
