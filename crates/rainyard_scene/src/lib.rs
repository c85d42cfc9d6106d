//! # Rainyard Scene
//!
//! The time-varying parts of the Rainyard night scene and the types the
//! render loop hands to a renderer:
//!
//! - [`ParticleField`] and [`advance`] - the falling rain point cloud
//! - [`PerspectiveCamera`] - projection state kept in sync with the viewport
//! - [`OrbitControls`] - damped orbit/zoom/pan camera control
//! - [`Scene`] - the pre-built environment (clear color, fog)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rainyard_scene::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let settings = RainSettings::default();
//! let mut rain = ParticleField::scatter(settings.count, settings.spread, settings.reset_height, &mut rng)?;
//! advance(&mut rain, settings.floor_y, settings.reset_height, &mut rng)?;
//! ```

pub mod camera;
pub mod color;
pub mod controls;
pub mod math;
pub mod particles;
pub mod scene;

pub use camera::PerspectiveCamera;
pub use color::Color;
pub use controls::{CameraControl, OrbitControls};
pub use math::{Mat4, Vec3};
pub use particles::{
    advance, ParticleError, ParticleField, RainSettings, RandomSource, FALL_STEP, MAX_PARTICLES,
};
pub use scene::{Fog, Scene};

/// Prelude for common imports
pub mod prelude {
    pub use crate::camera::PerspectiveCamera;
    pub use crate::color::Color;
    pub use crate::controls::{CameraControl, OrbitControls};
    pub use crate::math::{Mat4, Vec3};
    pub use crate::particles::{
        advance, ParticleError, ParticleField, RainSettings, RandomSource, FALL_STEP,
        MAX_PARTICLES,
    };
    pub use crate::scene::{Fog, Scene};
}
