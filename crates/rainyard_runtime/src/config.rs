//! Rainyard configuration file handling
//!
//! Configuration lives in `rainyard.toml`. Every section and key is optional;
//! missing values take the defaults below.
//!
//! ```toml
//! [window]
//! title = "Rainyard"
//! width = 1280
//! height = 720
//!
//! [rain]
//! count = 1000
//! spread = 20.0
//! floor_y = -1.0
//! reset_height = 10.0
//! seed = 42
//!
//! [viewport]
//! max_pixel_ratio = 2.0
//!
//! [camera]
//! fov_degrees = 75.0
//! position = [4.0, 2.0, 5.0]
//!
//! [controls]
//! enable_damping = true
//! damping_factor = 0.05
//!
//! [scene]
//! clear_color = "#262837"
//! fog_color = "#262837"
//! fog_near = 1.0
//! fog_far = 15.0
//! ```

use crate::error::ConfigError;
use crate::viewport::DEFAULT_MAX_PIXEL_RATIO;
use rainyard_platform::WindowConfig;
use rainyard_scene::{
    Color, Fog, OrbitControls, PerspectiveCamera, RainSettings, Scene, Vec3, MAX_PARTICLES,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "rainyard.toml";

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RainyardConfig {
    pub window: WindowSection,
    pub rain: RainConfig,
    pub viewport: ViewportConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub scene: SceneConfig,
}

/// `[window]`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowSection {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub fullscreen: bool,
}

impl Default for WindowSection {
    fn default() -> Self {
        let window = WindowConfig::default();
        Self {
            title: window.title,
            width: window.width,
            height: window.height,
            resizable: window.resizable,
            fullscreen: window.fullscreen,
        }
    }
}

/// `[rain]`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RainConfig {
    pub count: usize,
    pub spread: f32,
    pub floor_y: f32,
    pub reset_height: f32,
    /// Seed for reproducible rain; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub color: String,
    /// Point size in logical pixels
    pub size: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        let settings = RainSettings::default();
        Self {
            count: settings.count,
            spread: settings.spread,
            floor_y: settings.floor_y,
            reset_height: settings.reset_height,
            seed: None,
            color: "#9fb8d8".to_string(),
            size: 2.0,
        }
    }
}

/// `[viewport]`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub max_pixel_ratio: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
        }
    }
}

/// `[camera]`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            position: [4.0, 2.0, 5.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// `[controls]`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.5,
            max_distance: 50.0,
        }
    }
}

/// `[scene]`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SceneConfig {
    pub name: String,
    pub clear_color: String,
    pub fog: bool,
    pub fog_color: String,
    pub fog_near: f32,
    pub fog_far: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "yard".to_string(),
            clear_color: "#262837".to_string(),
            fog: true,
            fog_color: "#262837".to_string(),
            fog_near: 1.0,
            fog_far: 15.0,
        }
    }
}

impl RainyardConfig {
    /// Parse a config from TOML text and validate it
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            tracing::info!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Serialize the effective config
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check ranges and colors
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(invalid(field, format!("must be positive, got {value}")))
            }
        }

        if self.rain.count > MAX_PARTICLES {
            return Err(invalid(
                "rain.count",
                format!("must be at most {MAX_PARTICLES}, got {}", self.rain.count),
            ));
        }
        positive("rain.spread", self.rain.spread)?;
        positive("rain.reset_height", self.rain.reset_height)?;
        positive("rain.size", self.rain.size)?;
        if !self.rain.floor_y.is_finite() {
            return Err(invalid("rain.floor_y", "must be finite"));
        }
        positive("viewport.max_pixel_ratio", self.viewport.max_pixel_ratio)?;

        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(invalid("camera.fov_degrees", "must be in (0, 180)"));
        }
        positive("camera.near", self.camera.near)?;
        if self.camera.far <= self.camera.near {
            return Err(invalid("camera.far", "must be greater than camera.near"));
        }

        if !(self.controls.damping_factor > 0.0 && self.controls.damping_factor <= 1.0) {
            return Err(invalid("controls.damping_factor", "must be in (0, 1]"));
        }
        if self.controls.min_distance > self.controls.max_distance {
            return Err(invalid(
                "controls.min_distance",
                "must not exceed controls.max_distance",
            ));
        }

        if self.scene.fog && self.scene.fog_far < self.scene.fog_near {
            return Err(invalid("scene.fog_far", "must not be less than scene.fog_near"));
        }

        for (field, value) in [
            ("scene.clear_color", &self.scene.clear_color),
            ("scene.fog_color", &self.scene.fog_color),
            ("rain.color", &self.rain.color),
        ] {
            value
                .parse::<Color>()
                .map_err(|e| invalid(field, e.to_string()))?;
        }

        Ok(())
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig::new(self.window.title.clone())
            .size(self.window.width, self.window.height)
            .resizable(self.window.resizable)
            .fullscreen(self.window.fullscreen)
    }

    pub fn rain_settings(&self) -> RainSettings {
        RainSettings {
            count: self.rain.count,
            spread: self.rain.spread,
            floor_y: self.rain.floor_y,
            reset_height: self.rain.reset_height,
        }
    }

    /// Camera with the configured lens and pose; aspect is set by the viewport
    pub fn camera(&self) -> PerspectiveCamera {
        let aspect = self.window.width.max(1) as f32 / self.window.height.max(1) as f32;
        PerspectiveCamera::new(
            self.camera.fov_degrees.to_radians(),
            aspect,
            self.camera.near,
            self.camera.far,
        )
        .with_position(Vec3::from(self.camera.position))
        .with_target(Vec3::from(self.camera.target))
    }

    pub fn orbit_controls(&self) -> OrbitControls {
        let mut controls = OrbitControls::new(Vec3::from(self.camera.target))
            .with_damping(self.controls.enable_damping, self.controls.damping_factor);
        controls.rotate_speed = self.controls.rotate_speed;
        controls.zoom_speed = self.controls.zoom_speed;
        controls.pan_speed = self.controls.pan_speed;
        controls.min_distance = self.controls.min_distance;
        controls.max_distance = self.controls.max_distance;
        controls
    }

    /// Build the scene environment (colors must already be validated)
    pub fn scene(&self) -> Result<Scene, ConfigError> {
        let color = |field: &'static str, value: &str| {
            value.parse::<Color>().map_err(|e| ConfigError::Invalid {
                field,
                reason: e.to_string(),
            })
        };

        let fog = if self.scene.fog {
            Some(Fog::new(
                color("scene.fog_color", &self.scene.fog_color)?,
                self.scene.fog_near,
                self.scene.fog_far,
            ))
        } else {
            None
        };

        Ok(Scene::new(self.scene.name.clone())
            .with_clear_color(color("scene.clear_color", &self.scene.clear_color)?)
            .with_fog(fog)
            .with_rain_style(color("rain.color", &self.rain.color)?, self.rain.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = RainyardConfig::from_toml("").unwrap();
        assert_eq!(config, RainyardConfig::default());
        assert_eq!(config.rain.count, 1000);
        assert_eq!(config.viewport.max_pixel_ratio, 2.0);
    }

    #[test]
    fn test_partial_sections_merge_with_defaults() {
        let config = RainyardConfig::from_toml(
            r#"
            [rain]
            count = 250
            seed = 9

            [camera]
            fov_degrees = 60.0
            "#,
        )
        .unwrap();
        assert_eq!(config.rain.count, 250);
        assert_eq!(config.rain.seed, Some(9));
        assert_eq!(config.rain.spread, 20.0);
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.camera.position, [4.0, 2.0, 5.0]);
    }

    #[test]
    fn test_rejects_inverted_fog() {
        let err = RainyardConfig::from_toml(
            r#"
            [scene]
            fog_near = 10.0
            fog_far = 2.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "scene.fog_far", .. }));
    }

    #[test]
    fn test_rejects_bad_color() {
        let err = RainyardConfig::from_toml("[scene]\nclear_color = \"navy\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "scene.clear_color",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_unknown_types() {
        let err = RainyardConfig::from_toml("[rain]\ncount = \"many\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_particles_is_allowed() {
        let config = RainyardConfig::from_toml("[rain]\ncount = 0\n").unwrap();
        assert_eq!(config.rain_settings().count, 0);
    }

    #[test]
    fn test_rejects_more_particles_than_a_field_holds() {
        let err = RainyardConfig::from_toml("[rain]\ncount = 20000000\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "rain.count", .. }));

        let limit = format!("[rain]\ncount = {MAX_PARTICLES}\n");
        assert!(RainyardConfig::from_toml(&limit).is_ok());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut config = RainyardConfig::default();
        config.rain.seed = Some(3);
        let text = config.to_toml().unwrap();
        assert_eq!(RainyardConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_builds_runtime_objects() {
        let config = RainyardConfig::default();
        let camera = config.camera();
        assert!((camera.fov - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.position, Vec3::new(4.0, 2.0, 5.0));

        let scene = config.scene().unwrap();
        assert_eq!(scene.clear_color, Color::from_hex(0x262837));
        assert_eq!(scene.fog.map(|f| (f.near, f.far)), Some((1.0, 15.0)));

        let controls = config.orbit_controls();
        assert!(controls.enable_damping);
        assert_eq!(controls.damping_factor, 0.05);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config =
            RainyardConfig::load_or_default(Path::new("/nonexistent/rainyard.toml")).unwrap();
        assert_eq!(config, RainyardConfig::default());
    }
}
