//! Scene environment
//!
//! Static content is built by the scene provider before the render loop
//! starts and never changes afterwards.

use crate::color::Color;

/// Linear distance fog
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fog {
    pub color: Color,
    /// Distance where fog starts
    pub near: f32,
    /// Distance where fog is opaque
    pub far: f32,
}

impl Fog {
    pub fn new(color: Color, near: f32, far: f32) -> Self {
        Self { color, near, far }
    }
}

/// Scene graph root handed to the renderer each frame
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub name: String,
    /// Color the surface is cleared to
    pub clear_color: Color,
    pub fog: Option<Fog>,
    /// Color of the rain points
    pub rain_color: Color,
    /// Rain point size in logical pixels
    pub rain_size: f32,
}

impl Default for Scene {
    fn default() -> Self {
        let night = Color::from_hex(0x262837);
        Self {
            name: "yard".to_string(),
            clear_color: night,
            fog: Some(Fog::new(night, 1.0, 15.0)),
            rain_color: Color::from_hex(0x9fb8d8),
            rain_size: 2.0,
        }
    }
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_fog(mut self, fog: Option<Fog>) -> Self {
        self.fog = fog;
        self
    }

    pub fn with_rain_style(mut self, color: Color, size: f32) -> Self {
        self.rain_color = color;
        self.rain_size = size;
        self
    }
}
