//! Window abstraction and configuration

/// Window configuration
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial width in logical pixels
    pub width: u32,
    /// Initial height in logical pixels
    pub height: u32,
    /// Whether the window can be resized
    pub resizable: bool,
    /// Whether to start in borderless fullscreen
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Rainyard".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
            fullscreen: false,
        }
    }
}

impl WindowConfig {
    /// Create a new window configuration with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the window size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set whether the window is resizable
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set whether to start in fullscreen
    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }
}

/// Window abstraction trait
///
/// Implemented by platform-specific window types.
pub trait Window {
    /// Window size in physical pixels
    fn size(&self) -> (u32, u32);

    /// Window size in logical pixels
    fn logical_size(&self) -> (f32, f32) {
        let (width, height) = self.size();
        let scale = self.scale_factor();
        (
            (width as f64 / scale) as f32,
            (height as f64 / scale) as f32,
        )
    }

    /// Display scale factor (device pixel ratio)
    fn scale_factor(&self) -> f64;

    /// Ask for one `Event::Frame` at the display's next refresh
    fn request_redraw(&self);
}
