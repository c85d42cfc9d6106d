//! Rainyard Desktop Platform
//!
//! Windowing and input for macOS, Windows, and Linux using winit.
//!
//! # Example
//!
//! ```ignore
//! use rainyard_platform::prelude::*;
//! use rainyard_platform_desktop::DesktopPlatform;
//!
//! fn main() -> Result<()> {
//!     let platform = DesktopPlatform::new()?;
//!     let event_loop = platform.create_event_loop(WindowConfig::default())?;
//!
//!     event_loop.run(|event, window| {
//!         if let Event::Frame = event {
//!             // Render frame here
//!             window.request_redraw();
//!         }
//!         ControlFlow::Continue
//!     })
//! }
//! ```

pub mod event_loop;
pub mod input;
pub mod window;

pub use event_loop::DesktopEventLoop;
pub use window::DesktopWindow;

use rainyard_platform::{Platform, PlatformError, WindowConfig};

/// Desktop platform implementation
pub struct DesktopPlatform;

impl Platform for DesktopPlatform {
    type Window = DesktopWindow;
    type EventLoop = DesktopEventLoop;

    fn new() -> Result<Self, PlatformError> {
        Ok(Self)
    }

    fn create_event_loop(&self, config: WindowConfig) -> Result<Self::EventLoop, PlatformError> {
        DesktopEventLoop::new(config)
    }

    fn name(&self) -> &'static str {
        "desktop"
    }
}
