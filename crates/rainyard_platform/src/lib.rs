//! Rainyard Platform Abstraction Layer
//!
//! Platform-agnostic traits and types for windowing, input handling and the
//! display-driven frame cadence the render loop runs on.
//!
//! # Architecture
//!
//! - [`Platform`] - The top-level platform abstraction
//! - [`Window`] - Window size, scale factor and redraw requests
//! - [`EventLoop`] - Event delivery on the single UI thread
//!
//! The only implementation today is `rainyard_platform_desktop` (winit).
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
//!         match event {
//!             Event::Frame => {
//!                 // Advance and render one frame, then window.request_redraw()
//!             }
//!             Event::Window(WindowEvent::CloseRequested) => {
//!                 return ControlFlow::Exit;
//!             }
//!             _ => {}
//!         }
//!         ControlFlow::Continue
//!     })
//! }
//! ```

mod error;
mod event;
mod input;
mod platform;
mod window;

pub use error::{PlatformError, Result};
pub use event::{ControlFlow, Event, EventLoop, LifecycleEvent, WindowEvent};
pub use input::{InputEvent, Key, KeyState, KeyboardEvent, MouseButton, MouseEvent};
pub use platform::Platform;
pub use window::{Window, WindowConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{ControlFlow, Event, EventLoop, LifecycleEvent, WindowEvent};
    pub use crate::input::{InputEvent, Key, KeyState, KeyboardEvent, MouseButton, MouseEvent};
    pub use crate::platform::Platform;
    pub use crate::window::{Window, WindowConfig};
}
