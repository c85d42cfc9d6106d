//! Platform trait

use crate::error::PlatformError;
use crate::event::EventLoop;
use crate::window::{Window, WindowConfig};

/// Platform abstraction trait
///
/// Implemented by each platform backend to create the event loop that owns
/// the window and drives the frame cadence.
pub trait Platform {
    /// The window type for this platform
    type Window: Window;
    /// The event loop type for this platform
    type EventLoop: EventLoop<Window = Self::Window>;

    /// Create a new platform instance
    fn new() -> Result<Self, PlatformError>
    where
        Self: Sized;

    /// Create an event loop whose window uses the given configuration
    fn create_event_loop(&self, config: WindowConfig) -> Result<Self::EventLoop, PlatformError>;

    /// Get the platform name, e.g. "desktop"
    fn name(&self) -> &'static str;
}
