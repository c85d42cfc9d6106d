//! Event loop and platform events

use crate::error::PlatformError;
use crate::input::InputEvent;
use crate::window::Window;

/// Event loop abstraction
///
/// Events are delivered one at a time on the thread that called `run`, so a
/// resize is always handled fully before or fully after a frame.
pub trait EventLoop {
    /// The window type for this event loop
    type Window: Window;

    /// Run the event loop
    ///
    /// Blocks until the application exits. The handler is called for each
    /// event and returns a `ControlFlow` to continue or exit.
    fn run<F>(self, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event, &Self::Window) -> ControlFlow + 'static;
}

/// Control flow after handling an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Continue running the event loop
    #[default]
    Continue,
    /// Exit the event loop
    Exit,
}

/// Platform events
#[derive(Clone, Debug)]
pub enum Event {
    /// Window-related event
    Window(WindowEvent),
    /// Input event (mouse, keyboard)
    Input(InputEvent),
    /// Application lifecycle event
    Lifecycle(LifecycleEvent),
    /// The display is ready for the next frame
    ///
    /// Delivered after `Window::request_redraw`, paced by the compositor.
    Frame,
}

/// Window events
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// Window was resized
    Resized {
        /// New width in physical pixels
        width: u32,
        /// New height in physical pixels
        height: u32,
    },
    /// Window close was requested
    CloseRequested,
    /// Display scale factor changed
    ScaleFactorChanged {
        /// New scale factor
        scale_factor: f64,
    },
}

/// Application lifecycle events
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Application resumed; the window exists from here on
    Resumed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_flow_default() {
        assert_eq!(ControlFlow::default(), ControlFlow::Continue);
    }
}
