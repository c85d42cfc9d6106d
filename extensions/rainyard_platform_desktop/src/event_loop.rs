//! Desktop event loop implementation using winit

use crate::input;
use crate::window::DesktopWindow;
use rainyard_platform::{
    ControlFlow, Event, EventLoop, InputEvent, LifecycleEvent, MouseEvent, PlatformError,
    WindowConfig, WindowEvent,
};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent as WinitWindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow as WinitControlFlow, EventLoop as WinitEventLoop};
use winit::window::WindowId;

/// Desktop event loop wrapping winit's event loop
pub struct DesktopEventLoop {
    event_loop: WinitEventLoop<()>,
    window_config: WindowConfig,
}

impl DesktopEventLoop {
    /// Create a new desktop event loop
    pub fn new(config: WindowConfig) -> Result<Self, PlatformError> {
        let event_loop =
            WinitEventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;

        // Frames are driven by explicit redraw requests, never by a timer.
        event_loop.set_control_flow(WinitControlFlow::Wait);

        Ok(Self {
            event_loop,
            window_config: config,
        })
    }
}

impl EventLoop for DesktopEventLoop {
    type Window = DesktopWindow;

    fn run<F>(self, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event, &Self::Window) -> ControlFlow + 'static,
    {
        let mut app = DesktopApp::new(self.window_config, handler);
        let run = self.event_loop.run_app(&mut app);
        exit_status(run, app.init_error.take())
    }
}

/// Combine winit's exit result with a failure recorded while starting up
///
/// A window that could not be created ends the loop cleanly as far as winit
/// is concerned, so the recorded failure takes precedence.
fn exit_status(
    run: Result<(), EventLoopError>,
    init_error: Option<PlatformError>,
) -> Result<(), PlatformError> {
    if let Some(err) = init_error {
        return Err(err);
    }
    run.map_err(|e| PlatformError::EventLoop(e.to_string()))
}

/// Internal winit application handler
struct DesktopApp<F>
where
    F: FnMut(Event, &DesktopWindow) -> ControlFlow,
{
    window_config: WindowConfig,
    window: Option<DesktopWindow>,
    handler: F,
    mouse_position: (f32, f32),
    should_exit: bool,
    init_error: Option<PlatformError>,
}

impl<F> DesktopApp<F>
where
    F: FnMut(Event, &DesktopWindow) -> ControlFlow,
{
    fn new(window_config: WindowConfig, handler: F) -> Self {
        Self {
            window_config,
            window: None,
            handler,
            mouse_position: (0.0, 0.0),
            should_exit: false,
            init_error: None,
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(ref window) = self.window {
            let flow = (self.handler)(event, window);
            if flow == ControlFlow::Exit {
                self.should_exit = true;
            }
        }
    }
}

impl<F> ApplicationHandler for DesktopApp<F>
where
    F: FnMut(Event, &DesktopWindow) -> ControlFlow,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match DesktopWindow::new(event_loop, &self.window_config) {
                Ok(window) => {
                    tracing::debug!(
                        "Created window {:?} at scale factor {}",
                        window.winit_window().inner_size(),
                        window.winit_window().scale_factor()
                    );
                    self.window = Some(window);
                    self.handle_event(Event::Lifecycle(LifecycleEvent::Resumed));
                }
                Err(e) => {
                    let err = PlatformError::WindowCreation(e.to_string());
                    tracing::error!("{}", err);
                    self.init_error = Some(err);
                    event_loop.exit();
                }
            }
        }

        if self.should_exit {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WinitWindowEvent,
    ) {
        match event {
            WinitWindowEvent::CloseRequested => {
                self.handle_event(Event::Window(WindowEvent::CloseRequested));
            }

            WinitWindowEvent::Resized(size) => {
                self.handle_event(Event::Window(WindowEvent::Resized {
                    width: size.width,
                    height: size.height,
                }));
            }

            WinitWindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.handle_event(Event::Window(WindowEvent::ScaleFactorChanged {
                    scale_factor,
                }));
            }

            WinitWindowEvent::RedrawRequested => {
                self.handle_event(Event::Frame);
            }

            WinitWindowEvent::KeyboardInput { event, .. } => {
                let input_event = input::convert_keyboard_event(&event.logical_key, event.state);
                self.handle_event(Event::Input(input_event));
            }

            WinitWindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = (position.x as f32, position.y as f32);
                let input_event = input::mouse_moved(self.mouse_position.0, self.mouse_position.1);
                self.handle_event(Event::Input(input_event));
            }

            WinitWindowEvent::MouseInput { state, button, .. } => {
                let (x, y) = self.mouse_position;
                let input_event = input::mouse_button(button, state, x, y);
                self.handle_event(Event::Input(input_event));
            }

            WinitWindowEvent::MouseWheel { delta, .. } => {
                self.handle_event(Event::Input(input::scroll_event(delta)));
            }

            WinitWindowEvent::CursorLeft { .. } => {
                self.handle_event(Event::Input(InputEvent::Mouse(MouseEvent::Left)));
            }

            _ => {}
        }

        if self.should_exit {
            event_loop.exit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_creation_failure_is_reported() {
        let init_error = Some(PlatformError::WindowCreation("no display".to_string()));
        let result = exit_status(Ok(()), init_error);
        assert!(matches!(result, Err(PlatformError::WindowCreation(msg)) if msg == "no display"));
    }

    #[test]
    fn test_clean_exit() {
        assert!(exit_status(Ok(()), None).is_ok());
    }

    #[test]
    fn test_event_loop_error_is_mapped() {
        let result = exit_status(Err(EventLoopError::ExitFailure(3)), None);
        assert!(matches!(result, Err(PlatformError::EventLoop(_))));
    }
}
