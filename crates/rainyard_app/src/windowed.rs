//! Windowed application runner
//!
//! Creates the window and GPU renderer, then routes platform events:
//! frames to the [`RenderLoop`], size changes to the
//! [`ViewportSynchronizer`] and pointer input to the orbit controls.

use crate::error::{AppError, Result};
use crate::renderer::GpuRenderer;
use rainyard_platform::{
    ControlFlow, Event, EventLoop, InputEvent, Key, KeyState, LifecycleEvent, MouseButton,
    MouseEvent, Platform, Window, WindowEvent,
};
use rainyard_platform_desktop::{DesktopPlatform, DesktopWindow};
use rainyard_runtime::{
    FrameContext, FrameError, FrameRequester, RainyardConfig, RenderLoop, ViewportSynchronizer,
};
use rainyard_scene::controls::DragMode;
use rainyard_scene::{OrbitControls, ParticleField};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Requests redraws from the window and remembers that one is pending
struct WindowFrames<'a, W: Window> {
    window: &'a W,
    pending: &'a Cell<bool>,
}

impl<W: Window> FrameRequester for WindowFrames<'_, W> {
    fn request_frame(&self) {
        self.pending.set(true);
        self.window.request_redraw();
    }
}

/// Lets a frame through only when the loop asked for it
///
/// Redraws the system issues on its own (expose, resize) are dropped, so the
/// loop never runs more than one frame per request.
#[derive(Debug, Default)]
struct FrameGate {
    /// Set when the loop asked for a frame, cleared when it runs
    pending: Cell<bool>,
}

impl FrameGate {
    /// A requester that opens the gate and asks `window` for a redraw
    fn frames<'a, W: Window>(&'a self, window: &'a W) -> WindowFrames<'a, W> {
        WindowFrames {
            window,
            pending: &self.pending,
        }
    }

    /// Run `tick` if a frame was requested since the last one ran
    ///
    /// Returns whether `tick` ran.
    fn on_frame<W, E, F>(&self, window: &W, tick: F) -> std::result::Result<bool, E>
    where
        W: Window,
        F: FnOnce(&dyn FrameRequester) -> std::result::Result<(), E>,
    {
        if !self.pending.replace(false) {
            return Ok(false);
        }
        tick(&self.frames(window))?;
        Ok(true)
    }
}

/// Everything that exists once the window does
struct Viewer {
    render_loop: RenderLoop<GpuRenderer, OrbitControls>,
    viewport: ViewportSynchronizer<GpuRenderer>,
    gate: FrameGate,
}

impl Viewer {
    fn new(config: &RainyardConfig, window: &DesktopWindow) -> Result<Self> {
        let renderer = GpuRenderer::new(window.winit_window_arc())?;
        let context = FrameContext::shared(config.camera(), renderer);

        let (width, height) = logical_size(window.size(), window.scale_factor());
        let viewport = ViewportSynchronizer::new(
            context.clone(),
            width,
            height,
            window.scale_factor(),
            config.viewport.max_pixel_ratio,
        )?;

        let seed = config.rain.seed.unwrap_or_else(rand::random);
        tracing::info!("Rain seed {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let settings = config.rain_settings();
        let rain = ParticleField::scatter(
            settings.count,
            settings.spread,
            settings.reset_height,
            &mut rng,
        )?;

        let render_loop = RenderLoop::new(
            context,
            config.scene()?,
            rain,
            settings,
            rng,
            config.orbit_controls(),
        );

        Ok(Self {
            render_loop,
            viewport,
            gate: FrameGate::default(),
        })
    }

    fn start(&mut self, window: &DesktopWindow) -> std::result::Result<(), FrameError> {
        self.render_loop.start(&self.gate.frames(window))
    }

    /// Run a frame if the loop asked for one
    fn frame(&mut self, window: &DesktopWindow) -> std::result::Result<(), FrameError> {
        let render_loop = &mut self.render_loop;
        if !self.gate.on_frame(window, |frames| render_loop.tick(frames))? {
            tracing::trace!("Ignoring a redraw the render loop did not request");
        }
        Ok(())
    }

    fn input(&mut self, event: InputEvent, window: &DesktopWindow) {
        let controls = self.render_loop.controls_mut();
        match event {
            InputEvent::Mouse(MouseEvent::ButtonPressed { button, x, y }) => {
                if let Some(mode) = drag_mode(button) {
                    controls.pointer_down(mode, x, y);
                }
            }
            InputEvent::Mouse(MouseEvent::ButtonReleased { .. } | MouseEvent::Left) => {
                controls.pointer_up();
            }
            InputEvent::Mouse(MouseEvent::Moved { x, y }) => {
                // Cursor positions are physical pixels
                controls.pointer_move(x, y, window.size().1 as f32);
            }
            InputEvent::Scroll { delta_y, .. } => controls.zoom(delta_y),
            InputEvent::Keyboard(_) => {}
        }
    }
}

/// Which drag a mouse button starts
fn drag_mode(button: MouseButton) -> Option<DragMode> {
    match button {
        MouseButton::Left => Some(DragMode::Rotate),
        MouseButton::Right | MouseButton::Middle => Some(DragMode::Pan),
        MouseButton::Other(_) => None,
    }
}

/// Convert a physical size to logical pixels
fn logical_size((width, height): (u32, u32), scale_factor: f64) -> (u32, u32) {
    let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    };
    (
        (width as f64 / scale).round() as u32,
        (height as f64 / scale).round() as u32,
    )
}

fn is_exit_key(event: &InputEvent) -> bool {
    matches!(
        event,
        InputEvent::Keyboard(kb) if kb.key == Key::Escape && kb.state == KeyState::Pressed
    )
}

/// Windowed application runner
pub struct WindowedApp;

impl WindowedApp {
    /// Open a window and run the viewer until it is closed
    ///
    /// Returns the error that stopped the render loop, if any.
    pub fn run(config: RainyardConfig) -> Result<()> {
        let platform = DesktopPlatform::new().map_err(|e| AppError::Platform(e.to_string()))?;
        let event_loop = platform
            .create_event_loop(config.window_config())
            .map_err(|e| AppError::Platform(e.to_string()))?;
        tracing::debug!("Running on the {} platform", platform.name());

        // We need to defer the viewer until we have a window
        let mut viewer: Option<Viewer> = None;
        let failure: Rc<RefCell<Option<AppError>>> = Rc::new(RefCell::new(None));
        let failure_slot = Rc::clone(&failure);

        let fail = move |err: AppError| {
            tracing::error!("{}", err);
            *failure_slot.borrow_mut() = Some(err);
            ControlFlow::Exit
        };

        event_loop
            .run(move |event, window| {
                match event {
                    Event::Lifecycle(LifecycleEvent::Resumed) => {
                        if viewer.is_none() {
                            let mut created = match Viewer::new(&config, window) {
                                Ok(created) => created,
                                Err(e) => return fail(e),
                            };
                            if let Err(e) = created.start(window) {
                                return fail(e.into());
                            }
                            viewer = Some(created);
                        }
                    }

                    Event::Window(WindowEvent::CloseRequested) => {
                        return ControlFlow::Exit;
                    }

                    Event::Window(WindowEvent::Resized { width, height }) => {
                        if let Some(ref mut viewer) = viewer {
                            let scale = window.scale_factor();
                            let (width, height) = logical_size((width, height), scale);
                            if let Err(e) = viewer.viewport.on_resize(width, height, scale) {
                                return fail(e.into());
                            }
                        }
                    }

                    Event::Window(WindowEvent::ScaleFactorChanged { scale_factor }) => {
                        if let Some(ref mut viewer) = viewer {
                            if let Err(e) = viewer.viewport.on_scale_factor_changed(scale_factor) {
                                return fail(e.into());
                            }
                        }
                    }

                    Event::Input(input) => {
                        if is_exit_key(&input) {
                            return ControlFlow::Exit;
                        }
                        if let Some(ref mut viewer) = viewer {
                            viewer.input(input, window);
                        }
                    }

                    Event::Frame => {
                        if let Some(ref mut viewer) = viewer {
                            if let Err(e) = viewer.frame(window) {
                                return fail(e.into());
                            }
                        }
                    }
                }

                ControlFlow::Continue
            })
            .map_err(|e| AppError::Platform(e.to_string()))?;

        let failure = failure.borrow_mut().take();
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rainyard_platform::KeyboardEvent;

    struct CountingWindow {
        redraws: Cell<u32>,
    }

    impl Window for CountingWindow {
        fn size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn scale_factor(&self) -> f64 {
            1.0
        }

        fn request_redraw(&self) {
            self.redraws.set(self.redraws.get() + 1);
        }
    }

    #[test]
    fn test_frame_request_marks_pending() {
        let window = CountingWindow {
            redraws: Cell::new(0),
        };
        let pending = Cell::new(false);
        let frames = WindowFrames {
            window: &window,
            pending: &pending,
        };

        frames.request_frame();
        assert!(pending.get());
        assert_eq!(window.redraws.get(), 1);
    }

    #[test]
    fn test_unrequested_frames_do_not_tick() {
        let window = CountingWindow {
            redraws: Cell::new(0),
        };
        let gate = FrameGate::default();
        let mut ticks = 0;

        let ran = gate
            .on_frame(&window, |_| -> std::result::Result<(), FrameError> {
                ticks += 1;
                Ok(())
            })
            .unwrap();
        assert!(!ran);
        assert_eq!(ticks, 0);
    }

    #[test]
    fn test_requested_frame_ticks_once() {
        let window = CountingWindow {
            redraws: Cell::new(0),
        };
        let gate = FrameGate::default();
        let mut ticks = 0;
        let mut tick = |_: &dyn FrameRequester| -> std::result::Result<(), FrameError> {
            ticks += 1;
            Ok(())
        };

        gate.frames(&window).request_frame();
        assert!(gate.on_frame(&window, &mut tick).unwrap());
        // A second redraw without a new request, e.g. an expose
        assert!(!gate.on_frame(&window, &mut tick).unwrap());
        assert_eq!(ticks, 1);
        assert_eq!(window.redraws.get(), 1);
    }

    #[test]
    fn test_tick_can_request_the_next_frame() {
        let window = CountingWindow {
            redraws: Cell::new(0),
        };
        let gate = FrameGate::default();
        let mut ticks = 0;
        let mut tick = |frames: &dyn FrameRequester| -> std::result::Result<(), FrameError> {
            ticks += 1;
            frames.request_frame();
            Ok(())
        };

        gate.frames(&window).request_frame();
        for _ in 0..3 {
            assert!(gate.on_frame(&window, &mut tick).unwrap());
        }
        assert_eq!(ticks, 3);
        assert_eq!(window.redraws.get(), 4);
    }

    #[test]
    fn test_failed_tick_is_reported() {
        let window = CountingWindow {
            redraws: Cell::new(0),
        };
        let gate = FrameGate::default();
        gate.frames(&window).request_frame();

        let err = gate
            .on_frame(&window, |_| Err(FrameError::ContextBusy))
            .unwrap_err();
        assert!(matches!(err, FrameError::ContextBusy));
    }

    #[test]
    fn test_logical_size() {
        assert_eq!(logical_size((2560, 1440), 2.0), (1280, 720));
        assert_eq!(logical_size((1000, 500), 1.25), (800, 400));
        assert_eq!(logical_size((640, 480), 0.0), (640, 480));
    }

    #[test]
    fn test_drag_modes() {
        assert_eq!(drag_mode(MouseButton::Left), Some(DragMode::Rotate));
        assert_eq!(drag_mode(MouseButton::Right), Some(DragMode::Pan));
        assert_eq!(drag_mode(MouseButton::Middle), Some(DragMode::Pan));
        assert_eq!(drag_mode(MouseButton::Other(4)), None);
    }

    #[test]
    fn test_escape_exits() {
        let press = |state| {
            InputEvent::Keyboard(KeyboardEvent {
                key: Key::Escape,
                state,
            })
        };
        assert!(is_exit_key(&press(KeyState::Pressed)));
        assert!(!is_exit_key(&press(KeyState::Released)));
        assert!(!is_exit_key(&InputEvent::Scroll {
            delta_x: 0.0,
            delta_y: 1.0
        }));
    }
}
