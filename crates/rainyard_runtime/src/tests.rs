//! Frame loop and viewport tests with recording fakes

use crate::prelude::*;
use rainyard_scene::ParticleField;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Simulate,
    Controls,
    Render { needs_update: bool },
    Request,
}

type CallLog = Rc<RefCell<Vec<Call>>>;

/// Always returns 0.0 and logs each draw
struct LoggingRandom(CallLog);

impl RandomSource for LoggingRandom {
    fn next_f32(&mut self) -> f32 {
        self.0.borrow_mut().push(Call::Simulate);
        0.0
    }
}

struct LoggingControls(CallLog);

impl CameraControl for LoggingControls {
    fn update(&mut self, _camera: &mut PerspectiveCamera) {
        self.0.borrow_mut().push(Call::Controls);
    }
}

struct FakeRenderer {
    log: CallLog,
    size: (u32, u32),
    pixel_ratio: f32,
    last_aspect: Option<f32>,
    fail_on: Option<usize>,
    renders: usize,
}

impl FakeRenderer {
    fn new(log: CallLog) -> Self {
        Self {
            log,
            size: (0, 0),
            pixel_ratio: 0.0,
            last_aspect: None,
            fail_on: None,
            renders: 0,
        }
    }
}

impl Renderer for FakeRenderer {
    fn render(
        &mut self,
        _scene: &Scene,
        camera: &PerspectiveCamera,
        rain: &ParticleField,
    ) -> std::result::Result<(), RenderError> {
        self.renders += 1;
        self.last_aspect = Some(camera.aspect());
        self.log.borrow_mut().push(Call::Render {
            needs_update: rain.needs_update(),
        });
        if self.fail_on == Some(self.renders) {
            return Err(RenderError::Surface("lost".into()));
        }
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
    }
}

struct FakeFrames {
    log: CallLog,
    requests: Cell<u32>,
}

impl FakeFrames {
    fn new(log: CallLog) -> Self {
        Self {
            log,
            requests: Cell::new(0),
        }
    }
}

impl FrameRequester for FakeFrames {
    fn request_frame(&self) {
        self.requests.set(self.requests.get() + 1);
        self.log.borrow_mut().push(Call::Request);
    }
}

/// One particle sitting on the floor, so every frame recycles it and draws
/// exactly one random number.
fn single_drop_loop(
    log: &CallLog,
    renderer: FakeRenderer,
) -> RenderLoop<FakeRenderer, LoggingControls> {
    let context = FrameContext::shared(PerspectiveCamera::default(), renderer);
    let settings = RainSettings {
        count: 1,
        spread: 20.0,
        floor_y: 0.0,
        reset_height: 10.0,
    };
    let rain = ParticleField::from_positions(vec![0.0, 0.0, 0.0]).unwrap();
    RenderLoop::new(
        context,
        Scene::default(),
        rain,
        settings,
        LoggingRandom(log.clone()),
        LoggingControls(log.clone()),
    )
}

#[test]
fn test_frame_order_is_simulate_control_render_request() {
    let log = CallLog::default();
    let mut render_loop = single_drop_loop(&log, FakeRenderer::new(log.clone()));
    let frames = FakeFrames::new(log.clone());

    render_loop.start(&frames).unwrap();
    render_loop.tick(&frames).unwrap();
    render_loop.tick(&frames).unwrap();

    let frame = [
        Call::Simulate,
        Call::Controls,
        Call::Render { needs_update: true },
        Call::Request,
    ];
    let expected: Vec<Call> = frame.iter().cycle().take(12).cloned().collect();
    assert_eq!(*log.borrow(), expected);
    assert_eq!(frames.requests.get(), 3);
    assert_eq!(render_loop.stats().frames, 3);
}

#[test]
fn test_needs_update_cleared_after_render() {
    let log = CallLog::default();
    let mut render_loop = single_drop_loop(&log, FakeRenderer::new(log.clone()));
    let frames = FakeFrames::new(log.clone());

    render_loop.start(&frames).unwrap();
    assert!(!render_loop.rain().needs_update());
    assert_eq!(render_loop.rain().position(0), Some([0.0, 0.0, 0.0]));
}

#[test]
fn test_failed_render_stops_loop() {
    let log = CallLog::default();
    let mut renderer = FakeRenderer::new(log.clone());
    renderer.fail_on = Some(2);
    let mut render_loop = single_drop_loop(&log, renderer);
    let frames = FakeFrames::new(log.clone());

    render_loop.start(&frames).unwrap();
    let err = render_loop.tick(&frames).unwrap_err();
    assert!(matches!(err, FrameError::Render(RenderError::Surface(_))));
    assert_eq!(render_loop.state(), LoopState::Stopped);

    // The failed frame never asked for a successor
    assert_eq!(frames.requests.get(), 1);
    assert_eq!(log.borrow().last(), Some(&Call::Render { needs_update: true }));

    assert!(matches!(render_loop.tick(&frames), Err(FrameError::Stopped)));
    assert_eq!(render_loop.context().borrow().renderer.renders, 2);
}

#[test]
fn test_busy_context_stops_loop_before_render() {
    let log = CallLog::default();
    let context = FrameContext::shared(
        PerspectiveCamera::default(),
        FakeRenderer::new(log.clone()),
    );
    let rain = ParticleField::from_positions(vec![0.0; 6]).unwrap();
    let mut render_loop = RenderLoop::new(
        context,
        Scene::default(),
        rain,
        RainSettings::default(),
        StdRng::seed_from_u64(1),
        (),
    );
    let frames = FakeFrames::new(log.clone());

    let guard = render_loop.context().clone();
    let held = guard.borrow_mut();
    assert!(matches!(render_loop.start(&frames), Err(FrameError::ContextBusy)));
    drop(held);

    assert_eq!(render_loop.state(), LoopState::Stopped);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_start_twice_and_tick_before_start() {
    let log = CallLog::default();
    let mut render_loop = single_drop_loop(&log, FakeRenderer::new(log.clone()));
    let frames = FakeFrames::new(log.clone());

    assert!(matches!(render_loop.tick(&frames), Err(FrameError::NotStarted)));
    assert_eq!(render_loop.state(), LoopState::Idle);

    render_loop.start(&frames).unwrap();
    assert!(matches!(render_loop.start(&frames), Err(FrameError::AlreadyStarted)));
    assert_eq!(render_loop.state(), LoopState::Running);
}

#[test]
fn test_seeded_rain_is_deterministic() {
    fn run(seed: u64) -> Vec<f32> {
        let log = CallLog::default();
        let settings = RainSettings {
            count: 200,
            ..RainSettings::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let rain =
            ParticleField::scatter(settings.count, settings.spread, settings.reset_height, &mut rng)
                .unwrap();
        let context = FrameContext::shared(PerspectiveCamera::default(), FakeRenderer::new(log.clone()));
        let mut render_loop = RenderLoop::new(context, Scene::default(), rain, settings, rng, ());
        let frames = FakeFrames::new(log);

        render_loop.start(&frames).unwrap();
        for _ in 0..600 {
            render_loop.tick(&frames).unwrap();
        }
        render_loop.rain().positions().to_vec()
    }

    let a = run(11);
    assert_eq!(a, run(11));
    assert_ne!(a, run(12));
    assert!(a.iter().skip(1).step_by(3).all(|&y| y >= -1.0 - FALL_STEP && y <= 10.0));
}

#[test]
fn test_orbit_controls_drive_the_shared_camera() {
    let log = CallLog::default();
    let camera = PerspectiveCamera::default().with_position(Vec3::new(0.0, 0.0, 5.0));
    let context = FrameContext::shared(camera, FakeRenderer::new(log.clone()));
    let controls = OrbitControls::new(Vec3::ZERO).with_damping(false, 0.05);
    let mut render_loop = RenderLoop::new(
        context.clone(),
        Scene::default(),
        ParticleField::empty(),
        RainSettings::default(),
        StdRng::seed_from_u64(0),
        controls,
    );
    let frames = FakeFrames::new(log);

    render_loop.start(&frames).unwrap();
    render_loop.controls_mut().zoom(1.0);
    render_loop.tick(&frames).unwrap();

    let distance = context.borrow().camera.position.length();
    assert!(distance < 5.0);
}

#[test]
fn test_viewport_applies_size_and_aspect() {
    let log = CallLog::default();
    let context = FrameContext::shared(PerspectiveCamera::default(), FakeRenderer::new(log));
    let mut viewport = ViewportSynchronizer::new(context.clone(), 800, 600, 1.0, 2.0).unwrap();

    viewport.on_resize(1024, 768, 1.0).unwrap();

    let ctx = context.borrow();
    assert!((ctx.camera.aspect() - 1024.0 / 768.0).abs() < 1e-6);
    assert_eq!(ctx.renderer.size, (1024, 768));
    assert_eq!(ctx.renderer.pixel_ratio, 1.0);
    assert_eq!(viewport.state().width, 1024);
}

#[test]
fn test_viewport_projection_matches_new_aspect() {
    let context = FrameContext::shared(
        PerspectiveCamera::default(),
        FakeRenderer::new(CallLog::default()),
    );
    let _viewport = ViewportSynchronizer::new(context.clone(), 1600, 400, 1.0, 2.0).unwrap();

    let ctx = context.borrow();
    let fresh = PerspectiveCamera::new(ctx.camera.fov, 4.0, ctx.camera.near, ctx.camera.far);
    assert_eq!(ctx.camera.projection_matrix(), fresh.projection_matrix());
}

#[test]
fn test_viewport_clamps_pixel_ratio() {
    let context = FrameContext::shared(
        PerspectiveCamera::default(),
        FakeRenderer::new(CallLog::default()),
    );
    let mut viewport =
        ViewportSynchronizer::new(context.clone(), 640, 480, 3.0, DEFAULT_MAX_PIXEL_RATIO)
            .unwrap();
    assert_eq!(context.borrow().renderer.pixel_ratio, 2.0);

    viewport.on_scale_factor_changed(1.5).unwrap();
    assert_eq!(context.borrow().renderer.pixel_ratio, 1.5);
    assert_eq!(context.borrow().renderer.size, (640, 480));

    viewport.on_scale_factor_changed(f64::NAN).unwrap();
    assert_eq!(viewport.state().pixel_ratio, 1.0);
}

#[test]
fn test_viewport_clamps_zero_size() {
    let context = FrameContext::shared(
        PerspectiveCamera::default(),
        FakeRenderer::new(CallLog::default()),
    );
    let mut viewport = ViewportSynchronizer::new(context.clone(), 640, 480, 1.0, 2.0).unwrap();

    viewport.on_resize(0, 0, 1.0).unwrap();

    let ctx = context.borrow();
    assert_eq!(ctx.renderer.size, (1, 1));
    assert_eq!(ctx.camera.aspect(), 1.0);
    assert!(ctx.camera.projection_matrix().cols.iter().flatten().all(|v| v.is_finite()));
}

#[test]
fn test_resize_between_frames_reaches_next_render() {
    let log = CallLog::default();
    let mut render_loop = single_drop_loop(&log, FakeRenderer::new(log.clone()));
    let mut viewport =
        ViewportSynchronizer::new(render_loop.context().clone(), 800, 800, 1.0, 2.0).unwrap();
    let frames = FakeFrames::new(log.clone());

    render_loop.start(&frames).unwrap();
    viewport.on_resize(1200, 600, 1.0).unwrap();
    render_loop.tick(&frames).unwrap();

    assert_eq!(render_loop.context().borrow().renderer.last_aspect, Some(2.0));
}
