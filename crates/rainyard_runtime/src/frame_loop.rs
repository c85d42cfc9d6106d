//! Render loop driver
//!
//! One `tick` is one frame: read the clock, advance the rain, let the
//! camera control ease, render once, then ask the display for the next
//! frame. The order is fixed. A failed step stops the loop for good; the
//! next frame is never requested.

use crate::clock::FrameClock;
use crate::context::{FrameContext, FrameRequester, Renderer, SharedFrameContext};
use crate::error::{FrameError, Result};
use rainyard_scene::{advance, CameraControl, ParticleField, RainSettings, RandomSource, Scene};
use std::time::Duration;

/// How often frame-rate statistics are logged
const STATS_INTERVAL: Duration = Duration::from_secs(1);

/// Lifecycle of a [`RenderLoop`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, `start` not called yet
    Idle,
    /// Frames are being scheduled
    Running,
    /// A frame failed; no further frames run
    Stopped,
}

/// Frame counters
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Frames completed since start
    pub frames: u64,
    /// Elapsed time read at the start of the last frame
    pub elapsed: Duration,
    /// Frames per second over the last reporting window
    pub fps: f32,
    /// Time between the starts of the last two frames
    pub frame_time: Duration,
    /// Longest frame time in the last reporting window
    pub slowest_frame: Duration,
    window_start: Duration,
    window_frames: u32,
    window_slowest: Duration,
}

impl FrameStats {
    fn record(&mut self, elapsed: Duration, frame_time: Duration) {
        self.frames += 1;
        self.elapsed = elapsed;
        self.frame_time = frame_time;
        self.window_frames += 1;
        self.window_slowest = self.window_slowest.max(frame_time);

        let window = elapsed.saturating_sub(self.window_start);
        if window >= STATS_INTERVAL {
            self.fps = self.window_frames as f32 / window.as_secs_f32();
            self.slowest_frame = self.window_slowest;
            tracing::debug!(
                "{:.1} fps, slowest frame {:.1}ms ({} frames total)",
                self.fps,
                self.slowest_frame.as_secs_f64() * 1000.0,
                self.frames
            );
            self.window_start = elapsed;
            self.window_frames = 0;
            self.window_slowest = Duration::ZERO;
        }
    }
}

/// Self-rescheduling frame driver
///
/// Owns the rain field and the camera control; shares the camera and
/// renderer with the viewport synchronizer through a [`SharedFrameContext`].
pub struct RenderLoop<R: Renderer, C: CameraControl> {
    context: SharedFrameContext<R>,
    scene: Scene,
    rain: ParticleField,
    settings: RainSettings,
    rng: Box<dyn RandomSource>,
    controls: C,
    clock: FrameClock,
    state: LoopState,
    stats: FrameStats,
}

impl<R: Renderer, C: CameraControl> RenderLoop<R, C> {
    pub fn new(
        context: SharedFrameContext<R>,
        scene: Scene,
        rain: ParticleField,
        settings: RainSettings,
        rng: impl RandomSource + 'static,
        controls: C,
    ) -> Self {
        Self {
            context,
            scene,
            rain,
            settings,
            rng: Box::new(rng),
            controls,
            clock: FrameClock::new(),
            state: LoopState::Idle,
            stats: FrameStats::default(),
        }
    }

    /// Start the clock and run the first frame
    ///
    /// May be called once.
    pub fn start(&mut self, frames: &dyn FrameRequester) -> Result<()> {
        if self.state != LoopState::Idle {
            return Err(FrameError::AlreadyStarted);
        }
        tracing::info!(
            "Starting render loop: scene `{}`, {} rain particles",
            self.scene.name,
            self.rain.count()
        );
        self.clock.start();
        self.state = LoopState::Running;
        self.tick(frames)
    }

    /// Run one frame and request the next
    ///
    /// On error the loop moves to [`LoopState::Stopped`] and no next frame
    /// is requested.
    pub fn tick(&mut self, frames: &dyn FrameRequester) -> Result<()> {
        match self.state {
            LoopState::Running => {}
            LoopState::Idle => return Err(FrameError::NotStarted),
            LoopState::Stopped => return Err(FrameError::Stopped),
        }

        match self.frame() {
            Ok(()) => {
                frames.request_frame();
                Ok(())
            }
            Err(e) => {
                tracing::error!("Frame {} failed, stopping render loop: {}", self.stats.frames, e);
                self.state = LoopState::Stopped;
                Err(e)
            }
        }
    }

    fn frame(&mut self) -> Result<()> {
        let elapsed = self.clock.elapsed();
        let frame_time = self.clock.delta();
        tracing::trace!("frame {} at {:.3}s", self.stats.frames, elapsed.as_secs_f32());

        advance(
            &mut self.rain,
            self.settings.floor_y,
            self.settings.reset_height,
            self.rng.as_mut(),
        )?;

        {
            let mut ctx = self
                .context
                .try_borrow_mut()
                .map_err(|_| FrameError::ContextBusy)?;
            let FrameContext { camera, renderer } = &mut *ctx;

            self.controls.update(camera);
            renderer.render(&self.scene, camera, &self.rain)?;
        }

        self.rain.clear_needs_update();
        self.stats.record(elapsed, frame_time);
        Ok(())
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn rain(&self) -> &ParticleField {
        &self.rain
    }

    /// Mutable access to the camera control, for feeding it input between frames
    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    pub fn context(&self) -> &SharedFrameContext<R> {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_stats_report_slowest_frame_per_window() {
        let mut stats = FrameStats::default();
        stats.record(ms(200), ms(200));
        stats.record(ms(600), ms(400));
        assert_eq!(stats.fps, 0.0);
        assert_eq!(stats.frame_time, ms(400));

        stats.record(ms(1000), ms(400));
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.fps, 3.0);
        assert_eq!(stats.slowest_frame, ms(400));

        // The next window starts from scratch
        stats.record(ms(1100), ms(100));
        stats.record(ms(2000), ms(900));
        assert_eq!(stats.fps, 2.0);
        assert_eq!(stats.slowest_frame, ms(900));
    }
}
